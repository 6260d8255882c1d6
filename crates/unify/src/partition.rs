use std::collections::HashSet;

use crate::model::{ClassificationRecord, Partition, RecordSet};

/// Split two sets by region membership in the other set.
///
/// Membership is region equality only; each subset keeps its parent's
/// columns and relative record order.
pub fn partition(left: RecordSet, right: RecordSet) -> Partition {
    let left_keys: HashSet<&str> = left.regions().collect();
    let right_keys: HashSet<&str> = right.regions().collect();

    let left_common_mask: Vec<bool> = left.regions().map(|r| right_keys.contains(r)).collect();
    let right_common_mask: Vec<bool> = right.regions().map(|r| left_keys.contains(r)).collect();

    let (common_left, unique_left) = split(left, &left_common_mask);
    let (common_right, unique_right) = split(right, &right_common_mask);

    Partition {
        unique_left,
        unique_right,
        common_left,
        common_right,
    }
}

/// Move records into (masked, unmasked) sets.
fn split(set: RecordSet, mask: &[bool]) -> (RecordSet, RecordSet) {
    let RecordSet { columns, records } = set;
    let mut hit: Vec<ClassificationRecord> = Vec::new();
    let mut miss: Vec<ClassificationRecord> = Vec::new();

    for (record, &in_mask) in records.into_iter().zip(mask) {
        if in_mask {
            hit.push(record);
        } else {
            miss.push(record);
        }
    }

    (
        RecordSet::new(columns.clone(), hit),
        RecordSet::new(columns, miss),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn rec(region: &str, p: f64) -> ClassificationRecord {
        ClassificationRecord {
            region: region.into(),
            terminal_probability: p,
            fields: HashMap::new(),
        }
    }

    fn set(regions: &[&str]) -> RecordSet {
        RecordSet::new(
            vec!["region".into(), "terminal_probability".into()],
            regions.iter().map(|r| rec(r, 0.5)).collect(),
        )
    }

    fn regions(set: &RecordSet) -> Vec<&str> {
        set.regions().collect()
    }

    #[test]
    fn splits_by_key_membership() {
        let out = partition(set(&["a", "b", "c"]), set(&["c", "d", "a"]));
        assert_eq!(regions(&out.unique_left), vec!["b"]);
        assert_eq!(regions(&out.unique_right), vec!["d"]);
        assert_eq!(regions(&out.common_left), vec!["a", "c"]);
        assert_eq!(regions(&out.common_right), vec!["c", "a"]);
    }

    #[test]
    fn empty_side_makes_everything_unique() {
        let out = partition(set(&["a", "b"]), RecordSet::empty(vec!["region".into()]));
        assert_eq!(regions(&out.unique_left), vec!["a", "b"]);
        assert!(out.unique_right.is_empty());
        assert!(out.common_left.is_empty());
        assert!(out.common_right.is_empty());
        assert_eq!(out.unique_right.columns, vec!["region"]);
    }

    #[test]
    fn repeated_keys_all_land_in_common() {
        let out = partition(set(&["a", "a", "b"]), set(&["a"]));
        assert_eq!(regions(&out.common_left), vec!["a", "a"]);
        assert_eq!(regions(&out.unique_left), vec!["b"]);
        assert_eq!(regions(&out.common_right), vec!["a"]);
    }

    #[test]
    fn subsets_inherit_columns() {
        let left = RecordSet::new(vec!["region".into(), "gene".into()], vec![rec("a", 0.1)]);
        let out = partition(left, set(&["a"]));
        assert_eq!(out.common_left.columns, vec!["region", "gene"]);
        assert_eq!(out.unique_left.columns, vec!["region", "gene"]);
        assert_eq!(out.common_right.columns, vec!["region", "terminal_probability"]);
    }
}
