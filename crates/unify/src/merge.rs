use std::collections::HashSet;

use crate::model::RecordSet;

/// Ordered union of column lists, first appearance wins.
pub fn union_columns<'a>(lists: impl IntoIterator<Item = &'a Vec<String>>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut columns = Vec::new();
    for list in lists {
        for column in list {
            if seen.insert(column.as_str()) {
                columns.push(column.clone());
            }
        }
    }
    columns
}

/// Stable concatenation of the three disjoint subsets into one table.
pub fn merge(unique_left: RecordSet, unique_right: RecordSet, resolved: RecordSet) -> RecordSet {
    let columns = union_columns([
        &unique_left.columns,
        &unique_right.columns,
        &resolved.columns,
    ]);

    let mut records =
        Vec::with_capacity(unique_left.len() + unique_right.len() + resolved.len());
    records.extend(unique_left.records);
    records.extend(unique_right.records);
    records.extend(resolved.records);

    RecordSet::new(columns, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassificationRecord;
    use std::collections::HashMap;

    fn set(columns: &[&str], regions: &[&str]) -> RecordSet {
        RecordSet::new(
            columns.iter().map(|c| c.to_string()).collect(),
            regions
                .iter()
                .map(|r| ClassificationRecord {
                    region: r.to_string(),
                    terminal_probability: 0.5,
                    fields: HashMap::new(),
                })
                .collect(),
        )
    }

    #[test]
    fn concatenates_in_subset_order() {
        let out = merge(
            set(&["region"], &["a", "b"]),
            set(&["region"], &["c"]),
            set(&["region"], &["d", "e"]),
        );
        assert_eq!(out.regions().collect::<Vec<_>>(), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn columns_unioned_in_first_seen_order() {
        let out = merge(
            set(&["region", "terminal_probability", "gene"], &[]),
            set(&["region", "strand", "terminal_probability"], &[]),
            set(&["gene", "score"], &[]),
        );
        assert_eq!(
            out.columns,
            vec!["region", "terminal_probability", "gene", "strand", "score"]
        );
    }

    #[test]
    fn all_empty() {
        let out = merge(
            RecordSet::default(),
            RecordSet::default(),
            RecordSet::default(),
        );
        assert!(out.is_empty());
        assert!(out.columns.is_empty());
    }
}
