use std::collections::HashMap;

use log::{debug, warn};

use crate::config::DuplicatePolicy;
use crate::error::UnifyError;
use crate::model::{ClassificationRecord, RecordSet};

/// Reduce a source to one record per region according to `policy`.
///
/// The surviving record takes the slot of the region's first occurrence, so
/// sets without repeats pass through unchanged. Returns the set and the
/// number of rows dropped.
pub fn collapse_duplicates(
    source: &str,
    set: RecordSet,
    policy: DuplicatePolicy,
) -> Result<(RecordSet, usize), UnifyError> {
    let RecordSet { columns, records } = set;
    let total = records.len();

    let mut slots: HashMap<String, usize> = HashMap::with_capacity(total);
    let mut kept: Vec<ClassificationRecord> = Vec::with_capacity(total);
    let mut counts: Vec<usize> = Vec::with_capacity(total);

    for record in records {
        match slots.get(&record.region) {
            Some(&slot) => {
                counts[slot] += 1;
                let replace = match policy {
                    DuplicatePolicy::KeepMax => {
                        record.terminal_probability >= kept[slot].terminal_probability
                    }
                    DuplicatePolicy::KeepLast | DuplicatePolicy::Error => true,
                };
                if replace {
                    kept[slot] = record;
                }
            }
            None => {
                slots.insert(record.region.clone(), kept.len());
                kept.push(record);
                counts.push(1);
            }
        }
    }

    let dropped = total - kept.len();
    if dropped == 0 {
        return Ok((RecordSet::new(columns, kept), 0));
    }

    if policy == DuplicatePolicy::Error {
        let duplicates: Vec<(String, usize)> = kept
            .iter()
            .zip(&counts)
            .filter(|&(_, &count)| count > 1)
            .map(|(r, &count)| (r.region.clone(), count))
            .collect();
        return Err(UnifyError::DuplicateRegion {
            source: source.into(),
            duplicates,
        });
    }

    warn!(
        "{source}: {dropped} duplicate row(s) across {} region(s) collapsed ({policy})",
        counts.iter().filter(|&&c| c > 1).count()
    );
    for (record, count) in kept.iter().zip(&counts).filter(|&(_, &c)| c > 1) {
        debug!(
            "{source}: region {:?} seen {count} times, kept p={}",
            record.region, record.terminal_probability
        );
    }

    Ok((RecordSet::new(columns, kept), dropped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(region: &str, p: f64, tag: &str) -> ClassificationRecord {
        let mut fields = HashMap::new();
        fields.insert("region".to_string(), region.to_string());
        fields.insert("terminal_probability".to_string(), p.to_string());
        fields.insert("tag".to_string(), tag.to_string());
        ClassificationRecord {
            region: region.into(),
            terminal_probability: p,
            fields,
        }
    }

    fn set(records: Vec<ClassificationRecord>) -> RecordSet {
        RecordSet::new(
            vec!["region".into(), "terminal_probability".into(), "tag".into()],
            records,
        )
    }

    fn tags(set: &RecordSet) -> Vec<&str> {
        set.records.iter().map(|r| r.field("tag")).collect()
    }

    #[test]
    fn unique_regions_untouched() {
        let input = set(vec![rec("a", 0.1, "1"), rec("b", 0.2, "2")]);
        let (out, dropped) =
            collapse_duplicates("forward", input.clone(), DuplicatePolicy::Error).unwrap();
        assert_eq!(dropped, 0);
        assert_eq!(out, input);
    }

    #[test]
    fn keep_max_takes_highest_at_first_slot() {
        let input = set(vec![
            rec("a", 0.3, "a1"),
            rec("b", 0.5, "b1"),
            rec("a", 0.9, "a2"),
            rec("a", 0.4, "a3"),
        ]);
        let (out, dropped) =
            collapse_duplicates("forward", input, DuplicatePolicy::KeepMax).unwrap();
        assert_eq!(dropped, 2);
        assert_eq!(tags(&out), vec!["a2", "b1"]);
    }

    #[test]
    fn keep_max_later_row_wins_tie() {
        let input = set(vec![rec("a", 0.7, "first"), rec("a", 0.7, "second")]);
        let (out, _) = collapse_duplicates("forward", input, DuplicatePolicy::KeepMax).unwrap();
        assert_eq!(tags(&out), vec!["second"]);
    }

    #[test]
    fn keep_last_ignores_probability() {
        let input = set(vec![rec("a", 0.9, "first"), rec("a", 0.1, "last")]);
        let (out, dropped) =
            collapse_duplicates("forward", input, DuplicatePolicy::KeepLast).unwrap();
        assert_eq!(dropped, 1);
        assert_eq!(tags(&out), vec!["last"]);
    }

    #[test]
    fn error_policy_reports_counts() {
        let input = set(vec![
            rec("a", 0.1, "1"),
            rec("b", 0.1, "2"),
            rec("a", 0.2, "3"),
            rec("a", 0.3, "4"),
        ]);
        let err = collapse_duplicates("reverse", input, DuplicatePolicy::Error).unwrap_err();
        match err {
            UnifyError::DuplicateRegion { source, duplicates } => {
                assert_eq!(source, "reverse");
                assert_eq!(duplicates, vec![("a".to_string(), 3)]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
