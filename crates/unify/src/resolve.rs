use std::collections::HashMap;

use log::debug;

use crate::merge::union_columns;
use crate::model::{ClassificationRecord, RecordSet, Resolution};

/// Best candidate seen so far on each side for one region.
struct Contest {
    left: ClassificationRecord,
    right: Option<ClassificationRecord>,
}

/// Pick one record per region present in both sets.
pub fn resolve(common_left: RecordSet, common_right: RecordSet) -> RecordSet {
    resolve_with_stats(common_left, common_right).records
}

/// Keyed single-pass resolution of common regions.
///
/// The higher `terminal_probability` wins; on equal probability the right
/// record wins. Repeated rows on one side are folded first (a later row
/// replaces an earlier one on greater-or-equal probability), so the output
/// never holds more than one record per region. Regions that are not in
/// both sets are dropped. Output follows first appearance in `common_left`.
pub fn resolve_with_stats(common_left: RecordSet, common_right: RecordSet) -> Resolution {
    let columns = union_columns([&common_left.columns, &common_right.columns]);

    let mut index: HashMap<String, usize> = HashMap::with_capacity(common_left.len());
    let mut contests: Vec<Contest> = Vec::with_capacity(common_left.len());

    for record in common_left.records {
        match index.get(&record.region) {
            Some(&i) => {
                if record.terminal_probability >= contests[i].left.terminal_probability {
                    contests[i].left = record;
                }
            }
            None => {
                index.insert(record.region.clone(), contests.len());
                contests.push(Contest {
                    left: record,
                    right: None,
                });
            }
        }
    }

    let mut unmatched_right = 0usize;
    for record in common_right.records {
        let Some(&i) = index.get(&record.region) else {
            unmatched_right += 1;
            continue;
        };
        let contest = &mut contests[i];
        let replace = match &contest.right {
            Some(best) => record.terminal_probability >= best.terminal_probability,
            None => true,
        };
        if replace {
            contest.right = Some(record);
        }
    }

    let mut records = Vec::with_capacity(contests.len());
    let mut left_wins = 0;
    let mut right_wins = 0;
    let mut ties = 0;
    let mut unmatched_left = 0usize;

    for Contest { left, right } in contests {
        let Some(right) = right else {
            unmatched_left += 1;
            continue;
        };
        if right.terminal_probability >= left.terminal_probability {
            if right.terminal_probability == left.terminal_probability {
                ties += 1;
            }
            right_wins += 1;
            records.push(right);
        } else {
            left_wins += 1;
            records.push(left);
        }
    }

    if unmatched_left + unmatched_right > 0 {
        debug!(
            "resolve: dropped {unmatched_left} left and {unmatched_right} right record(s) with no counterpart"
        );
    }

    Resolution {
        records: RecordSet::new(columns, records),
        left_wins,
        right_wins,
        ties,
    }
}
