use crate::model::{Resolution, UnifySummary};

/// Compute summary statistics for one unification run.
///
/// Each side is given as (input rows, duplicate rows collapsed).
pub fn compute_summary(
    left: (usize, usize),
    right: (usize, usize),
    unique: (usize, usize),
    resolution: &Resolution,
) -> UnifySummary {
    let common_regions = resolution.records.len();

    UnifySummary {
        left_rows: left.0,
        right_rows: right.0,
        left_duplicates_collapsed: left.1,
        right_duplicates_collapsed: right.1,
        unique_left: unique.0,
        unique_right: unique.1,
        common_regions,
        left_wins: resolution.left_wins,
        right_wins: resolution.right_wins,
        ties: resolution.ties,
        output_rows: unique.0 + unique.1 + common_regions,
    }
}
