use std::path::Path;

use log::info;

use crate::config::UnifyConfig;
use crate::dedup::collapse_duplicates;
use crate::error::UnifyError;
use crate::evidence::compute_summary;
use crate::loader::load;
use crate::merge::merge;
use crate::model::{RecordSet, UnifyMeta, UnifyOutcome, UnifyReport};
use crate::partition::partition;
use crate::resolve::resolve_with_stats;

/// Source label of the left (forward scan) input.
pub const FORWARD: &str = "forward";
/// Source label of the right (reverse scan) input.
pub const REVERSE: &str = "reverse";

/// Unify two loaded sets per config: duplicate policy, partition, resolve,
/// merge. The left set is the forward scan; ties go to the right (reverse).
pub fn unify(left: RecordSet, right: RecordSet, config: &UnifyConfig) -> Result<UnifyOutcome, UnifyError> {
    let policy = config.duplicates.policy;
    let left_rows = left.len();
    let right_rows = right.len();

    let (left, left_dropped) = collapse_duplicates(FORWARD, left, policy)?;
    let (right, right_dropped) = collapse_duplicates(REVERSE, right, policy)?;

    let parts = partition(left, right);
    let unique_left = parts.unique_left.len();
    let unique_right = parts.unique_right.len();

    let resolution = resolve_with_stats(parts.common_left, parts.common_right);
    let summary = compute_summary(
        (left_rows, left_dropped),
        (right_rows, right_dropped),
        (unique_left, unique_right),
        &resolution,
    );

    let mut records = merge(parts.unique_left, parts.unique_right, resolution.records);
    if records.columns.is_empty() {
        records.columns.push(config.input.region_column.clone());
    }
    debug_assert_eq!(records.len(), summary.output_rows);

    info!(
        "unified {} forward + {} reverse row(s) into {} ({} common, {} tie(s))",
        left_rows, right_rows, summary.output_rows, summary.common_regions, summary.ties
    );

    Ok(UnifyOutcome { records, summary })
}

/// Load both scan locations and unify them.
pub fn run(forward: &Path, reverse: &Path, config: &UnifyConfig) -> Result<UnifyOutcome, UnifyError> {
    let left = load(forward, FORWARD, &config.input)?;
    let right = load(reverse, REVERSE, &config.input)?;
    unify(left, right, config)
}

impl UnifyOutcome {
    pub fn report(&self, config: &UnifyConfig) -> UnifyReport {
        UnifyReport {
            meta: UnifyMeta {
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                run_at: chrono::Utc::now().to_rfc3339(),
                duplicate_policy: config.duplicates.policy.to_string(),
            },
            summary: self.summary.clone(),
        }
    }
}
