use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One classified candidate region.
///
/// `fields` holds every column of the source row, `region` and the
/// probability included, in their original text. The parsed copies exist
/// only for partitioning and conflict resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRecord {
    pub region: String,
    pub terminal_probability: f64,
    pub fields: HashMap<String, String>,
}

impl ClassificationRecord {
    pub fn field(&self, column: &str) -> &str {
        self.fields.get(column).map(|s| s.as_str()).unwrap_or("")
    }
}

/// Ordered records from one source, plus the header they were read with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub records: Vec<ClassificationRecord>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>, records: Vec<ClassificationRecord>) -> Self {
        Self { columns, records }
    }

    /// Empty set carrying only a header.
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.region.as_str())
    }
}

// ---------------------------------------------------------------------------
// Partitioning + resolution
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Partition {
    pub unique_left: RecordSet,
    pub unique_right: RecordSet,
    pub common_left: RecordSet,
    pub common_right: RecordSet,
}

#[derive(Debug)]
pub struct Resolution {
    pub records: RecordSet,
    pub left_wins: usize,
    pub right_wins: usize,
    /// Common regions decided by the tie rule (equal probabilities).
    pub ties: usize,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnifySummary {
    pub left_rows: usize,
    pub right_rows: usize,
    pub left_duplicates_collapsed: usize,
    pub right_duplicates_collapsed: usize,
    pub unique_left: usize,
    pub unique_right: usize,
    pub common_regions: usize,
    pub left_wins: usize,
    pub right_wins: usize,
    pub ties: usize,
    pub output_rows: usize,
}

#[derive(Debug)]
pub struct UnifyOutcome {
    pub records: RecordSet,
    pub summary: UnifySummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnifyReport {
    pub meta: UnifyMeta,
    pub summary: UnifySummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnifyMeta {
    pub engine_version: String,
    pub run_at: String,
    pub duplicate_policy: String,
}
