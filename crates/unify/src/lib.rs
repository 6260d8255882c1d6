//! `termex-unify`: forward/reverse terminal-exon result unification.
//!
//! Pure engine crate: loads the two scan tables, partitions them by region,
//! resolves regions reported by both scans and merges everything into one
//! table. No CLI dependencies.

pub mod config;
pub mod dedup;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod loader;
pub mod merge;
pub mod model;
pub mod partition;
pub mod resolve;
pub mod writer;

pub use config::{DuplicatePolicy, UnifyConfig};
pub use engine::{run, unify};
pub use error::UnifyError;
pub use loader::load;
pub use merge::merge;
pub use model::{ClassificationRecord, RecordSet, UnifyOutcome, UnifyReport, UnifySummary};
pub use partition::partition;
pub use resolve::resolve;
pub use writer::{write_tsv, write_tsv_file};
