#![deny(missing_docs)]
//! Merge-tree compaction core for log-structured table storage.
//!
//! Given a set of leveled data files selected by an external policy,
//! the crate decides which files must be rewritten by merging and which
//! can be promoted to the target level as a metadata-only change, and
//! produces the before/after file-set delta the storage layer commits
//! atomically.
//!
//! Flow: [`CompactUnit`] → [`IntervalPartition`] → ordered sections →
//! upgrade in place or batch for rewrite → [`CompactRewriter`] →
//! [`CompactResult`].

mod observability;

/// Typed failures surfaced by compaction tasks.
pub mod error;
/// Sort-key bound for table keys.
pub mod key;
/// Data file metadata and file ids.
pub mod meta;
/// Compaction tuning knobs.
pub mod option;
/// Grouping of files into sections of overlapping sorted runs.
pub mod partition;
/// Before/after file-set delta and task diagnostics.
pub mod result;
/// Rewriter collaborator interface.
pub mod rewrite;
/// Sorted, non-overlapping file sequences.
pub mod run;
/// Merge-tree compaction task orchestration.
pub mod task;
/// Input unit selected by the level-selection policy.
pub mod unit;

pub use error::CompactionError;
pub use key::Key;
pub use meta::{generate_file_id, DataFileMeta, FileId};
pub use option::CompactOptions;
pub use partition::IntervalPartition;
pub use result::{CompactMetrics, CompactResult};
pub use rewrite::{CompactRewriter, RewriteFuture};
pub use run::SortedRun;
pub use task::MergeTreeCompactTask;
pub use unit::CompactUnit;
