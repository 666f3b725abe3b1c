use std::time::Duration;

use crate::{key::Key, meta::DataFileMeta};

/// Task-local diagnostics accumulated while compacting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompactMetrics {
    /// Wall-clock time spent in the task.
    pub elapsed: Duration,
    /// Files promoted to the output level by metadata alone.
    pub upgrade_files: usize,
    /// Number of batches handed to the rewriter.
    pub rewrite_invocations: usize,
}

/// The delta produced by one compaction: files logically removed and
/// files logically added.
///
/// `before` and `after` represent the same logical row content (minus
/// rows dropped when the task ran with `drop_delete`); the surrounding
/// storage layer commits the pair as one atomic file-set swap.
#[derive(Debug, Clone)]
pub struct CompactResult<K: Key> {
    before: Vec<DataFileMeta<K>>,
    after: Vec<DataFileMeta<K>>,
    metrics: CompactMetrics,
}

impl<K: Key> CompactResult<K> {
    pub(crate) fn new(
        before: Vec<DataFileMeta<K>>,
        after: Vec<DataFileMeta<K>>,
        metrics: CompactMetrics,
    ) -> Self {
        Self {
            before,
            after,
            metrics,
        }
    }

    /// Files removed from the table's file set.
    pub fn before(&self) -> &[DataFileMeta<K>] {
        &self.before
    }

    /// Files added to the table's file set: upgraded copies or freshly
    /// rewritten files.
    pub fn after(&self) -> &[DataFileMeta<K>] {
        &self.after
    }

    /// Diagnostics gathered by the task.
    pub fn metrics(&self) -> &CompactMetrics {
        &self.metrics
    }

    /// Human-readable metric line for logging.
    pub fn summary(&self) -> String {
        format!(
            "done compacting {} files to {} files in {}ms, upgrade file num = {}",
            self.before.len(),
            self.after.len(),
            self.metrics.elapsed.as_millis(),
            self.metrics.upgrade_files,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::generate_file_id;

    #[test]
    fn summary_reports_counts_and_upgrades() {
        let before = vec![DataFileMeta::new(generate_file_id(), 1u64, 5u64, 0, 10)];
        let after = vec![DataFileMeta::new(generate_file_id(), 1u64, 5u64, 1, 10)];
        let metrics = CompactMetrics {
            elapsed: Duration::from_millis(3),
            upgrade_files: 1,
            rewrite_invocations: 0,
        };
        let result = CompactResult::new(before, after, metrics);
        assert_eq!(
            result.summary(),
            "done compacting 1 files to 1 files in 3ms, upgrade file num = 1"
        );
    }
}
