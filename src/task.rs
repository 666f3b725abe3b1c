//! Merge-tree compaction task orchestration.

use std::{mem, time::Instant};

use crate::{
    error::CompactionError,
    key::Key,
    meta::DataFileMeta,
    observability::{log_debug, log_warn},
    option::CompactOptions,
    partition::IntervalPartition,
    result::{CompactMetrics, CompactResult},
    rewrite::CompactRewriter,
    run::SortedRun,
    unit::CompactUnit,
};

/// One merge-tree compaction.
///
/// Consumes a [`CompactUnit`], partitions its files into sections of
/// overlapping sorted runs, then walks the sections in key order
/// deciding per section whether files can be promoted to the output
/// level by metadata alone or must be handed to the rewriter, and
/// assembles the before/after delta.
///
/// A task is single-use, holds no locks and shares no mutable state;
/// running many tasks concurrently is safe as long as the upstream
/// selection policy keeps their input file sets disjoint.
#[derive(Debug)]
pub struct MergeTreeCompactTask<K: Key, R: CompactRewriter<K>> {
    min_file_size: u64,
    rewriter: R,
    output_level: usize,
    partitioned: Vec<Vec<SortedRun<K>>>,
    drop_delete: bool,
    metrics: CompactMetrics,
}

impl<K, R> MergeTreeCompactTask<K, R>
where
    K: Key,
    R: CompactRewriter<K>,
{
    /// Build a task for `unit`, partitioning its files up front.
    ///
    /// Fails with [`CompactionError::Config`] on a rejected option
    /// value and [`CompactionError::Invariant`] on input files the
    /// partitioner cannot arrange into valid sections.
    pub fn new(
        options: &CompactOptions,
        rewriter: R,
        unit: CompactUnit<K>,
        drop_delete: bool,
    ) -> Result<Self, CompactionError> {
        options.validate()?;
        let output_level = unit.output_level();
        let partitioned = IntervalPartition::new(unit.into_files()).partition()?;
        Ok(Self {
            min_file_size: options.min_file_size,
            rewriter,
            output_level,
            partitioned,
            drop_delete,
            metrics: CompactMetrics::default(),
        })
    }

    /// Run the compaction to completion and return the delta.
    ///
    /// All-or-nothing: any rewriter failure aborts the task and no
    /// partial result escapes; the caller retries with a fresh unit
    /// if it wants to.
    pub async fn compact(mut self) -> Result<CompactResult<K>, CompactionError> {
        let start = Instant::now();
        let mut candidate: Vec<Vec<SortedRun<K>>> = Vec::new();
        let mut before = Vec::new();
        let mut after = Vec::new();

        // Walk sections in key order, batching adjacent and contiguous
        // candidates. An intermediate file can never be skipped when
        // merging, that would destroy the overall orderliness.
        for section in mem::take(&mut self.partitioned) {
            if section.len() > 1 {
                // Overlapping runs must be merged to restore the
                // single-sorted-run invariant.
                candidate.push(section);
                continue;
            }
            let Some(run) = section.into_iter().next() else {
                continue;
            };
            for file in run.into_files() {
                if file.file_size() < self.min_file_size {
                    // Small files ride along with the pending batch.
                    candidate.push(vec![SortedRun::from_single(file)]);
                } else {
                    // Large file with no overlap: rewrite what is
                    // pending, then promote it by metadata alone.
                    self.flush_rewrite(&mut candidate, &mut before, &mut after)
                        .await?;
                    self.upgrade(file, &mut before, &mut after);
                }
            }
        }
        self.flush_rewrite(&mut candidate, &mut before, &mut after)
            .await?;

        self.metrics.elapsed = start.elapsed();
        let result = CompactResult::new(before, after, self.metrics.clone());
        log_debug!(
            event = "compact_done",
            component = "compaction",
            output_level = self.output_level,
            summary = %result.summary(),
        );
        Ok(result)
    }

    /// Record the metadata-only level change for `file`.
    ///
    /// A file already at the output level is a no-op and leaves no
    /// trace in the delta.
    fn upgrade(
        &mut self,
        file: DataFileMeta<K>,
        before: &mut Vec<DataFileMeta<K>>,
        after: &mut Vec<DataFileMeta<K>>,
    ) {
        if file.level() != self.output_level {
            after.push(file.upgrade(self.output_level));
            before.push(file);
            self.metrics.upgrade_files += 1;
        }
    }

    /// Flush the pending candidate batch through the rewriter.
    async fn flush_rewrite(
        &mut self,
        candidate: &mut Vec<Vec<SortedRun<K>>>,
        before: &mut Vec<DataFileMeta<K>>,
        after: &mut Vec<DataFileMeta<K>>,
    ) -> Result<(), CompactionError> {
        if candidate.is_empty() {
            return Ok(());
        }
        let mut batch = mem::take(candidate);
        if batch.len() == 1 {
            let Some(section) = batch.pop() else {
                return Ok(());
            };
            match section.len() {
                0 => return Ok(()),
                1 => {
                    // A single sorted run alone needs no merge;
                    // promoting its files is enough.
                    self.upgrade_section(section, before, after);
                    return Ok(());
                }
                _ => batch.push(section),
            }
        }
        // A lone small run at either edge of the batch next to a merged
        // section can be promoted without rewriting: the sections left
        // to merge stay contiguous. Between two merged sections it must
        // ride along instead, or the rewritten coverage would wrap
        // around its key range.
        let mut tail_upgrade = None;
        if batch.len() > 1
            && is_single_file(&batch[batch.len() - 1])
            && is_overlapping(&batch[batch.len() - 2])
        {
            tail_upgrade = batch.pop();
        }
        let mut head_upgrade = None;
        if batch.len() > 1 && is_single_file(&batch[0]) && is_overlapping(&batch[1]) {
            head_upgrade = Some(batch.remove(0));
        }
        if let Some(section) = head_upgrade {
            self.upgrade_section(section, before, after);
        }
        for section in &batch {
            for run in section {
                before.extend_from_slice(run.files());
            }
        }
        let rewritten = match self
            .rewriter
            .rewrite(self.output_level, self.drop_delete, batch)
            .await
        {
            Ok(files) => files,
            Err(err) => {
                log_warn!(
                    event = "rewrite_failed",
                    component = "compaction",
                    output_level = self.output_level,
                    error = %err,
                );
                return Err(err);
            }
        };
        self.metrics.rewrite_invocations += 1;
        after.extend(rewritten);
        if let Some(section) = tail_upgrade {
            self.upgrade_section(section, before, after);
        }
        Ok(())
    }

    fn upgrade_section(
        &mut self,
        section: Vec<SortedRun<K>>,
        before: &mut Vec<DataFileMeta<K>>,
        after: &mut Vec<DataFileMeta<K>>,
    ) {
        for run in section {
            for file in run.into_files() {
                self.upgrade(file, before, after);
            }
        }
    }
}

fn is_single_file<K: Key>(section: &[SortedRun<K>]) -> bool {
    section.len() == 1 && section[0].len() == 1
}

fn is_overlapping<K: Key>(section: &[SortedRun<K>]) -> bool {
    section.len() > 1
}
