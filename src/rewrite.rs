//! Rewriter collaborator interface.
//!
//! The rewriter owns the merge-sort row iterator and all file I/O; the
//! compaction task only decides *what* to hand it. Keeping the contract
//! to a single method lets tests inject a fake that returns canned
//! output files without any I/O-capable merge implementation.

use std::{future::Future, pin::Pin, sync::Arc};

use crate::{error::CompactionError, key::Key, meta::DataFileMeta, run::SortedRun};

/// Boxed future returned by [`CompactRewriter::rewrite`].
pub type RewriteFuture<'a, K> =
    Pin<Box<dyn Future<Output = Result<Vec<DataFileMeta<K>>, CompactionError>> + Send + 'a>>;

/// Merges batches of overlapping sorted runs into new data files.
///
/// Output files must carry `output_level`, preserve the batch's logical
/// row content (minus delete markers when `drop_delete` is set), and
/// keep the section's overall sort order across output file boundaries.
/// Output may be split into several size-bounded files.
pub trait CompactRewriter<K: Key>: Send + Sync {
    /// Rewrite `sections` into new files at `output_level`. Sections
    /// arrive in key order; each one is a list of mutually overlapping
    /// sorted runs.
    ///
    /// `drop_delete` is an opaque policy flag passed through from the
    /// task; the task never inspects row content itself.
    fn rewrite(
        &self,
        output_level: usize,
        drop_delete: bool,
        sections: Vec<Vec<SortedRun<K>>>,
    ) -> RewriteFuture<'_, K>;
}

impl<K: Key, T: CompactRewriter<K> + ?Sized> CompactRewriter<K> for Arc<T> {
    fn rewrite(
        &self,
        output_level: usize,
        drop_delete: bool,
        sections: Vec<Vec<SortedRun<K>>>,
    ) -> RewriteFuture<'_, K> {
        (**self).rewrite(output_level, drop_delete, sections)
    }
}
