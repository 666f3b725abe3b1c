use thiserror::Error;

/// Failures surfaced by merge-tree compaction tasks.
///
/// A task never retries and never returns a partial result: any error
/// aborts the whole task and the caller decides whether to reselect a
/// fresh unit and try again later.
#[derive(Debug, Error)]
pub enum CompactionError {
    /// I/O failure reported while rewriting data files. Rewriter
    /// implementations bubble these up with `?`.
    #[error("compaction io error: {0}")]
    Io(#[from] std::io::Error),
    /// The rewriter collaborator failed (corrupt input, encoding error,
    /// resource exhaustion).
    #[error("compaction rewrite failed: {0}")]
    Rewrite(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Input files violate an invariant the partitioner relies on.
    /// This indicates a bug in the upstream level-selection policy and
    /// is reported loudly instead of risking a mis-merge.
    #[error("compaction input invariant violated: {0}")]
    Invariant(String),
    /// Rejected compaction configuration.
    #[error("invalid compaction configuration: {0}")]
    Config(String),
}

impl CompactionError {
    /// Wrap an arbitrary rewriter failure.
    pub fn rewrite(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Rewrite(err.into())
    }
}
