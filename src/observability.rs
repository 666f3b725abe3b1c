//! Logging infrastructure for structured compaction events.
//!
//! All events use `tracing` with target "mergetree" and include an
//! `event` field for filtering. The crate never installs a global
//! subscriber; applications configure tracing via `tracing_subscriber`
//! or similar.

/// Target for all compaction log events.
pub(crate) const MERGETREE_TARGET: &str = "mergetree";

/// Macro for debug-level log events.
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::MERGETREE_TARGET, $($field)*)
    };
}

/// Macro for warn-level log events.
macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::MERGETREE_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_warn;
