use std::fmt::Debug;

/// Sort key of the table.
///
/// Key ranges of data files are closed intervals over this type, so two
/// ranges that meet at an equal boundary key count as overlapping. The
/// `Ord` bound is the table's key comparator.
pub trait Key: 'static + Ord + Clone + Send + Sync + Debug {}

impl<T> Key for T where T: 'static + Ord + Clone + Send + Sync + Debug {}
