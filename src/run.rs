use crate::{error::CompactionError, key::Key, meta::DataFileMeta};

/// An ordered sequence of data files whose key ranges are strictly
/// increasing and non-overlapping: one logically sorted stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedRun<K: Key> {
    files: Vec<DataFileMeta<K>>,
}

impl<K: Key> SortedRun<K> {
    /// Build a run from files already sorted by key range.
    ///
    /// Fails with [`CompactionError::Invariant`] if two consecutive
    /// files overlap; silently accepting such input would corrupt read
    /// results once the run is merged.
    pub fn from_sorted(files: Vec<DataFileMeta<K>>) -> Result<Self, CompactionError> {
        for pair in files.windows(2) {
            if pair[1].min_key() <= pair[0].max_key() {
                return Err(CompactionError::Invariant(format!(
                    "files {} ({:?}..={:?}) and {} ({:?}..={:?}) overlap within one sorted run",
                    pair[0].file_id(),
                    pair[0].min_key(),
                    pair[0].max_key(),
                    pair[1].file_id(),
                    pair[1].min_key(),
                    pair[1].max_key(),
                )));
            }
        }
        Ok(Self { files })
    }

    /// The degenerate one-file run.
    pub fn from_single(file: DataFileMeta<K>) -> Self {
        Self { files: vec![file] }
    }

    /// Files of the run, in key order.
    pub fn files(&self) -> &[DataFileMeta<K>] {
        &self.files
    }

    /// Consume the run, yielding its files in key order.
    pub fn into_files(self) -> Vec<DataFileMeta<K>> {
        self.files
    }

    /// Number of files in the run.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` when the run holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total size in bytes of the run's files.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(DataFileMeta::file_size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::generate_file_id;

    fn file(min: u64, max: u64, size: u64) -> DataFileMeta<u64> {
        DataFileMeta::new(generate_file_id(), min, max, 0, size)
    }

    #[test]
    fn from_sorted_accepts_disjoint_files() {
        let run = SortedRun::from_sorted(vec![file(1, 3, 10), file(4, 6, 20), file(9, 10, 30)])
            .expect("disjoint run");
        assert_eq!(run.len(), 3);
        assert_eq!(run.total_size(), 60);
    }

    #[test]
    fn from_sorted_rejects_overlap() {
        let err = SortedRun::from_sorted(vec![file(1, 5, 10), file(5, 8, 10)])
            .expect_err("boundary keys overlap");
        assert!(matches!(err, CompactionError::Invariant(_)));
    }

    #[test]
    fn from_single_never_fails() {
        let run = SortedRun::from_single(file(3, 3, 1));
        assert_eq!(run.len(), 1);
        assert!(!run.is_empty());
    }
}
