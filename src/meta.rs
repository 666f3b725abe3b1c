use ulid::Ulid;

use crate::key::Key;

/// Unique identifier of a physical data file.
pub type FileId = Ulid;

/// Generate a fresh [`FileId`].
pub fn generate_file_id() -> FileId {
    Ulid::new()
}

/// Immutable metadata describing one physical data file of the table.
///
/// The key range `min_key..=max_key` is a closed interval over the
/// table's sort key. The minimum and maximum sequence numbers cover the
/// rows stored in the file. Once created, a `DataFileMeta` never
/// changes; level promotion produces a new value via [`upgrade`].
///
/// [`upgrade`]: DataFileMeta::upgrade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFileMeta<K: Key> {
    file_id: FileId,
    min_key: K,
    max_key: K,
    level: usize,
    file_size: u64,
    row_count: u64,
    min_sequence: u64,
    max_sequence: u64,
}

impl<K: Key> DataFileMeta<K> {
    /// Describe a file by its identity, key range, level and size.
    pub fn new(file_id: FileId, min_key: K, max_key: K, level: usize, file_size: u64) -> Self {
        Self {
            file_id,
            min_key,
            max_key,
            level,
            file_size,
            row_count: 0,
            min_sequence: 0,
            max_sequence: 0,
        }
    }

    /// Attach the number of rows stored in the file.
    pub fn with_row_count(mut self, row_count: u64) -> Self {
        self.row_count = row_count;
        self
    }

    /// Attach the sequence-number range covered by the file.
    pub fn with_sequence(mut self, min_sequence: u64, max_sequence: u64) -> Self {
        self.min_sequence = min_sequence;
        self.max_sequence = max_sequence;
        self
    }

    /// Identifier of the physical file.
    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    /// Smallest key stored in the file.
    pub fn min_key(&self) -> &K {
        &self.min_key
    }

    /// Largest key stored in the file.
    pub fn max_key(&self) -> &K {
        &self.max_key
    }

    /// Level the file currently resides on (smaller = newer).
    pub fn level(&self) -> usize {
        self.level
    }

    /// File size in bytes.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Number of rows stored in the file.
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Smallest sequence number of the file's rows.
    pub fn min_sequence(&self) -> u64 {
        self.min_sequence
    }

    /// Largest sequence number of the file's rows.
    pub fn max_sequence(&self) -> u64 {
        self.max_sequence
    }

    /// Produce a copy of this file promoted to `level`.
    ///
    /// Metadata only: the bytes on disk are untouched, so this is O(1)
    /// and never touches the rewriter.
    pub fn upgrade(&self, level: usize) -> Self {
        Self {
            level,
            ..self.clone()
        }
    }

    /// Closed-interval overlap test against another file's key range.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_key <= other.max_key && other.min_key <= self.max_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(min: u64, max: u64, level: usize) -> DataFileMeta<u64> {
        DataFileMeta::new(generate_file_id(), min, max, level, 1024)
    }

    #[test]
    fn upgrade_changes_only_level() {
        let meta = file(1, 9, 0).with_row_count(42).with_sequence(7, 13);
        let upgraded = meta.upgrade(3);
        assert_eq!(upgraded.level(), 3);
        assert_eq!(upgraded.file_id(), meta.file_id());
        assert_eq!(upgraded.min_key(), meta.min_key());
        assert_eq!(upgraded.max_key(), meta.max_key());
        assert_eq!(upgraded.file_size(), meta.file_size());
        assert_eq!(upgraded.row_count(), 42);
        assert_eq!(upgraded.min_sequence(), 7);
        assert_eq!(upgraded.max_sequence(), 13);
    }

    #[test]
    fn overlaps_treats_ranges_as_closed() {
        let left = file(1, 5, 0);
        let touching = file(5, 9, 0);
        let beyond = file(6, 9, 0);
        assert!(left.overlaps(&touching));
        assert!(touching.overlaps(&left));
        assert!(!left.overlaps(&beyond));
        assert!(!beyond.overlaps(&left));
    }
}
