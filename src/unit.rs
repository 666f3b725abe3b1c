use crate::{key::Key, meta::DataFileMeta};

/// The immutable input to one compaction: a target output level plus
/// the files selected for it.
///
/// Units are built by an external level-selection policy and consumed
/// exactly once. The policy must guarantee that the file sets of
/// in-flight units are disjoint; the compaction core does not enforce
/// this.
#[derive(Debug, Clone)]
pub struct CompactUnit<K: Key> {
    output_level: usize,
    files: Vec<DataFileMeta<K>>,
}

impl<K: Key> CompactUnit<K> {
    /// Select `files` for compaction into `output_level`.
    pub fn new(output_level: usize, files: Vec<DataFileMeta<K>>) -> Self {
        Self {
            output_level,
            files,
        }
    }

    /// Level every output file of this compaction will carry.
    pub fn output_level(&self) -> usize {
        self.output_level
    }

    /// Files selected for this compaction, possibly drawn from several
    /// levels and runs.
    pub fn files(&self) -> &[DataFileMeta<K>] {
        &self.files
    }

    /// Consume the unit, yielding its files.
    pub fn into_files(self) -> Vec<DataFileMeta<K>> {
        self.files
    }
}
