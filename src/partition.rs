//! Groups a flat list of data files into an ordered sequence of
//! sections, each section holding the sorted runs whose key ranges
//! mutually overlap.
//!
//! This is the classical merge-overlapping-intervals sweep, generalized
//! to remember which run every file belongs to instead of collapsing a
//! section to a single merged interval.

use std::collections::BinaryHeap;

use crate::{error::CompactionError, key::Key, meta::DataFileMeta, run::SortedRun};

/// Partitions input files by overlapping key range.
///
/// Sections come out in key order and are pairwise disjoint; runs
/// *within* one section may overlap each other. Key ranges are closed
/// intervals, so files that meet at an equal boundary key always land
/// in the same section.
pub struct IntervalPartition<K: Key> {
    files: Vec<DataFileMeta<K>>,
}

impl<K: Key> IntervalPartition<K> {
    /// Stage `files` for partitioning, sorted by (min key, max key).
    ///
    /// The sort is stable, so files drawn from a pre-existing sorted
    /// run keep their relative order.
    pub fn new(mut files: Vec<DataFileMeta<K>>) -> Self {
        files.sort_by(|left, right| {
            left.min_key()
                .cmp(right.min_key())
                .then_with(|| left.max_key().cmp(right.max_key()))
        });
        Self { files }
    }

    /// Run the sweep, producing sections in key order.
    ///
    /// Every input file appears in exactly one run of exactly one
    /// section. A file with an inverted key range fails with
    /// [`CompactionError::Invariant`].
    pub fn partition(self) -> Result<Vec<Vec<SortedRun<K>>>, CompactionError> {
        let mut sections = Vec::new();
        let mut section: Vec<DataFileMeta<K>> = Vec::new();
        // Aggregated upper bound of the accumulating section.
        let mut bound: Option<K> = None;

        for file in self.files {
            if file.min_key() > file.max_key() {
                return Err(CompactionError::Invariant(format!(
                    "file {} has inverted key range {:?}..={:?}",
                    file.file_id(),
                    file.min_key(),
                    file.max_key(),
                )));
            }
            let closes_section = !section.is_empty()
                && bound
                    .as_ref()
                    .map_or(false, |upper| file.min_key() > upper);
            if closes_section {
                sections.push(pack_runs(std::mem::take(&mut section))?);
                bound = None;
            }
            if bound.as_ref().map_or(true, |upper| file.max_key() > upper) {
                bound = Some(file.max_key().clone());
            }
            section.push(file);
        }
        if !section.is_empty() {
            sections.push(pack_runs(section)?);
        }
        Ok(sections)
    }
}

/// A run still accepting files during section packing, ordered so the
/// heap pops the run with the smallest current upper bound first.
struct OpenRun<K: Key> {
    last_max: K,
    files: Vec<DataFileMeta<K>>,
}

impl<K: Key> PartialEq for OpenRun<K> {
    fn eq(&self, other: &Self) -> bool {
        self.last_max == other.last_max
    }
}

impl<K: Key> Eq for OpenRun<K> {}

impl<K: Key> PartialOrd for OpenRun<K> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Key> Ord for OpenRun<K> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed: `BinaryHeap` is a max-heap, the packing wants the
        // run with the smallest last max key on top.
        other.last_max.cmp(&self.last_max)
    }
}

/// Pack one section's files (sorted by min key) into a minimal number
/// of sorted runs.
///
/// A file extends the open run with the smallest upper bound when it
/// starts strictly past it; otherwise it opens a new run. Greedy on
/// pre-sorted input, this yields the minimum run count.
fn pack_runs<K: Key>(files: Vec<DataFileMeta<K>>) -> Result<Vec<SortedRun<K>>, CompactionError> {
    let mut open: BinaryHeap<OpenRun<K>> = BinaryHeap::new();
    for file in files {
        let extends_top = open
            .peek()
            .map_or(false, |top| top.last_max < *file.min_key());
        if extends_top {
            if let Some(mut top) = open.peek_mut() {
                top.last_max = file.max_key().clone();
                top.files.push(file);
            }
        } else {
            open.push(OpenRun {
                last_max: file.max_key().clone(),
                files: vec![file],
            });
        }
    }
    let mut runs: Vec<Vec<DataFileMeta<K>>> = open.into_iter().map(|run| run.files).collect();
    runs.sort_by(|left, right| {
        left[0]
            .min_key()
            .cmp(right[0].min_key())
            .then_with(|| left[0].max_key().cmp(right[0].max_key()))
    });
    runs.into_iter().map(SortedRun::from_sorted).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::generate_file_id;

    fn file(min: u64, max: u64) -> DataFileMeta<u64> {
        DataFileMeta::new(generate_file_id(), min, max, 0, 1024)
    }

    fn ranges(run: &SortedRun<u64>) -> Vec<(u64, u64)> {
        run.files()
            .iter()
            .map(|f| (*f.min_key(), *f.max_key()))
            .collect()
    }

    #[test]
    fn single_file_forms_single_section() {
        let sections = IntervalPartition::new(vec![file(5, 9)])
            .partition()
            .expect("partition");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].len(), 1);
        assert_eq!(ranges(&sections[0][0]), vec![(5, 9)]);
    }

    #[test]
    fn disjoint_files_form_separate_sections() {
        let sections = IntervalPartition::new(vec![file(9, 10), file(1, 2), file(5, 6)])
            .partition()
            .expect("partition");
        assert_eq!(sections.len(), 3);
        assert_eq!(ranges(&sections[0][0]), vec![(1, 2)]);
        assert_eq!(ranges(&sections[1][0]), vec![(5, 6)]);
        assert_eq!(ranges(&sections[2][0]), vec![(9, 10)]);
    }

    #[test]
    fn equal_boundary_keys_overlap() {
        let sections = IntervalPartition::new(vec![file(1, 3), file(3, 5)])
            .partition()
            .expect("partition");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].len(), 2);
    }

    #[test]
    fn chained_overlap_packs_minimal_runs() {
        // (1,3) and (4,6) fit one run; (2,5) bridges them into one
        // section but needs a run of its own.
        let sections = IntervalPartition::new(vec![file(1, 3), file(2, 5), file(4, 6)])
            .partition()
            .expect("partition");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].len(), 2);
        assert_eq!(ranges(&sections[0][0]), vec![(1, 3), (4, 6)]);
        assert_eq!(ranges(&sections[0][1]), vec![(2, 5)]);
    }

    #[test]
    fn pre_existing_run_stays_together() {
        // (1,2) and (4,5) come from one run; the spanning file (1,5)
        // must not break them apart.
        let sections = IntervalPartition::new(vec![file(1, 2), file(4, 5), file(1, 5)])
            .partition()
            .expect("partition");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].len(), 2);
        assert_eq!(ranges(&sections[0][0]), vec![(1, 2), (4, 5)]);
        assert_eq!(ranges(&sections[0][1]), vec![(1, 5)]);
    }

    #[test]
    fn every_input_file_lands_in_exactly_one_run() {
        let files = vec![
            file(1, 3),
            file(2, 5),
            file(4, 6),
            file(8, 9),
            file(9, 12),
            file(20, 21),
        ];
        let sections = IntervalPartition::new(files.clone())
            .partition()
            .expect("partition");
        let mut seen: Vec<crate::meta::FileId> = sections
            .iter()
            .flat_map(|section| section.iter())
            .flat_map(|run| run.files().iter())
            .map(|f| f.file_id())
            .collect();
        seen.sort();
        let mut expected: Vec<crate::meta::FileId> = files.iter().map(|f| f.file_id()).collect();
        expected.sort();
        assert_eq!(seen, expected);
        assert_eq!(sections.len(), 3);
    }

    #[test]
    fn inverted_key_range_is_rejected() {
        let err = IntervalPartition::new(vec![file(9, 3)])
            .partition()
            .expect_err("inverted range");
        assert!(matches!(err, CompactionError::Invariant(_)));
    }
}
