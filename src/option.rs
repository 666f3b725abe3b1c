use crate::error::CompactionError;

/// Tuning knobs for merge-tree compaction tasks.
#[derive(Debug, Clone)]
pub struct CompactOptions {
    pub(crate) min_file_size: u64,
}

impl Default for CompactOptions {
    fn default() -> Self {
        CompactOptions {
            min_file_size: 16 * 1024 * 1024,
        }
    }
}

impl CompactOptions {
    /// Files smaller than this (in bytes) are merged along with their
    /// neighbors instead of being upgraded in place; merging them is
    /// cheap and avoids file-count bloat.
    pub fn min_file_size(self, min_file_size: u64) -> Self {
        CompactOptions { min_file_size }
    }

    pub(crate) fn validate(&self) -> Result<(), CompactionError> {
        if self.min_file_size == 0 {
            return Err(CompactionError::Config(
                "min_file_size must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_min_file_size_is_rejected() {
        let err = CompactOptions::default()
            .min_file_size(0)
            .validate()
            .expect_err("zero threshold");
        assert!(matches!(err, CompactionError::Config(_)));
    }

    #[test]
    fn default_passes_validation() {
        CompactOptions::default().validate().expect("default");
    }
}
