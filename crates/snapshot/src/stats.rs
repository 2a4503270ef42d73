use serde::{Deserialize, Serialize};

/// Statistics about one snapshot run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotStats {
    /// Number of files included
    pub files: usize,

    /// Included files whose text was capped
    pub truncated: usize,

    /// Candidates dropped because they contain a NUL byte
    pub skipped_binary: usize,

    /// Candidates never read because a budget ran out
    pub skipped_budget: usize,

    /// Sum of included text lengths, in chars
    pub total_chars: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl SnapshotStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, chars: usize, truncated: bool) {
        self.files += 1;
        self.total_chars += chars;
        if truncated {
            self.truncated += 1;
        }
    }

    pub fn add_binary(&mut self) {
        self.skipped_binary += 1;
    }
}
