//! Fixed selection rules and size budgets.
//!
//! Changing anything here requires regenerating the snapshot.

/// Directory names whose subtrees are never visited, at any depth.
pub const IGNORED_DIRECTORIES: &[&str] = &[
    // VCS / tooling
    ".git",
    ".hg",
    ".svn",
    ".vscode",
    ".idea",
    // dependencies / builds
    "node_modules",
    "build",
    "dist",
    "coverage",
    ".cache",
    ".next",
    "target",
];

/// Text-like extensions eligible for inclusion (compared lowercased).
pub const INCLUDED_EXTENSIONS: &[&str] = &[
    // Scripts
    "js", "jsx", "ts", "tsx", "mjs", "cjs", "rs",
    // Docs
    "md", "txt",
    // Config / markup
    "json", "css", "html", "yml", "yaml", "toml",
];

/// Exact file names that are never included: secrets and lock files.
pub const EXCLUDED_FILE_NAMES: &[&str] = &[
    ".env",
    ".env.local",
    ".env.development",
    ".env.production",
    ".env.test",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Cargo.lock",
];

/// Static assets directory; only [`PUBLIC_ALLOWED_ENTRY`] is taken from it.
pub const PUBLIC_DIRECTORY: &str = "public";
pub const PUBLIC_ALLOWED_ENTRY: &str = "public/index.html";

/// Paths under this directory count as "source" in the summary.
pub const SOURCE_DIRECTORY: &str = "src";

/// Where the snapshot is written, relative to the project root.
pub const OUTPUT_PATH: &str = "public/project-context.json";

pub const MAX_RESOURCES: usize = 200;
pub const MAX_CHARS_PER_FILE: usize = 20_000;
pub const MAX_TOTAL_CHARS: usize = 400_000;

/// Appended to truncated text. Counted inside the per-file cap.
pub const TRUNCATION_MARKER: &str = "\n/* ... truncated to fit the project context budget ... */";

/// Size budgets for one snapshot. Lengths are in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotLimits {
    pub max_resources: usize,
    pub max_chars_per_file: usize,
    pub max_total_chars: usize,
}

impl Default for SnapshotLimits {
    fn default() -> Self {
        Self {
            max_resources: MAX_RESOURCES,
            max_chars_per_file: MAX_CHARS_PER_FILE,
            max_total_chars: MAX_TOTAL_CHARS,
        }
    }
}

impl SnapshotLimits {
    /// Chars a file may still take given `used` chars already spent.
    pub(crate) fn allowance(&self, used: usize) -> usize {
        self.max_chars_per_file
            .min(self.max_total_chars.saturating_sub(used))
    }

    pub(crate) fn exhausted(&self, resources: usize, used: usize) -> bool {
        resources >= self.max_resources || used >= self.max_total_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowance_is_lesser_of_file_and_remaining_budget() {
        let limits = SnapshotLimits {
            max_resources: 10,
            max_chars_per_file: 100,
            max_total_chars: 250,
        };
        assert_eq!(limits.allowance(0), 100);
        assert_eq!(limits.allowance(200), 50);
        assert_eq!(limits.allowance(250), 0);
        assert_eq!(limits.allowance(999), 0);
    }

    #[test]
    fn exhausted_on_either_budget() {
        let limits = SnapshotLimits {
            max_resources: 2,
            max_chars_per_file: 100,
            max_total_chars: 250,
        };
        assert!(!limits.exhausted(1, 249));
        assert!(limits.exhausted(2, 0));
        assert!(limits.exhausted(0, 250));
    }

    #[test]
    fn marker_fits_default_per_file_cap() {
        assert!(TRUNCATION_MARKER.chars().count() < MAX_CHARS_PER_FILE);
    }
}
