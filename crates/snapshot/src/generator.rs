use crate::error::{Result, SnapshotError};
use crate::limits::{SnapshotLimits, TRUNCATION_MARKER};
use crate::scanner::{CandidateFile, FileScanner};
use crate::stats::SnapshotStats;
use crate::summary::summarize;
use chrono::{SecondsFormat, Utc};
use project_context_protocol::paths::normalize_relative_path;
use project_context_protocol::{serialize_json_pretty, ProjectSnapshot, Resource};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Builds snapshots for one project root
pub struct SnapshotGenerator {
    scanner: FileScanner,
    limits: SnapshotLimits,
}

impl SnapshotGenerator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_limits(root, SnapshotLimits::default())
    }

    pub fn with_limits(root: impl AsRef<Path>, limits: SnapshotLimits) -> Self {
        Self {
            scanner: FileScanner::new(root),
            limits,
        }
    }

    pub fn root(&self) -> &Path {
        self.scanner.root()
    }

    /// Scan, read and budget the project into an in-memory snapshot.
    pub fn snapshot(&self) -> Result<(ProjectSnapshot, SnapshotStats)> {
        self.build(None)
    }

    /// Build a fresh snapshot and write it to `output`.
    ///
    /// An output inside the root is never read back as a resource.
    pub fn generate(&self, output: impl AsRef<Path>) -> Result<SnapshotStats> {
        let output = output.as_ref();
        let artifact = self.relative_to_root(output);
        let (snapshot, stats) = self.build(artifact.as_deref())?;
        write_snapshot(&snapshot, output)?;

        log::info!(
            "Snapshot of {} written to {}: {} files, {} truncated, {} binary skipped, {} chars in {} ms",
            self.root().display(),
            output.display(),
            stats.files,
            stats.truncated,
            stats.skipped_binary,
            stats.total_chars,
            stats.time_ms
        );
        Ok(stats)
    }

    fn build(&self, artifact: Option<&str>) -> Result<(ProjectSnapshot, SnapshotStats)> {
        let start = Instant::now();
        let mut candidates = self.scanner.scan()?;
        if let Some(artifact) = artifact {
            candidates.retain(|c| c.relative != artifact);
        }
        let (resources, mut stats) = self.collect(&candidates)?;
        stats.time_ms = start.elapsed().as_millis() as u64;

        let snapshot = ProjectSnapshot {
            generated_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            summary: summarize(&resources),
            resources,
        };
        Ok((snapshot, stats))
    }

    /// `output` as a root-relative POSIX path, if it lives under the root.
    fn relative_to_root(&self, output: &Path) -> Option<String> {
        let relative = match output.strip_prefix(self.root()) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => {
                let root = fs::canonicalize(self.root()).ok()?;
                let parent = fs::canonicalize(output.parent()?).ok()?;
                parent
                    .join(output.file_name()?)
                    .strip_prefix(&root)
                    .ok()?
                    .to_path_buf()
            }
        };
        Some(normalize_relative_path(&relative.to_string_lossy()))
    }

    fn collect(&self, candidates: &[CandidateFile]) -> Result<(Vec<Resource>, SnapshotStats)> {
        let mut resources = Vec::new();
        let mut stats = SnapshotStats::new();

        for (idx, candidate) in candidates.iter().enumerate() {
            if self.limits.exhausted(resources.len(), stats.total_chars) {
                stats.skipped_budget = candidates.len() - idx;
                log::debug!(
                    "Snapshot budget exhausted; {} candidates not read",
                    stats.skipped_budget
                );
                break;
            }

            let bytes = fs::read(&candidate.absolute).map_err(|source| {
                SnapshotError::ReadFailed {
                    path: candidate.absolute.clone(),
                    source,
                }
            })?;
            if bytes.contains(&0) {
                log::debug!("Skipping binary file {}", candidate.relative);
                stats.add_binary();
                continue;
            }

            let content = decode_text(bytes);
            let allowed = self.limits.allowance(stats.total_chars);
            let (text, truncated) = cap_text(&content, allowed);
            if truncated {
                log::debug!("Truncated {} to {allowed} chars", candidate.relative);
            }

            stats.add_file(text.chars().count(), truncated);
            resources.push(Resource::new(candidate.relative.clone(), text, truncated));
        }

        Ok((resources, stats))
    }
}

/// Write `snapshot` as pretty JSON, creating parent directories.
pub fn write_snapshot(snapshot: &ProjectSnapshot, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SnapshotError::WriteFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let raw = serialize_json_pretty(snapshot)?;
    fs::write(output, raw).map_err(|source| SnapshotError::WriteFailed {
        path: PathBuf::from(output),
        source,
    })
}

fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Cap `content` to `allowed` chars, marker included.
///
/// Returns the text to store and whether anything was cut.
fn cap_text(content: &str, allowed: usize) -> (String, bool) {
    if content.chars().count() <= allowed {
        return (content.to_string(), false);
    }

    let marker_len = TRUNCATION_MARKER.chars().count();
    if allowed < marker_len {
        return (char_prefix(content, allowed).to_string(), true);
    }

    let mut text = char_prefix(content, allowed - marker_len).to_string();
    text.push_str(TRUNCATION_MARKER);
    (text, true)
}

fn char_prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn limits(max_resources: usize, per_file: usize, total: usize) -> SnapshotLimits {
        SnapshotLimits {
            max_resources,
            max_chars_per_file: per_file,
            max_total_chars: total,
        }
    }

    fn paths(snapshot: &ProjectSnapshot) -> Vec<&str> {
        snapshot.resources.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn cap_text_keeps_short_content() {
        assert_eq!(cap_text("hello", 5), ("hello".to_string(), false));
    }

    #[test]
    fn cap_text_counts_marker_inside_allowance() {
        let content = "x".repeat(500);
        let (text, truncated) = cap_text(&content, 200);
        assert!(truncated);
        assert_eq!(text.chars().count(), 200);
        assert!(text.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn cap_text_without_room_for_marker_hard_cuts() {
        let (text, truncated) = cap_text("abcdefghij", 4);
        assert!(truncated);
        assert_eq!(text, "abcd");
    }

    #[test]
    fn cap_text_keeps_marker_when_it_exactly_fits() {
        let marker_len = TRUNCATION_MARKER.chars().count();
        let content = "y".repeat(marker_len * 2);
        let (text, truncated) = cap_text(&content, marker_len);
        assert!(truncated);
        assert_eq!(text, TRUNCATION_MARKER);
    }

    #[test]
    fn cap_text_respects_char_boundaries() {
        let content = "ж".repeat(300);
        let (text, truncated) = cap_text(&content, 100);
        assert!(truncated);
        assert_eq!(text.chars().count(), 100);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let text = decode_text(vec![b'o', b'k', 0xff]);
        assert_eq!(text, "ok\u{fffd}");
    }

    #[test]
    fn concrete_project_yields_sorted_resources_and_summary() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src").join("App.js"), "a".repeat(500)).unwrap();
        fs::write(root.join("README.md"), "r".repeat(50)).unwrap();
        fs::create_dir_all(root.join("node_modules").join("x")).unwrap();
        fs::write(
            root.join("node_modules").join("x").join("index.js"),
            "module.exports = {};",
        )
        .unwrap();

        let (snapshot, stats) = SnapshotGenerator::new(root).snapshot().unwrap();

        assert_eq!(paths(&snapshot), vec!["README.md", "src/App.js"]);
        assert!(snapshot.summary.contains("1 source, 1 config/docs"));
        assert_eq!(stats.files, 2);
        assert_eq!(stats.total_chars, 550);
        assert!(snapshot.resources.iter().all(|r| !r.truncated));
        assert_eq!(snapshot.resources[1].uri, "file:///src/App.js");
        assert_eq!(snapshot.resources[1].name, "App.js");
        assert!(snapshot.generated_at.is_some());
    }

    #[test]
    fn binary_files_are_skipped_without_spending_budget() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::write(root.join("a.txt"), b"abc\0def").unwrap();
        fs::write(root.join("b.txt"), b"plain").unwrap();

        let generator = SnapshotGenerator::with_limits(root, limits(1, 100, 100));
        let (snapshot, stats) = generator.snapshot().unwrap();

        assert_eq!(paths(&snapshot), vec!["b.txt"]);
        assert_eq!(stats.skipped_binary, 1);
        assert_eq!(stats.total_chars, 5);
    }

    #[test]
    fn stops_once_resource_count_is_reached() {
        let temp = tempdir().unwrap();
        for name in ["a.md", "b.md", "c.md"] {
            fs::write(temp.path().join(name), name).unwrap();
        }

        let generator = SnapshotGenerator::with_limits(temp.path(), limits(2, 100, 1000));
        let (snapshot, stats) = generator.snapshot().unwrap();

        assert_eq!(paths(&snapshot), vec!["a.md", "b.md"]);
        assert_eq!(stats.skipped_budget, 1);
    }

    #[test]
    fn total_budget_truncates_then_stops() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.md"), "a".repeat(100)).unwrap();
        fs::write(temp.path().join("b.md"), "b".repeat(100)).unwrap();
        fs::write(temp.path().join("c.md"), "c").unwrap();

        let generator = SnapshotGenerator::with_limits(temp.path(), limits(10, 100, 170));
        let (snapshot, stats) = generator.snapshot().unwrap();

        assert_eq!(paths(&snapshot), vec!["a.md", "b.md"]);
        assert!(!snapshot.resources[0].truncated);
        assert!(snapshot.resources[1].truncated);
        assert_eq!(snapshot.resources[1].text.chars().count(), 70);
        assert_eq!(snapshot.total_chars(), 170);
        assert_eq!(stats.truncated, 1);
        assert_eq!(stats.skipped_budget, 1);
    }

    #[test]
    fn per_file_cap_applies_to_every_resource() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("big.txt"), "z".repeat(5_000)).unwrap();
        fs::write(temp.path().join("small.txt"), "ok").unwrap();

        let generator = SnapshotGenerator::with_limits(temp.path(), limits(10, 1_000, 100_000));
        let (snapshot, _) = generator.snapshot().unwrap();

        for resource in &snapshot.resources {
            assert!(resource.text.chars().count() <= 1_000);
        }
        assert!(snapshot.resources[0].truncated);
        assert!(!snapshot.resources[1].truncated);
    }

    #[test]
    fn repeated_runs_produce_identical_resources() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src").join("index.js"), "render();").unwrap();
        fs::write(temp.path().join("package.json"), "{}").unwrap();

        let generator = SnapshotGenerator::new(temp.path());
        let (first, _) = generator.snapshot().unwrap();
        let (second, _) = generator.snapshot().unwrap();

        assert_eq!(
            serde_json::to_string(&first.resources).unwrap(),
            serde_json::to_string(&second.resources).unwrap()
        );
    }

    #[test]
    fn generate_writes_pretty_json_and_creates_parents() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("README.md"), "# hello").unwrap();
        let output = temp.path().join("public").join("project-context.json");

        let stats = SnapshotGenerator::new(temp.path())
            .generate(&output)
            .unwrap();
        assert_eq!(stats.files, 1);

        let raw = fs::read_to_string(&output).unwrap();
        assert!(raw.starts_with("{\n  \"generatedAt\""));
        assert!(raw.ends_with("}\n"));
        let parsed: ProjectSnapshot = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.resources[0].text, "# hello");

        // The artifact itself lives in public/ and is never picked up again.
        let (again, _) = SnapshotGenerator::new(temp.path()).snapshot().unwrap();
        assert_eq!(paths(&again), vec!["README.md"]);
    }

    #[test]
    fn output_inside_root_is_not_snapshotted_on_rerun() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("README.md"), "# hello").unwrap();
        let output = temp.path().join("docs").join("context.json");
        let generator = SnapshotGenerator::new(temp.path());

        let first = generator.generate(&output).unwrap();
        let first_raw = fs::read_to_string(&output).unwrap();
        let second = generator.generate(&output).unwrap();
        let second_raw = fs::read_to_string(&output).unwrap();

        assert_eq!(first.files, 1);
        assert_eq!(second.files, 1);
        let first: ProjectSnapshot = serde_json::from_str(&first_raw).unwrap();
        let second: ProjectSnapshot = serde_json::from_str(&second_raw).unwrap();
        assert_eq!(paths(&first), vec!["README.md"]);
        assert_eq!(paths(&second), vec!["README.md"]);
    }

    #[test]
    fn other_json_under_root_is_still_included() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("docs").join("notes.json"), "{}").unwrap();
        let output = temp.path().join("docs").join("context.json");

        SnapshotGenerator::new(temp.path()).generate(&output).unwrap();
        SnapshotGenerator::new(temp.path()).generate(&output).unwrap();

        let raw = fs::read_to_string(&output).unwrap();
        let parsed: ProjectSnapshot = serde_json::from_str(&raw).unwrap();
        assert_eq!(paths(&parsed), vec!["docs/notes.json"]);
    }
}
