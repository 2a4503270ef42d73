use crate::error::{Result, SnapshotError};
use crate::limits::{
    EXCLUDED_FILE_NAMES, IGNORED_DIRECTORIES, INCLUDED_EXTENSIONS, PUBLIC_ALLOWED_ENTRY,
    PUBLIC_DIRECTORY,
};
use ignore::{DirEntry, WalkBuilder};
use project_context_protocol::paths::{self, normalize_relative_path, path_prefix_matches};
use std::path::{Path, PathBuf};

/// A file selected for the snapshot, before its contents are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Location on disk.
    pub absolute: PathBuf,
    /// POSIX-style path relative to the project root.
    pub relative: String,
}

/// Scanner for finding eligible text files in a project
pub struct FileScanner {
    root: PathBuf,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the project and return eligible files sorted by relative path.
    ///
    /// Selection depends only on the fixed rules in [`crate::limits`]:
    /// `.gitignore` files and hidden-file conventions are not consulted.
    pub fn scan(&self) -> Result<Vec<CandidateFile>> {
        if !self.root.is_dir() {
            return Err(SnapshotError::InvalidPath(self.root.display().to_string()));
        }

        let mut files = Vec::new();

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .ignore(false)
            .parents(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .require_git(false)
            .follow_links(false);
        builder.filter_entry(|entry| !FileScanner::is_ignored_directory(entry));

        for result in builder.build() {
            let entry = result?;
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(&self.root).map_err(|_| {
                SnapshotError::InvalidPath(entry.path().display().to_string())
            })?;
            let relative = normalize_relative_path(&relative.to_string_lossy());

            if !Self::is_eligible(&relative) {
                log::debug!("Skipping ineligible file {relative}");
                continue;
            }

            files.push(CandidateFile {
                absolute: entry.path().to_path_buf(),
                relative,
            });
        }

        files.sort_by(|a, b| a.relative.cmp(&b.relative));
        log::info!("Found {} candidate files", files.len());
        Ok(files)
    }

    /// Whether a normalized relative path passes the extension, file name and
    /// public-directory rules.
    pub fn is_eligible(relative: &str) -> bool {
        if relative.is_empty() {
            return false;
        }

        if path_prefix_matches(PUBLIC_DIRECTORY, relative) && relative != PUBLIC_ALLOWED_ENTRY {
            return false;
        }

        let name = paths::file_name(relative);
        if EXCLUDED_FILE_NAMES.iter().any(|excluded| *excluded == name) {
            return false;
        }

        paths::extension(relative)
            .is_some_and(|ext| INCLUDED_EXTENSIONS.iter().any(|included| *included == ext))
    }

    fn is_ignored_directory(entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        if !is_dir {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        IGNORED_DIRECTORIES.iter().any(|ignored| *ignored == name)
    }
}
