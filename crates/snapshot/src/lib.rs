//! # Project Context Snapshot
//!
//! Build-time generator for the JSON context file served to the assistant.
//!
//! ## Pipeline
//!
//! ```text
//! Project root
//!     │
//!     ├──> File Scanner (fixed ignore/allow rules)
//!     │      └─> Sorted candidate files
//!     │
//!     ├──> Budgeting (binary skip, per-file + total caps)
//!     │      └─> Resources
//!     │
//!     └──> Writer (pretty JSON)
//!            └─> public/project-context.json
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use project_context_snapshot::{SnapshotGenerator, OUTPUT_PATH};
//!
//! fn main() -> project_context_snapshot::Result<()> {
//!     let generator = SnapshotGenerator::new(".");
//!     let stats = generator.generate(OUTPUT_PATH)?;
//!
//!     println!("Wrote {} files", stats.files);
//!     Ok(())
//! }
//! ```

mod error;
mod generator;
mod limits;
mod scanner;
mod stats;
mod summary;

pub use error::{Result, SnapshotError};
pub use generator::{write_snapshot, SnapshotGenerator};
pub use limits::{
    SnapshotLimits, EXCLUDED_FILE_NAMES, IGNORED_DIRECTORIES, INCLUDED_EXTENSIONS,
    MAX_CHARS_PER_FILE, MAX_RESOURCES, MAX_TOTAL_CHARS, OUTPUT_PATH, PUBLIC_ALLOWED_ENTRY,
    PUBLIC_DIRECTORY, SOURCE_DIRECTORY, TRUNCATION_MARKER,
};
pub use scanner::{CandidateFile, FileScanner};
pub use stats::SnapshotStats;
pub use summary::summarize;
