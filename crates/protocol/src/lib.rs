//! Data model shared by the snapshot generator and the resource shim.
//!
//! The generator writes a [`ProjectSnapshot`] as JSON; the shim reads it back
//! and answers listing and lookup queries with [`ResourceListing`] and
//! [`ResourceContents`].

use serde::{Deserialize, Serialize};

pub mod paths;

/// URI scheme prefix used for every resource.
pub const RESOURCE_URI_PREFIX: &str = "file:///";

/// MIME type used when an extension is not in [`mime_type_for_path`]'s table.
pub const DEFAULT_MIME_TYPE: &str = "text/plain";

/// Summary reported when no snapshot could be loaded.
pub const FALLBACK_SUMMARY: &str = "No local project context is available.";

/// File name of the generated artifact, relative to the served base path.
pub const SNAPSHOT_FILE_NAME: &str = "project-context.json";

/// One included file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub uri: String,
    pub path: String,
    pub name: String,
    pub mime_type: String,
    pub text: String,
    pub truncated: bool,
}

impl Resource {
    /// Build a resource for a normalized relative path.
    pub fn new(path: impl Into<String>, text: String, truncated: bool) -> Self {
        let path = path.into();
        Self {
            uri: resource_uri(&path),
            name: paths::file_name(&path).to_string(),
            mime_type: mime_type_for_path(&path).to_string(),
            path,
            text,
            truncated,
        }
    }

    pub fn listing(&self) -> ResourceListing {
        ResourceListing {
            uri: self.uri.clone(),
            name: self.name.clone(),
            description: format!("Project file {}", self.path),
            mime_type: self.mime_type.clone(),
        }
    }

    /// Case-insensitive substring match on `uri`, `path` or `name`.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        [&self.uri, &self.path, &self.name]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// The generated artifact.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub generated_at: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl ProjectSnapshot {
    /// Empty context served when the artifact cannot be loaded.
    pub fn fallback() -> Self {
        Self {
            generated_at: None,
            summary: FALLBACK_SUMMARY.to_string(),
            resources: Vec::new(),
        }
    }

    pub fn total_chars(&self) -> usize {
        self.resources.iter().map(|r| r.text.chars().count()).sum()
    }

    pub fn find(&self, uri: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.uri == uri)
    }
}

/// Listing entry; never carries file contents.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceListing {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

/// Single-item envelope returned by resource lookups.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResourceContents {
    pub contents: Vec<ResourceContent>,
}

impl ResourceContents {
    pub fn found(resource: &Resource) -> Self {
        Self {
            contents: vec![ResourceContent {
                uri: resource.uri.clone(),
                mime_type: resource.mime_type.clone(),
                text: resource.text.clone(),
            }],
        }
    }

    pub fn not_found(uri: &str) -> Self {
        Self {
            contents: vec![ResourceContent {
                uri: uri.to_string(),
                mime_type: DEFAULT_MIME_TYPE.to_string(),
                text: format!("Resource not found in local project context: {uri}"),
            }],
        }
    }

    /// Text of the single content item.
    pub fn text(&self) -> &str {
        self.contents
            .first()
            .map(|c| c.text.as_str())
            .unwrap_or_default()
    }
}

pub fn resource_uri(path: &str) -> String {
    format!("{RESOURCE_URI_PREFIX}{path}")
}

pub fn mime_type_for_path(path: &str) -> &'static str {
    let Some(ext) = paths::extension(path) else {
        return DEFAULT_MIME_TYPE;
    };
    match ext.as_str() {
        "js" | "jsx" | "mjs" | "cjs" => "text/javascript",
        "ts" | "tsx" => "text/typescript",
        "json" => "application/json",
        "md" => "text/markdown",
        "css" => "text/css",
        "html" => "text/html",
        "yml" | "yaml" => "text/yaml",
        "rs" => "text/x-rust",
        "toml" => "application/toml",
        _ => DEFAULT_MIME_TYPE,
    }
}

/// Pretty JSON with a trailing newline, as written to disk.
pub fn serialize_json_pretty<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut raw = serde_json::to_string_pretty(value)?;
    raw.push('\n');
    Ok(raw)
}
