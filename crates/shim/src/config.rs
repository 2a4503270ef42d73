use crate::source::{ConfiguredSource, FileContextSource, HttpContextSource};
use project_context_protocol::SNAPSHOT_FILE_NAME;
use std::path::PathBuf;

pub const ENV_BASE_PATH: &str = "PROJECT_CONTEXT_BASE_PATH";
pub const ENV_ORIGIN: &str = "PROJECT_CONTEXT_URL";
pub const ENV_FILE: &str = "PROJECT_CONTEXT_FILE";
pub const ENV_API_KEY: &str = "ASSISTANT_API_KEY";

pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

pub const MISSING_API_KEY_WARNING: &str =
    "assistant API key is not configured; chat is unavailable";

/// Runtime settings for the shim, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimConfig {
    /// Routing base path the artifact is served under, always `/`-delimited.
    pub base_path: String,
    /// Origin of the page serving the artifact.
    pub origin: String,
    /// Read the artifact from disk instead of over HTTP.
    pub file: Option<PathBuf>,
    pub api_key: Option<String>,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            file: None,
            api_key: None,
        }
    }
}

impl ShimConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        Self {
            base_path: get(ENV_BASE_PATH)
                .map(|v| normalize_base_path(&v))
                .unwrap_or(defaults.base_path),
            origin: get(ENV_ORIGIN)
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.origin),
            file: get(ENV_FILE).map(PathBuf::from),
            api_key: get(ENV_API_KEY),
        }
    }

    /// Absolute URL of the served artifact.
    pub fn snapshot_url(&self) -> String {
        format!("{}{}{SNAPSHOT_FILE_NAME}", self.origin, self.base_path)
    }

    pub fn source(&self) -> ConfiguredSource {
        match &self.file {
            Some(path) => ConfiguredSource::File(FileContextSource::new(path)),
            None => ConfiguredSource::Http(HttpContextSource::new(self.snapshot_url())),
        }
    }

    /// Problems worth surfacing to the user. None of them block lookups.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.api_key.is_none() {
            warnings.push(MISSING_API_KEY_WARNING.to_string());
        }
        warnings
    }
}

fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    format!("/{trimmed}/")
}
