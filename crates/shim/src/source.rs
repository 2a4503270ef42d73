use crate::error::{Result, ShimError};
use async_trait::async_trait;
use project_context_protocol::ProjectSnapshot;
use std::path::{Path, PathBuf};

/// Where a snapshot comes from.
#[async_trait]
pub trait ContextSource: Send + Sync {
    async fn fetch(&self) -> Result<ProjectSnapshot>;

    /// Short label for log lines.
    fn describe(&self) -> String;
}

/// Fetches the served artifact with a plain HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpContextSource {
    client: reqwest::Client,
    url: String,
}

impl HttpContextSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ContextSource for HttpContextSource {
    async fn fetch(&self) -> Result<ProjectSnapshot> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ShimError::UnexpectedStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the artifact straight from disk.
#[derive(Debug, Clone)]
pub struct FileContextSource {
    path: PathBuf,
}

impl FileContextSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ContextSource for FileContextSource {
    async fn fetch(&self) -> Result<ProjectSnapshot> {
        let raw = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Source selected from runtime configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Http(HttpContextSource),
    File(FileContextSource),
}

#[async_trait]
impl ContextSource for ConfiguredSource {
    async fn fetch(&self) -> Result<ProjectSnapshot> {
        match self {
            Self::Http(source) => source.fetch().await,
            Self::File(source) => source.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Http(source) => source.describe(),
            Self::File(source) => source.describe(),
        }
    }
}
