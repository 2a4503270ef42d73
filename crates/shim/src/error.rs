use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShimError>;

#[derive(Error, Debug)]
pub enum ShimError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status} fetching {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] serde_json::Error),
}
