use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitalyzerError>;

#[derive(Error, Debug)]
pub enum GitalyzerError {
    #[error("Error opening repository at {}: {source}", .path.display())]
    OpenRepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
    #[error("Commit timestamp {seconds} is out of range")]
    InvalidTimestamp { seconds: i64 },
    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
