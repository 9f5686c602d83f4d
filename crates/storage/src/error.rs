#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("data directory not available")]
    DataDirUnavailable,
    #[error("invalid job id: {0:?}")]
    InvalidJobId(String),
    #[error("transcript file belongs to job {found:?}, expected {expected:?}")]
    JobMismatch { expected: String, found: String },
}
