use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ChronosError {
    #[error("config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid duration format: {0}")]
    InvalidDuration(String),

    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChronosError>;
