//! YouTube client error types.

use thiserror::Error;

pub type YoutubeResult<T> = Result<T, YoutubeError>;

#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No trending videos found")]
    NoTrendingVideos,

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl YoutubeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}
