//! LLM client error types.

use thiserror::Error;

pub type LlmResult<T> = Result<T, LlmError>;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Failures that warrant switching to the fallback model.
    ///
    /// Only a request that never produced a response counts. Error statuses
    /// and undecodable bodies leave the model state alone.
    pub fn is_transport(&self) -> bool {
        matches!(self, LlmError::Network(_))
    }
}
