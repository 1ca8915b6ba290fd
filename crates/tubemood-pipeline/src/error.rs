//! Pipeline error types.

use thiserror::Error;
use tubemood_llm::LlmError;
use tubemood_models::VideoIdError;
use tubemood_youtube::YoutubeError;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid video: {0}")]
    Validation(#[from] VideoIdError),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("YouTube error: {0}")]
    Youtube(#[from] YoutubeError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Caller supplied something unusable, as opposed to a dependency failing.
    pub fn is_validation(&self) -> bool {
        matches!(self, PipelineError::Validation(_))
    }
}
