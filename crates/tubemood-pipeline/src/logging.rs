//! Structured logging for analysis runs.

use tracing::{error, info, warn, Span};
use tubemood_models::AnalysisId;

/// Logs lifecycle events of one analysis with its ID and video attached.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    analysis_id: String,
    video_id: String,
}

impl RequestLogger {
    pub fn new(analysis_id: &AnalysisId, video_id: &str) -> Self {
        Self {
            analysis_id: analysis_id.to_string(),
            video_id: video_id.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            analysis_id = %self.analysis_id,
            video_id = %self.video_id,
            "Analysis started: {}", message
        );
    }

    pub fn log_progress(&self, message: &str) {
        info!(
            analysis_id = %self.analysis_id,
            video_id = %self.video_id,
            "Analysis progress: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            analysis_id = %self.analysis_id,
            video_id = %self.video_id,
            "Analysis warning: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            analysis_id = %self.analysis_id,
            video_id = %self.video_id,
            "Analysis error: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            analysis_id = %self.analysis_id,
            video_id = %self.video_id,
            "Analysis completed: {}", message
        );
    }

    pub fn analysis_id(&self) -> &str {
        &self.analysis_id
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    /// Span carrying the analysis and video IDs.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "analysis",
            analysis_id = %self.analysis_id,
            video_id = %self.video_id
        )
    }
}
