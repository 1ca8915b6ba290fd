//! Comment analysis handler.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::info;

use tubemood_models::{AnalysisId, AnalysisReport};
use tubemood_pipeline::VideoSelector;

use crate::error::{ApiError, ApiResult};
use crate::middleware::RequestId;
use crate::state::AppState;

/// Body of `POST /api/analyze`.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    /// Video URL or bare ID
    #[serde(default)]
    pub video: Option<String>,
    /// Pick a trending video instead
    #[serde(default)]
    pub random: bool,
}

impl AnalyzeRequest {
    /// `random` wins when both are given.
    pub fn selector(self) -> ApiResult<VideoSelector> {
        if self.random {
            return Ok(VideoSelector::RandomTrending);
        }
        match self.video {
            Some(video) => Ok(VideoSelector::Explicit(video)),
            None => Err(ApiError::bad_request(
                "Provide a video URL or ID, or set \"random\": true",
            )),
        }
    }
}

/// Run the comment pipeline for one video.
pub async fn analyze(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalysisReport>> {
    let selector = request.selector()?;
    let analysis_id = request_id
        .map(|Extension(RequestId(id))| AnalysisId::from_string(id))
        .unwrap_or_default();

    info!(analysis_id = %analysis_id, selector = ?selector, "Analysis requested");

    let report = state.analyzer.analyze(selector, analysis_id).await?;
    Ok(Json(report))
}
