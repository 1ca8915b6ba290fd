//! Application state.

use std::sync::Arc;

use tracing::info;
use tubemood_llm::{LlmClient, ModelState};
use tubemood_pipeline::{CommentAnalyzer, JsonChartSink, PipelineConfig};
use tubemood_youtube::YoutubeClient;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub analyzer: CommentAnalyzer,
    /// Process-wide preferred chat model
    pub model_state: Arc<ModelState>,
}

impl AppState {
    /// Build clients from the environment.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let youtube = YoutubeClient::from_env().map_err(|e| ApiError::internal(e.to_string()))?;
        let llm = LlmClient::from_env().map_err(|e| ApiError::internal(e.to_string()))?;
        let pipeline = PipelineConfig::from_env();

        info!(
            model = llm.current_model(),
            max_fetch = pipeline.max_fetch,
            max_sample = pipeline.max_sample,
            max_concurrency = pipeline.max_concurrency,
            "Pipeline configured"
        );

        let model_state = Arc::clone(llm.model_state());
        let llm = Arc::new(llm);
        let analyzer = CommentAnalyzer::new(
            Arc::new(youtube),
            llm.clone(),
            llm,
            Arc::new(JsonChartSink),
            pipeline,
        );

        Ok(Self::from_parts(config, analyzer, model_state))
    }

    /// Assemble state from already built parts.
    pub fn from_parts(
        config: ApiConfig,
        analyzer: CommentAnalyzer,
        model_state: Arc<ModelState>,
    ) -> Self {
        Self {
            config,
            analyzer,
            model_state,
        }
    }
}
