//! Pipeline configuration.

use std::path::PathBuf;

/// Pipeline limits and output locations.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum comments fetched per video
    pub max_fetch: usize,
    /// Maximum comments sent for classification
    pub max_sample: usize,
    /// Classification calls in flight per analysis
    pub max_concurrency: usize,
    /// Keywords handed to the summarizer
    pub top_keywords: usize,
    /// Directory chart data is written to
    pub chart_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_fetch: 300,
            max_sample: 100,
            max_concurrency: 5,
            top_keywords: 5,
            chart_dir: PathBuf::from("web/static"),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_fetch: env_or("PIPELINE_MAX_FETCH", defaults.max_fetch),
            max_sample: env_or("PIPELINE_MAX_SAMPLE", defaults.max_sample),
            max_concurrency: env_or("PIPELINE_MAX_CONCURRENCY", defaults.max_concurrency).max(1),
            top_keywords: env_or("PIPELINE_TOP_KEYWORDS", defaults.top_keywords),
            chart_dir: std::env::var("PIPELINE_CHART_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.chart_dir),
        }
    }
}

fn env_or(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_fetch, 300);
        assert_eq!(config.max_sample, 100);
        assert_eq!(config.max_concurrency, 5);
        assert_eq!(config.top_keywords, 5);
        assert_eq!(config.chart_dir, PathBuf::from("web/static"));
    }
}
