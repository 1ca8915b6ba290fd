//! Comment sentiment aggregation pipeline.
//!
//! Fetches a capped set of comments, samples them, classifies each sample
//! with bounded concurrency, and aggregates labels and keywords into an
//! [`AnalysisReport`](tubemood_models::AnalysisReport).

pub mod aggregate;
pub mod analyzer;
pub mod charts;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod keywords;
pub mod logging;
pub mod metrics;
pub mod sampler;
pub mod traits;

pub use aggregate::aggregate;
pub use analyzer::{CommentAnalyzer, VideoSelector};
pub use charts::{ChartSink, JsonChartSink, PIE_CHART_FILE, WORD_CLOUD_FILE};
pub use config::PipelineConfig;
pub use coordinator::classify_all;
pub use error::{PipelineError, PipelineResult};
pub use keywords::{extract, top_n, WordFrequency};
pub use logging::RequestLogger;
pub use sampler::{sample, sample_with_rng};
pub use traits::{CommentSource, InsightSummarizer, SentimentClassifier};
