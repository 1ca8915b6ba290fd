//! Shared data models for TubeMood.
//!
//! This crate provides Serde-serializable types for:
//! - Video identifiers and URL parsing
//! - Comments and video metadata
//! - Sentiment labels, per-comment results and aggregate statistics
//! - The caller-facing analysis report

pub mod comment;
pub mod report;
pub mod sentiment;
pub mod video_id;

// Re-export common types
pub use comment::{Comment, VideoMeta};
pub use report::{AnalysisId, AnalysisReport, ChartPaths, Insight};
pub use sentiment::{
    AggregateStats, Classification, ClassificationResult, SentimentLabel, SentimentPercentages,
};
pub use video_id::{extract_youtube_id, VideoId, VideoIdError, VideoIdResult};
