//! Caller-facing analysis report.

use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AggregateStats, Comment, SentimentLabel, SentimentPercentages, VideoId, VideoMeta};

/// Unique identifier for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AnalysisId(pub String);

impl AnalysisId {
    /// Generate a new random analysis ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string (e.g. an inbound request ID).
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of the keyword summarization step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Insight {
    Ready { text: String },
    Failed { error: String },
}

/// Where the chart sinks wrote their data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChartPaths {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_cloud: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pie_chart: Option<String>,
}

/// Everything one analysis produces.
///
/// `comments` and `sentiments` are parallel: `sentiments[i]` is the label of
/// `comments[i]`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisReport {
    pub analysis_id: AnalysisId,

    pub video_id: VideoId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoMeta>,

    /// Number of comments fetched before sampling
    pub fetched_count: usize,

    /// Sampled comments, in sample order
    pub comments: Vec<Comment>,

    pub sentiments: Vec<SentimentLabel>,

    pub stats: AggregateStats,

    pub percentages: SentimentPercentages,

    pub top_keywords: Vec<String>,

    pub insight: Insight,

    pub charts: ChartPaths,

    /// Model preferred at the end of the run
    pub model: String,

    pub analyzed_at: DateTime<Utc>,
}
