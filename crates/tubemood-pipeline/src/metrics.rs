//! Pipeline metrics.
//!
//! Counters for ingestion, classification outcomes and summarization.

use metrics::counter;
use tubemood_models::SentimentLabel;

/// Metric name constants for consistency.
pub mod names {
    /// Comments returned by the comment source.
    pub const COMMENTS_FETCHED_TOTAL: &str = "tubemood_comments_fetched_total";

    /// Classification results by label.
    pub const CLASSIFICATIONS_TOTAL: &str = "tubemood_classifications_total";

    /// Summaries that could not be produced.
    pub const SUMMARIZATION_FAILURES_TOTAL: &str = "tubemood_summarization_failures_total";

    /// Finished analyses by outcome.
    pub const ANALYSES_TOTAL: &str = "tubemood_analyses_total";
}

pub fn record_comments_fetched(count: usize) {
    counter!(names::COMMENTS_FETCHED_TOTAL).increment(count as u64);
}

pub fn record_classification(label: SentimentLabel) {
    counter!(names::CLASSIFICATIONS_TOTAL, "label" => label.as_str()).increment(1);
}

pub fn record_summarization_failure() {
    counter!(names::SUMMARIZATION_FAILURES_TOTAL).increment(1);
}

pub fn record_analysis(status: &'static str) {
    counter!(names::ANALYSES_TOTAL, "status" => status).increment(1);
}
