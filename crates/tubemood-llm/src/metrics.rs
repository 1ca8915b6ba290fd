//! Chat-completion metrics.

use metrics::counter;

/// Metric name constants for consistency.
pub mod names {
    /// Chat-completion calls by model slot and outcome.
    pub const REQUESTS_TOTAL: &str = "tubemood_llm_requests_total";

    /// Times the process switched from the primary to the fallback model.
    pub const MODEL_FALLBACKS_TOTAL: &str = "tubemood_llm_model_fallbacks_total";
}

/// Record one chat-completion call.
pub fn record_request(model: &str, success: bool) {
    let status = if success { "ok" } else { "error" };
    counter!(
        names::REQUESTS_TOTAL,
        "model" => model.to_string(),
        "status" => status
    )
    .increment(1);
}

/// Record the primary-to-fallback switch.
pub fn record_model_fallback() {
    counter!(names::MODEL_FALLBACKS_TOTAL).increment(1);
}
