//! Chat-completion client for the sentiment pipeline.
//!
//! Wraps an OpenAI-compatible `/chat/completions` endpoint with the two
//! prompts the pipeline needs: one-word sentiment classification of a comment
//! and a short summary of the top keywords. Both share a process-wide
//! [`ModelState`] that downgrades to the fallback model on the first
//! transport failure and never goes back.

pub mod client;
pub mod error;
pub mod label;
pub mod metrics;
pub mod model;
pub mod types;

pub use client::{LlmClient, LlmConfig, NO_KEYWORDS_MESSAGE};
pub use error::{LlmError, LlmResult};
pub use label::{parse_label, CANNOT_CLASSIFY};
pub use model::{ChatModel, ModelState};
