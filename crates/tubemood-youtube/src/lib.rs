//! YouTube Data API client.
//!
//! Provides paginated comment-thread ingestion with a hard cap, trending
//! video selection and best-effort video metadata lookup.

pub mod client;
pub mod error;
pub mod types;

pub use client::{YoutubeClient, YoutubeConfig, DEFAULT_MAX_FETCH};
pub use error::{YoutubeError, YoutubeResult};
