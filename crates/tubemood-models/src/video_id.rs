//! YouTube video identifier parsing and validation.
//!
//! Accepts either a bare 11-character video ID or any of the common YouTube
//! URL shapes, and yields a validated [`VideoId`].

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of every YouTube video ID.
pub const VIDEO_ID_LEN: usize = 11;

/// Errors that can occur while resolving a video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoIdError {
    /// Input was blank
    #[error("No video URL or ID was provided")]
    Empty,
    /// URL is not a YouTube URL
    #[error("URL is not a valid YouTube URL")]
    InvalidYoutubeUrl,
    /// Video ID has invalid format
    #[error("Video ID has invalid format")]
    InvalidVideoId,
    /// Video ID not found in URL
    #[error("Video ID not found in URL")]
    VideoIdNotFound,
}

/// Result type for video ID resolution.
pub type VideoIdResult<T> = Result<T, VideoIdError>;

/// A validated 11-character YouTube video ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Resolve user input (bare ID or URL) into a video ID.
    pub fn parse(input: &str) -> VideoIdResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(VideoIdError::Empty);
        }

        // A bare ID is taken as-is once its characters check out
        if input.len() == VIDEO_ID_LEN && !input.contains('/') {
            return validate_youtube_id(input.to_string()).map(Self);
        }

        extract_youtube_id(input).map(Self)
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for VideoId {
    type Err = VideoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Extract a YouTube video ID from a URL.
///
/// Supports:
/// - https://youtube.com/watch?v=VIDEO_ID
/// - https://youtu.be/VIDEO_ID
/// - https://youtube.com/embed/VIDEO_ID
/// - https://youtube.com/v/VIDEO_ID
/// - https://youtube.com/shorts/VIDEO_ID
/// - With or without query parameters, fragments, etc.
pub fn extract_youtube_id(url: &str) -> VideoIdResult<String> {
    let url = url.trim();

    if !is_youtube_domain(url) {
        return Err(VideoIdError::InvalidYoutubeUrl);
    }

    let strategies: [fn(&str) -> Option<String>; 5] = [
        extract_from_watch_url,
        extract_from_short_url,
        extract_from_embed_url,
        extract_from_v_url,
        extract_from_shorts_url,
    ];

    for strategy in strategies {
        if let Some(id) = strategy(url) {
            return validate_youtube_id(id);
        }
    }

    Err(VideoIdError::VideoIdNotFound)
}

fn is_youtube_domain(url: &str) -> bool {
    let url = url.to_ascii_lowercase();
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Byte offset just past a lowercase `marker`, matched case-insensitively.
///
/// ASCII lowercasing keeps byte offsets, so the result indexes `url` itself.
fn find_marker_end(url: &str, marker: &str) -> Option<usize> {
    url.to_ascii_lowercase()
        .find(marker)
        .map(|pos| pos + marker.len())
}

fn extract_from_watch_url(url: &str) -> Option<String> {
    ["?v=", "&v="]
        .iter()
        .find_map(|marker| find_marker_end(url, marker))
        .and_then(|start| extract_id_from_segment(&url[start..]))
}

fn extract_after(url: &str, marker: &str) -> Option<String> {
    let start = find_marker_end(url, marker)?;
    if start < url.len() {
        extract_id_from_segment(&url[start..])
    } else {
        None
    }
}

fn extract_from_short_url(url: &str) -> Option<String> {
    extract_after(url, "youtu.be/")
}

fn extract_from_embed_url(url: &str) -> Option<String> {
    extract_after(url, "/embed/")
}

fn extract_from_v_url(url: &str) -> Option<String> {
    extract_after(url, "/v/")
}

fn extract_from_shorts_url(url: &str) -> Option<String> {
    extract_after(url, "/shorts/")
}

/// First ID-shaped segment up to the next URL delimiter.
fn extract_id_from_segment(segment: &str) -> Option<String> {
    let delimiters = ['&', '#', '?', '/'];
    let end = segment
        .find(|c| delimiters.contains(&c))
        .unwrap_or(segment.len());
    Some(segment[..end].trim().to_string())
}

fn is_valid_youtube_id_chars(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn validate_youtube_id(id: String) -> VideoIdResult<String> {
    if id.len() != VIDEO_ID_LEN || !is_valid_youtube_id_chars(&id) {
        return Err(VideoIdError::InvalidVideoId);
    }
    Ok(id)
}
