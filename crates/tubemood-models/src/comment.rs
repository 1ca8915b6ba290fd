//! Comment and video metadata models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A top-level public comment on a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Comment {
    /// Display name of the comment author
    pub author: String,

    /// Comment body as displayed by YouTube
    pub text: String,
}

impl Comment {
    /// Create a new comment.
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }
}

/// Video metadata shown alongside an analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VideoMeta {
    /// Video title
    pub title: String,

    /// Channel display name
    pub channel: String,

    /// Best available thumbnail URL (may be empty)
    pub thumbnail: String,
}
