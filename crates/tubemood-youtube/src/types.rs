//! YouTube Data API v3 response types.
//!
//! Only the fields the pipeline reads are modelled; everything else in the
//! payload is ignored.

use serde::Deserialize;
use tubemood_models::{Comment, VideoMeta};

/// `GET /commentThreads` page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl CommentThreadListResponse {
    /// Cursor for the next page; an empty token means there is none.
    pub fn next_page(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    #[serde(default)]
    pub author_display_name: String,
    #[serde(default)]
    pub text_display: String,
}

impl From<CommentThread> for Comment {
    fn from(thread: CommentThread) -> Self {
        let snippet = thread.snippet.top_level_comment.snippet;
        Comment::new(snippet.author_display_name, snippet.text_display)
    }
}

/// `GET /videos` response, generic over the requested `part`.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Item shape for `part=id`.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoIdItem {
    pub id: String,
}

/// Item shape for `part=snippet`.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoSnippetItem {
    pub snippet: VideoSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

impl Thumbnails {
    /// Highest resolution with a non-empty URL.
    pub fn best_url(&self) -> String {
        [&self.high, &self.medium, &self.default]
            .into_iter()
            .flatten()
            .map(|t| t.url.as_str())
            .find(|url| !url.is_empty())
            .unwrap_or_default()
            .to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
}

impl From<VideoSnippet> for VideoMeta {
    fn from(snippet: VideoSnippet) -> Self {
        let thumbnail = snippet.thumbnails.best_url();
        VideoMeta {
            title: snippet.title,
            channel: snippet.channel_title,
            thumbnail,
        }
    }
}
