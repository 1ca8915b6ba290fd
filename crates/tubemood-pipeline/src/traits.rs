//! Seams between the pipeline and its remote collaborators.
//!
//! Production uses [`YoutubeClient`] and [`LlmClient`]; tests plug in fakes.

use async_trait::async_trait;
use tubemood_llm::LlmClient;
use tubemood_models::{Classification, Comment, VideoId, VideoMeta};
use tubemood_youtube::YoutubeClient;

use crate::error::PipelineResult;

/// Where comments and video details come from.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Up to `max` top-level comments; any failure fails the whole fetch.
    async fn fetch_comments(&self, video_id: &VideoId, max: usize) -> PipelineResult<Vec<Comment>>;

    /// A randomly chosen currently trending video.
    async fn random_trending_video_id(&self) -> PipelineResult<VideoId>;

    async fn fetch_video_meta(&self, video_id: &VideoId) -> PipelineResult<VideoMeta>;
}

/// Labels a single piece of text.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> PipelineResult<Classification>;

    /// Model new calls will use, for reporting.
    fn model_name(&self) -> String;
}

/// Turns a keyword list into a short insight paragraph.
#[async_trait]
pub trait InsightSummarizer: Send + Sync {
    async fn summarize(&self, keywords: &[String]) -> PipelineResult<String>;
}

#[async_trait]
impl CommentSource for YoutubeClient {
    async fn fetch_comments(&self, video_id: &VideoId, max: usize) -> PipelineResult<Vec<Comment>> {
        Ok(YoutubeClient::fetch_comments(self, video_id, max).await?)
    }

    async fn random_trending_video_id(&self) -> PipelineResult<VideoId> {
        Ok(YoutubeClient::random_trending_video_id(self).await?)
    }

    async fn fetch_video_meta(&self, video_id: &VideoId) -> PipelineResult<VideoMeta> {
        Ok(YoutubeClient::fetch_video_meta(self, video_id).await?)
    }
}

#[async_trait]
impl SentimentClassifier for LlmClient {
    async fn classify(&self, text: &str) -> PipelineResult<Classification> {
        Ok(self.classify_sentiment(text).await?)
    }

    fn model_name(&self) -> String {
        self.current_model().to_string()
    }
}

#[async_trait]
impl InsightSummarizer for LlmClient {
    async fn summarize(&self, keywords: &[String]) -> PipelineResult<String> {
        Ok(self.summarize_keywords(keywords).await?)
    }
}
