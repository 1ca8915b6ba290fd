//! YouTube Data API HTTP client.

use std::time::Duration;

use rand::Rng;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use tubemood_models::{Comment, VideoId, VideoMeta};

use crate::error::{YoutubeError, YoutubeResult};
use crate::types::{
    CommentThreadListResponse, VideoIdItem, VideoListResponse, VideoSnippetItem,
};

/// Hard cap on comments pulled for one video.
pub const DEFAULT_MAX_FETCH: usize = 300;

/// Items requested per comment-thread page (API maximum).
const PAGE_SIZE: usize = 100;

/// Candidates drawn from the trending chart.
const TRENDING_POOL_SIZE: usize = 20;

/// Configuration for the YouTube client.
#[derive(Debug, Clone)]
pub struct YoutubeConfig {
    /// Data API key
    pub api_key: String,
    /// Base URL of the Data API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Region used for the trending chart
    pub trending_region: String,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            timeout: Duration::from_secs(30),
            trending_region: "KR".to_string(),
        }
    }
}

impl YoutubeConfig {
    /// Create config from environment variables.
    pub fn from_env() -> YoutubeResult<Self> {
        let api_key = std::env::var("YOUTUBE_API_KEY")
            .map_err(|_| YoutubeError::config("YOUTUBE_API_KEY not set"))?;

        let defaults = Self::default();
        Ok(Self {
            api_key,
            base_url: std::env::var("YOUTUBE_API_BASE_URL").unwrap_or(defaults.base_url),
            timeout: Duration::from_secs(
                std::env::var("YOUTUBE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            trending_region: std::env::var("YOUTUBE_TRENDING_REGION")
                .unwrap_or(defaults.trending_region),
        })
    }
}

/// Client for the YouTube Data API.
pub struct YoutubeClient {
    http: Client,
    config: YoutubeConfig,
}

impl YoutubeClient {
    /// Create a new YouTube client.
    pub fn new(config: YoutubeConfig) -> YoutubeResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(YoutubeError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> YoutubeResult<Self> {
        Self::new(YoutubeConfig::from_env()?)
    }

    /// Fetch up to `max` top-level comments for a video.
    ///
    /// Any failing page fails the whole fetch; comments already paged in
    /// are dropped because the cursor cannot be resumed.
    pub async fn fetch_comments(&self, video_id: &VideoId, max: usize) -> YoutubeResult<Vec<Comment>> {
        let mut comments = Vec::with_capacity(max.min(DEFAULT_MAX_FETCH));
        let mut page_token: Option<String> = None;
        let page_size = PAGE_SIZE.to_string();

        while comments.len() < max {
            let mut query = vec![
                ("part", "snippet"),
                ("videoId", video_id.as_str()),
                ("maxResults", page_size.as_str()),
                ("key", self.config.api_key.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let page: CommentThreadListResponse = self.get_json("commentThreads", &query).await?;
            let next = page.next_page().map(str::to_string);

            let remaining = max - comments.len();
            comments.extend(page.items.into_iter().take(remaining).map(Comment::from));

            debug!(
                video_id = %video_id,
                fetched = comments.len(),
                has_next = next.is_some(),
                "Fetched comment page"
            );

            match next {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!(video_id = %video_id, count = comments.len(), "Fetched comments");
        Ok(comments)
    }

    /// Pick a random video from the trending chart.
    pub async fn random_trending_video_id(&self) -> YoutubeResult<VideoId> {
        let pool_size = TRENDING_POOL_SIZE.to_string();
        let query = [
            ("part", "id"),
            ("chart", "mostPopular"),
            ("maxResults", pool_size.as_str()),
            ("regionCode", self.config.trending_region.as_str()),
            ("key", self.config.api_key.as_str()),
        ];

        let response: VideoListResponse<VideoIdItem> = self.get_json("videos", &query).await?;
        if response.items.is_empty() {
            return Err(YoutubeError::NoTrendingVideos);
        }

        let pick = rand::rng().random_range(0..response.items.len());
        let raw = &response.items[pick].id;
        let video_id = VideoId::parse(raw).map_err(|e| {
            YoutubeError::invalid_response(format!("Trending chart returned bad ID {raw:?}: {e}"))
        })?;

        info!(video_id = %video_id, candidates = response.items.len(), "Picked trending video");
        Ok(video_id)
    }

    /// Look up title, channel and thumbnail for a video.
    pub async fn fetch_video_meta(&self, video_id: &VideoId) -> YoutubeResult<VideoMeta> {
        let query = [
            ("part", "snippet"),
            ("id", video_id.as_str()),
            ("key", self.config.api_key.as_str()),
        ];

        let response: VideoListResponse<VideoSnippetItem> = self.get_json("videos", &query).await?;
        response
            .items
            .into_iter()
            .next()
            .map(|item| VideoMeta::from(item.snippet))
            .ok_or_else(|| YoutubeError::VideoNotFound(video_id.to_string()))
    }

    /// GET `{base_url}/{endpoint}` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> YoutubeResult<T> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint);

        let response = self.http.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(YoutubeError::RequestFailed(format!(
                "YouTube API {} returned {}: {}",
                endpoint, status, body
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> YoutubeClient {
        YoutubeClient::new(YoutubeConfig {
            api_key: "test-key".to_string(),
            base_url: server.uri(),
            ..Default::default()
        })
        .unwrap()
    }

    fn video_id() -> VideoId {
        VideoId::parse("dQw4w9WgXcQ").unwrap()
    }

    fn page(start: usize, count: usize, next: Option<&str>) -> serde_json::Value {
        let items: Vec<_> = (start..start + count)
            .map(|i| {
                json!({"snippet": {"topLevelComment": {"snippet": {
                    "authorDisplayName": format!("user{i}"),
                    "textDisplay": format!("comment {i}")
                }}}})
            })
            .collect();
        match next {
            Some(token) => json!({"items": items, "nextPageToken": token}),
            None => json!({"items": items}),
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = YoutubeConfig::default();
        assert_eq!(config.base_url, "https://www.googleapis.com/youtube/v3");
        assert_eq!(config.trending_region, "KR");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_fetch_stops_at_cap() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .and(query_param("pageToken", "p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(100, 100, Some("p3"))))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .and(query_param("pageToken", "p3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(200, 100, Some("p4"))))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .and(query_param("pageToken", "p4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(300, 100, None)))
            .with_priority(1)
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .and(query_param("videoId", "dQw4w9WgXcQ"))
            .and(query_param("maxResults", "100"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 100, Some("p2"))))
            .mount(&server)
            .await;

        let comments = test_client(&server)
            .fetch_comments(&video_id(), DEFAULT_MAX_FETCH)
            .await
            .unwrap();

        assert_eq!(comments.len(), 300);
        assert_eq!(comments[0], Comment::new("user0", "comment 0"));
        assert_eq!(comments[299].text, "comment 299");
    }

    #[tokio::test]
    async fn test_fetch_truncates_mid_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 100, Some("p2"))))
            .expect(1)
            .mount(&server)
            .await;

        let comments = test_client(&server).fetch_comments(&video_id(), 40).await.unwrap();
        assert_eq!(comments.len(), 40);
    }

    #[tokio::test]
    async fn test_fetch_stops_without_next_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 37, None)))
            .expect(1)
            .mount(&server)
            .await;

        let comments = test_client(&server)
            .fetch_comments(&video_id(), DEFAULT_MAX_FETCH)
            .await
            .unwrap();
        assert_eq!(comments.len(), 37);
    }

    #[tokio::test]
    async fn test_failed_page_discards_partial_results() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .and(query_param("pageToken", "p2"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 100, Some("p2"))))
            .mount(&server)
            .await;

        let result = test_client(&server)
            .fetch_comments(&video_id(), DEFAULT_MAX_FETCH)
            .await;
        assert!(matches!(result, Err(YoutubeError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_undecodable_page_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = test_client(&server).fetch_comments(&video_id(), 10).await;
        assert!(matches!(result, Err(YoutubeError::Json(_))));
    }

    #[tokio::test]
    async fn test_random_trending_video_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("chart", "mostPopular"))
            .and(query_param("regionCode", "KR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"id": "aaaaaaaaaaa"}, {"id": "bbbbbbbbbbb"}]
            })))
            .mount(&server)
            .await;

        let id = test_client(&server).random_trending_video_id().await.unwrap();
        assert!(["aaaaaaaaaaa", "bbbbbbbbbbb"].contains(&id.as_str()));
    }

    #[tokio::test]
    async fn test_empty_trending_chart() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let result = test_client(&server).random_trending_video_id().await;
        assert!(matches!(result, Err(YoutubeError::NoTrendingVideos)));
    }

    #[tokio::test]
    async fn test_fetch_video_meta() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("part", "snippet"))
            .and(query_param("id", "dQw4w9WgXcQ"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"snippet": {
                    "title": "Never Gonna Give You Up",
                    "channelTitle": "Rick Astley",
                    "thumbnails": {
                        "default": {"url": "https://i.ytimg.com/default.jpg"},
                        "medium": {"url": "https://i.ytimg.com/mq.jpg"}
                    }
                }}]
            })))
            .mount(&server)
            .await;

        let meta = test_client(&server).fetch_video_meta(&video_id()).await.unwrap();
        assert_eq!(meta.title, "Never Gonna Give You Up");
        assert_eq!(meta.channel, "Rick Astley");
        assert_eq!(meta.thumbnail, "https://i.ytimg.com/mq.jpg");
    }

    #[tokio::test]
    async fn test_fetch_video_meta_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let result = test_client(&server).fetch_video_meta(&video_id()).await;
        assert!(matches!(result, Err(YoutubeError::VideoNotFound(_))));
    }
}
