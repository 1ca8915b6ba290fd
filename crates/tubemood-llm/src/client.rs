//! Chat-completion HTTP client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use tubemood_models::Classification;

use crate::error::{LlmError, LlmResult};
use crate::label::{parse_label, CANNOT_CLASSIFY};
use crate::metrics;
use crate::model::{ChatModel, ModelState};
use crate::types::{ChatRequest, ChatResponse};

/// Returned by [`LlmClient::summarize_keywords`] when there is nothing to summarize.
pub const NO_KEYWORDS_MESSAGE: &str = "No keywords were found to summarize.";

/// Configuration for the chat-completion client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer token
    pub api_key: String,
    /// Base URL; requests go to `{base_url}/chat/completions`
    pub base_url: String,
    /// Model used until the first transport failure
    pub primary_model: String,
    /// Model used from then on
    pub fallback_model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            primary_model: "gpt-4o".to_string(),
            fallback_model: "gpt-3.5-turbo".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl LlmConfig {
    /// Create config from environment variables.
    pub fn from_env() -> LlmResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| LlmError::config("OPENAI_API_KEY not set"))?;

        let defaults = Self::default();
        Ok(Self {
            api_key,
            base_url: std::env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            primary_model: std::env::var("OPENAI_PRIMARY_MODEL").unwrap_or(defaults.primary_model),
            fallback_model: std::env::var("OPENAI_FALLBACK_MODEL")
                .unwrap_or(defaults.fallback_model),
            timeout: Duration::from_secs(
                std::env::var("OPENAI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
        })
    }

    /// Configured model name for a slot.
    pub fn model_name(&self, model: ChatModel) -> &str {
        match model {
            ChatModel::Primary => &self.primary_model,
            ChatModel::Fallback => &self.fallback_model,
        }
    }
}

/// Client for an OpenAI-compatible chat-completion endpoint.
pub struct LlmClient {
    http: Client,
    config: LlmConfig,
    state: Arc<ModelState>,
}

impl LlmClient {
    /// Create a new client with its own model state.
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        Self::with_state(config, Arc::new(ModelState::new()))
    }

    /// Create a client that shares an existing model state.
    pub fn with_state(config: LlmConfig, state: Arc<ModelState>) -> LlmResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            http,
            config,
            state,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> LlmResult<Self> {
        Self::new(LlmConfig::from_env()?)
    }

    pub fn model_state(&self) -> &Arc<ModelState> {
        &self.state
    }

    /// Name of the model new calls will start with.
    pub fn current_model(&self) -> &str {
        self.config.model_name(self.state.current())
    }

    /// Classify one comment as Positive, Negative or Neutral.
    pub async fn classify_sentiment(&self, text: &str) -> LlmResult<Classification> {
        let prompt = sentiment_prompt(text);
        let response = self.complete(&prompt).await?;

        Ok(match response.first_content() {
            Some(content) => parse_label(content),
            None => Classification::unclassified(CANNOT_CLASSIFY),
        })
    }

    /// Write a short insight paragraph about the top keywords.
    pub async fn summarize_keywords(&self, keywords: &[String]) -> LlmResult<String> {
        if keywords.is_empty() {
            return Ok(NO_KEYWORDS_MESSAGE.to_string());
        }

        let joined = keywords.join(", ");
        let prompt = summary_prompt(&joined);
        let response = self.complete(&prompt).await?;

        Ok(match response.first_content() {
            Some(content) => content.trim().to_string(),
            None => format!("Top keywords: {}", joined),
        })
    }

    /// Send a single-turn prompt, downgrading to the fallback model once on
    /// a transport failure.
    async fn complete(&self, prompt: &str) -> LlmResult<ChatResponse> {
        let mut model = self.state.current();

        loop {
            match self.send(model, prompt).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transport() => {
                    let Some(next) = model.fallback() else {
                        return Err(e);
                    };

                    if self.state.downgrade() {
                        metrics::record_model_fallback();
                        info!(
                            from = self.config.model_name(model),
                            to = self.config.model_name(next),
                            "Switched to fallback chat model"
                        );
                    }
                    warn!(
                        model = self.config.model_name(model),
                        error = %e,
                        "Chat completion failed, retrying with fallback model"
                    );
                    model = next;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send(&self, model: ChatModel, prompt: &str) -> LlmResult<ChatResponse> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let model_name = self.config.model_name(model);

        debug!(model = model_name, "Sending chat completion request");

        let result = self.send_inner(&url, model_name, prompt).await;
        metrics::record_request(model.as_str(), result.is_ok());
        result
    }

    async fn send_inner(&self, url: &str, model_name: &str, prompt: &str) -> LlmResult<ChatResponse> {
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&ChatRequest::user(model_name, prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed(format!(
                "Chat completion with {} returned {}: {}",
                model_name, status, body
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn sentiment_prompt(text: &str) -> String {
    format!(
        "Classify the sentiment of the following YouTube comment. \
         Answer with exactly one word: Positive, Negative, or Neutral.\n\n\
         Comment: {}",
        text
    )
}

fn summary_prompt(keywords: &str) -> String {
    format!(
        "These are the most frequent keywords in the comments of a YouTube video: {}.\n\
         In 2-3 sentences, summarize what viewers are talking about and the overall mood.",
        keywords
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tubemood_models::SentimentLabel;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String, timeout: Duration) -> LlmConfig {
        LlmConfig {
            api_key: "sk-test".to_string(),
            base_url,
            primary_model: "primary-model".to_string(),
            fallback_model: "fallback-model".to_string(),
            timeout,
        }
    }

    fn test_client(server: &MockServer) -> LlmClient {
        LlmClient::new(test_config(server.uri(), Duration::from_secs(5))).unwrap()
    }

    /// Client whose requests time out against a delayed mock response.
    fn impatient_client(server: &MockServer) -> LlmClient {
        LlmClient::new(test_config(server.uri(), Duration::from_millis(200))).unwrap()
    }

    fn stalled() -> ResponseTemplate {
        answer("too late").set_delay(Duration::from_secs(2))
    }

    /// Base URL on a port nothing listens on.
    fn unreachable_base_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}")
    }

    fn answer(content: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        }))
    }

    #[test]
    fn test_config_defaults() {
        let config = LlmConfig::default();
        assert_eq!(config.primary_model, "gpt-4o");
        assert_eq!(config.fallback_model, "gpt-3.5-turbo");
        assert_eq!(config.model_name(ChatModel::Fallback), "gpt-3.5-turbo");
    }

    #[tokio::test]
    async fn test_classify_with_primary_model() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({"model": "primary-model"})))
            .respond_with(answer("Positive."))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.classify_sentiment("love it").await.unwrap();

        assert_eq!(result.label, SentimentLabel::Positive);
        assert!(!client.model_state().is_degraded());
    }

    #[tokio::test]
    async fn test_empty_choices_is_cannot_classify() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let result = test_client(&server).classify_sentiment("hmm").await.unwrap();
        assert_eq!(result, Classification::unclassified(CANNOT_CLASSIFY));
    }

    #[tokio::test]
    async fn test_falls_back_once_and_stays_degraded() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"model": "primary-model"})))
            .respond_with(stalled())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"model": "fallback-model"})))
            .respond_with(answer("Negative"))
            .expect(2)
            .mount(&server)
            .await;

        let client = impatient_client(&server);
        let first = client.classify_sentiment("meh").await.unwrap();
        assert_eq!(first.label, SentimentLabel::Negative);
        assert!(client.model_state().is_degraded());
        assert_eq!(client.current_model(), "fallback-model");

        // Later calls go straight to the fallback model
        let second = client.classify_sentiment("bad").await.unwrap();
        assert_eq!(second.label, SentimentLabel::Negative);
    }

    #[tokio::test]
    async fn test_fallback_failure_is_an_error() {
        let client = LlmClient::new(test_config(
            unreachable_base_url(),
            Duration::from_secs(5),
        ))
        .unwrap();

        let result = client.classify_sentiment("anything").await;

        assert!(matches!(result, Err(LlmError::Network(_))));
        assert!(client.model_state().is_degraded());
    }

    #[tokio::test]
    async fn test_error_status_keeps_primary_model() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"model": "primary-model"})))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "Rate limit reached", "type": "requests"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"model": "fallback-model"})))
            .respond_with(answer("Positive"))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.classify_sentiment("love it").await;

        assert!(matches!(result, Err(LlmError::RequestFailed(_))));
        assert!(!client.model_state().is_degraded());
        assert_eq!(client.current_model(), "primary-model");
    }

    #[tokio::test]
    async fn test_degraded_state_never_tries_a_third_model() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"model": "fallback-model"})))
            .respond_with(stalled())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"model": "primary-model"})))
            .respond_with(answer("Positive"))
            .expect(0)
            .mount(&server)
            .await;

        let client = impatient_client(&server);
        client.model_state().downgrade();

        let result = client.classify_sentiment("x").await;
        assert!(matches!(result, Err(LlmError::Network(_))));
    }

    #[tokio::test]
    async fn test_decode_failure_does_not_fall_back() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.classify_sentiment("x").await;

        assert!(matches!(result, Err(LlmError::Json(_))));
        assert!(!client.model_state().is_degraded());
    }

    #[tokio::test]
    async fn test_shared_state_downgrades_all_clients() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"model": "primary-model"})))
            .respond_with(stalled())
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"model": "fallback-model"})))
            .respond_with(answer("Neutral"))
            .mount(&server)
            .await;

        let a = impatient_client(&server);
        let b = LlmClient::with_state(a.config.clone(), Arc::clone(a.model_state())).unwrap();

        a.classify_sentiment("x").await.unwrap();
        assert_eq!(b.current_model(), "fallback-model");
    }

    #[tokio::test]
    async fn test_summarize_without_keywords_skips_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(answer("unused"))
            .expect(0)
            .mount(&server)
            .await;

        let text = test_client(&server).summarize_keywords(&[]).await.unwrap();
        assert_eq!(text, NO_KEYWORDS_MESSAGE);
    }

    #[tokio::test]
    async fn test_summarize_keywords() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(answer("  Viewers love the music.  "))
            .mount(&server)
            .await;

        let keywords = vec!["music".to_string(), "great".to_string()];
        let text = test_client(&server).summarize_keywords(&keywords).await.unwrap();
        assert_eq!(text, "Viewers love the music.");
    }

    #[tokio::test]
    async fn test_summarize_without_choices_lists_keywords() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let keywords = vec!["music".to_string(), "great".to_string()];
        let text = test_client(&server).summarize_keywords(&keywords).await.unwrap();
        assert_eq!(text, "Top keywords: music, great");
    }
}
