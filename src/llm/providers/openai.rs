//! OpenAI provider implementation
//!
//! Supports OpenAI API and OpenAI-compatible APIs (OpenRouter, OneAPI, etc.)

use crate::error::{BrandForgeError, Result};
use crate::llm::{ChatMessage, ChatModel, ChatRequest};
use crate::types::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::status_error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI provider implementation
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(BrandForgeError::config("OpenAI API key is required"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| BrandForgeError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

/// Join an OpenAI-style base URL and endpoint, inserting `/v1` when absent
pub(crate) fn build_url(base_url: &str, endpoint: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    if base_url.ends_with("/v1") {
        format!("{}{}", base_url, endpoint)
    } else {
        format!("{}/v1{}", base_url, endpoint)
    }
}

#[async_trait]
impl ChatModel for OpenAiProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let body = OpenAiRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
        };

        let url = build_url(&self.base_url, "/chat/completions");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                BrandForgeError::upstream(
                    "openai",
                    format!("Failed to connect to API: {}", e),
                    None,
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error("openai", status, &error_text));
        }

        let openai_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| {
                BrandForgeError::upstream("openai", format!("Malformed response: {}", e), None)
            })?;

        Ok(openai_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// OpenAI API structures
#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiReplyMessage,
}

#[derive(Deserialize)]
struct OpenAiReplyMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OpenAiProvider {
        OpenAiProvider::new(&LlmConfig {
            api_key: "test-key".to_string(),
            base_url: Some(server.uri()),
            ..Default::default()
        })
        .expect("provider")
    }

    fn request() -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::system("rules"), ChatMessage::user("a bakery")],
            temperature: 0.8,
        }
    }

    #[test]
    fn test_requires_api_key() {
        assert!(OpenAiProvider::new(&LlmConfig::default()).is_err());
    }

    #[test]
    fn test_build_url() {
        assert_eq!(
            build_url("https://api.openai.com/v1/", "/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            build_url("http://localhost:8080", "/chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "temperature": 0.8,
                "messages": [
                    {"role": "system", "content": "rules"},
                    {"role": "user", "content": "a bakery"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "[\"Crumbly\"]"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let content = provider_for(&server).complete(&request()).await.unwrap();
        assert_eq!(content, "[\"Crumbly\"]");
    }

    #[tokio::test]
    async fn test_null_content_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let content = provider_for(&server).complete(&request()).await.unwrap();
        assert!(content.is_empty());
    }

    #[tokio::test]
    async fn test_auth_failure_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let err = provider_for(&server).complete(&request()).await.unwrap_err();
        match err {
            BrandForgeError::Upstream { status_code, .. } => assert_eq!(status_code, Some(401)),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}
