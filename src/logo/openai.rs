//! OpenAI image generation provider

use crate::error::{BrandForgeError, Result};
use crate::llm::providers::openai::{build_url, DEFAULT_BASE_URL};
use crate::llm::providers::status_error;
use crate::logo::ImageModel;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Calls `/images/generations`, one image per request
pub struct OpenAiImageProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiImageProvider {
    pub fn new(api_key: &str, model: &str, base_url: Option<String>) -> Result<Self> {
        if api_key.is_empty() {
            return Err(BrandForgeError::config("OpenAI API key is required for logo generation"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| BrandForgeError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

#[async_trait]
impl ImageModel for OpenAiImageProvider {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let body = ImageRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: "1024x1024",
        };

        let url = build_url(&self.base_url, "/images/generations");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                BrandForgeError::upstream(
                    "openai-images",
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
            return Err(status_error("openai-images", status, &error_text));
        }

        let images: ImageResponse = response.json().await.map_err(|e| {
            BrandForgeError::upstream("openai-images", format!("Malformed response: {}", e), None)
        })?;

        images
            .data
            .into_iter()
            .find_map(|d| d.url)
            .ok_or_else(|| {
                BrandForgeError::upstream("openai-images", "Response contained no image URL", None)
            })
    }

    fn name(&self) -> &'static str {
        "openai-images"
    }
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
}
