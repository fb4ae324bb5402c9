//! LLM (Large Language Model) integration module
//!
//! The generative model is an external collaborator reached through
//! [`ChatModel`]; everything else here is prompt construction and
//! best-effort parsing of the model's free-text reply.

pub mod generator;
pub mod parse;
pub mod providers;

pub use generator::NameGenerator;
pub use parse::extract_names;

use crate::error::Result;
use crate::types::LlmConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role tag of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat-completion request handed to a provider
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Core trait for all chat-completion providers
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run a completion and return the raw reply text.
    ///
    /// A reply without text content is returned as an empty string.
    async fn complete(&self, request: &ChatRequest) -> Result<String>;

    /// Get provider name
    fn name(&self) -> &'static str;

    /// Get model name being used
    fn model(&self) -> &str;
}

/// Get available LLM providers
pub fn available_providers() -> Vec<&'static str> {
    vec!["openai", "anthropic"]
}

/// Create a chat model from configuration
pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn ChatModel>> {
    match config.provider.as_str() {
        "openai" => Ok(Box::new(providers::OpenAiProvider::new(config)?)),
        "anthropic" => Ok(Box::new(providers::AnthropicProvider::new(config)?)),
        _ => Err(crate::config_error!(
            "Unsupported LLM provider: {}. Supported providers: {}",
            config.provider,
            available_providers().join(", ")
        )),
    }
}
