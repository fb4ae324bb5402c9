//! Brand name generator using an LLM

use crate::error::{BrandForgeError, Result};
use crate::llm::parse::extract_names;
use crate::llm::{ChatMessage, ChatModel, ChatRequest};
use crate::types::GenerationConfig;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;

/// Generates candidate brand names from a business description
#[derive(Clone)]
pub struct NameGenerator {
    model: Arc<dyn ChatModel>,
    config: GenerationConfig,
}

impl NameGenerator {
    pub fn new(model: Arc<dyn ChatModel>, config: GenerationConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &'static str {
        self.model.name()
    }

    /// Ask the model for names.
    ///
    /// Errors only when the model call itself fails or exceeds the configured
    /// timeout. Unparseable output degrades to an empty list.
    pub async fn generate(&self, prompt: &str) -> Result<Vec<String>> {
        let request = ChatRequest {
            messages: vec![
                ChatMessage::system(build_system_prompt(self.config.count)),
                ChatMessage::user(prompt),
            ],
            temperature: self.config.temperature,
        };

        let provider = self.model.name();
        let start_time = Instant::now();
        let timeout_ms = self.config.timeout.as_millis() as u64;

        let content = timeout(self.config.timeout, self.model.complete(&request))
            .await
            .map_err(|_| {
                BrandForgeError::timeout("model call", timeout_ms).into_upstream(provider)
            })?
            .map_err(|e| e.into_upstream(provider))?;

        let mut names = extract_names(&content);
        names.truncate(self.config.count);
        if names.is_empty() {
            tracing::warn!(
                provider = %provider,
                model = %self.model.model(),
                "Model reply contained no usable names"
            );
        }

        tracing::info!(
            provider = %provider,
            names_count = %names.len(),
            duration_ms = %start_time.elapsed().as_millis(),
            "Name generation completed"
        );

        Ok(names)
    }
}

/// System instruction constraining the model's output
pub fn build_system_prompt(count: usize) -> String {
    let placeholders: Vec<String> = (1..=count).map(|i| format!("\"Name{}\"", i)).collect();
    format!(
        "You are a brand naming expert. Generate {count} unique, memorable brand names \
         based on the user's business description.\n\n\
         Rules:\n\
         - Names should be 4-8 letters, easy to pronounce\n\
         - Avoid common words, aim for coined/unique names\n\
         - Consider the industry and target audience\n\
         - Return ONLY a JSON array of names: [{}]",
        placeholders.join(", ")
    )
}
