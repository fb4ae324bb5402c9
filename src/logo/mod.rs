//! Logo generation
//!
//! Image generation is an external collaborator reached through
//! [`ImageModel`].

pub mod openai;

pub use openai::OpenAiImageProvider;

use crate::availability::domain_label;
use crate::error::Result;
use crate::types::Logo;
use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Instant;

/// Core trait for image generation providers
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Generate one image and return its URL
    async fn generate_image(&self, prompt: &str) -> Result<String>;

    /// Get provider name
    fn name(&self) -> &'static str;
}

/// Produces a set of logo candidates for a chosen brand name
#[derive(Clone)]
pub struct LogoGenerator {
    model: Arc<dyn ImageModel>,
    count: usize,
}

impl LogoGenerator {
    pub fn new(model: Arc<dyn ImageModel>, count: usize) -> Self {
        Self {
            model,
            count: count.max(1),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Request `count` images concurrently; any failure fails the batch
    pub async fn generate(&self, name: &str, description: &str) -> Result<Vec<Logo>> {
        let prompt = build_logo_prompt(name, description);
        let provider = self.model.name();
        let start_time = Instant::now();

        let urls = try_join_all((0..self.count).map(|_| self.model.generate_image(&prompt)))
            .await
            .map_err(|e| e.into_upstream(provider))?;

        let stem = domain_label(name).unwrap_or_else(|| "logo".to_string());
        let logos: Vec<Logo> = urls
            .into_iter()
            .enumerate()
            .map(|(i, url)| Logo {
                url,
                id: format!("{}-{}", stem, i + 1),
            })
            .collect();

        tracing::info!(
            provider = %provider,
            logos_count = %logos.len(),
            duration_ms = %start_time.elapsed().as_millis(),
            "Logo generation completed"
        );

        Ok(logos)
    }
}

/// Image prompt for a brand mark
pub fn build_logo_prompt(name: &str, description: &str) -> String {
    let context = description.trim();
    let context = if context.is_empty() {
        String::new()
    } else {
        format!(" for {}", context)
    };
    format!(
        "A minimal, modern logo for the brand \"{name}\"{context}. \
         Flat vector style, simple geometric mark, clean background, \
         no extra text besides the brand name."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BrandForgeError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingImages {
        calls: AtomicUsize,
        fail_on: Option<usize>,
    }

    #[async_trait]
    impl ImageModel for CountingImages {
        async fn generate_image(&self, _prompt: &str) -> Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == Some(n) {
                return Err(BrandForgeError::network("image backend down", Some(502), None));
            }
            Ok(format!("https://img.example.com/{}.png", n))
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_generates_requested_count_with_ids() {
        let model = Arc::new(CountingImages {
            calls: AtomicUsize::new(0),
            fail_on: None,
        });
        let generator = LogoGenerator::new(model.clone(), 4);
        let logos = generator.generate("Nexoro", "coffee").await.unwrap();

        assert_eq!(logos.len(), 4);
        assert_eq!(model.calls.load(Ordering::SeqCst), 4);
        let ids: Vec<&str> = logos.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["nexoro-1", "nexoro-2", "nexoro-3", "nexoro-4"]);
    }

    #[tokio::test]
    async fn test_any_failure_is_upstream() {
        let model = Arc::new(CountingImages {
            calls: AtomicUsize::new(0),
            fail_on: Some(1),
        });
        let err = LogoGenerator::new(model, 3).generate("Nexoro", "").await.unwrap_err();
        assert!(matches!(err, BrandForgeError::Upstream { .. }));
    }

    #[test]
    fn test_prompt_mentions_name_and_context() {
        let prompt = build_logo_prompt("Nexoro", " coffee for remote workers ");
        assert!(prompt.contains("\"Nexoro\" for coffee for remote workers."));
        assert!(build_logo_prompt("Nexoro", "").contains("\"Nexoro\". "));
    }
}
