//! Request-level orchestration: validation, generation, enrichment

use crate::availability::AvailabilityOracle;
use crate::error::{BrandForgeError, Result};
use crate::llm::NameGenerator;
use crate::logo::LogoGenerator;
use crate::types::{
    BrandNameRecord, Channel, GenerateLogosRequest, GenerateLogosResponse, GenerateNamesRequest,
    GenerateNamesResponse, ServiceMetrics,
};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;

pub const PROMPT_REQUIRED: &str = "Prompt required";
pub const NAME_REQUIRED: &str = "Name required";

/// Turns a business description into annotated brand name candidates
pub struct NameService {
    generator: NameGenerator,
    oracle: Arc<AvailabilityOracle>,
    metrics: Arc<ServiceMetrics>,
}

impl NameService {
    pub fn new(
        generator: NameGenerator,
        oracle: Arc<AvailabilityOracle>,
        metrics: Arc<ServiceMetrics>,
    ) -> Self {
        Self {
            generator,
            oracle,
            metrics,
        }
    }

    /// Name of the registry behind live lookups
    pub fn registry_name(&self) -> Option<&'static str> {
        self.oracle.registry_name()
    }

    /// Handle one generation request.
    ///
    /// Fails with `InvalidRequest` before any model call when the prompt is
    /// missing or blank, and with `Upstream` when the model call fails.
    pub async fn generate(&self, request: &GenerateNamesRequest) -> Result<GenerateNamesResponse> {
        let prompt = request
            .prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| BrandForgeError::invalid_request(PROMPT_REQUIRED))?;

        let start_time = Instant::now();
        let names = match self.generator.generate(prompt).await {
            Ok(names) => names,
            Err(e) => {
                self.metrics.increment_upstream_errors();
                tracing::warn!(
                    provider = %self.generator.provider_name(),
                    error = %e,
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Name generation failed"
                );
                return Err(e);
            }
        };
        self.metrics.increment_generations();

        let records = self.enrich(names).await;
        tracing::info!(
            names_count = %records.len(),
            duration_ms = %start_time.elapsed().as_millis(),
            "Brand names ready"
        );

        Ok(GenerateNamesResponse { names: records })
    }

    /// Attach availability to every name, all checks running concurrently
    pub async fn enrich(&self, names: Vec<String>) -> Vec<BrandNameRecord> {
        let oracle = &self.oracle;
        let records = names.into_iter().map(|name| async move {
            let [com, ai, ig] = Channel::ALL;
            let (com, ai, ig) = futures::join!(
                oracle.check(&name, com),
                oracle.check(&name, ai),
                oracle.check(&name, ig),
            );
            BrandNameRecord::new(name, com, ai, ig)
        });
        join_all(records).await
    }
}

/// Produces logo candidates for a chosen name
pub struct LogoService {
    generator: LogoGenerator,
    metrics: Arc<ServiceMetrics>,
}

impl LogoService {
    pub fn new(generator: LogoGenerator, metrics: Arc<ServiceMetrics>) -> Self {
        Self { generator, metrics }
    }

    pub async fn generate(&self, request: &GenerateLogosRequest) -> Result<GenerateLogosResponse> {
        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| BrandForgeError::invalid_request(NAME_REQUIRED))?;
        let description = request.prompt.as_deref().unwrap_or_default();

        match self.generator.generate(name, description).await {
            Ok(logos) => {
                self.metrics.add_logos(logos.len());
                Ok(GenerateLogosResponse { logos })
            }
            Err(e) => {
                self.metrics.increment_upstream_errors();
                tracing::warn!(name = %name, error = %e, "Logo generation failed");
                Err(e)
            }
        }
    }
}
