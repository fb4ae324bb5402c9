//! Brand Forge - AI-powered brand name and logo generation
//!
//! Turns a free-text business description into brand name candidates,
//! each annotated with best-effort `.com`, `.ai` and social-handle
//! availability hints, and generates logo images for a chosen name.

pub mod availability;
pub mod config;
pub mod error;
pub mod llm;
pub mod logo;
pub mod server;
pub mod service;
pub mod types;

pub use error::{BrandForgeError, Result};
pub use types::{
    Availability, BrandNameRecord, Channel, CheckConfig, GenerateLogosRequest,
    GenerateLogosResponse, GenerateNamesRequest, GenerateNamesResponse, GenerationConfig,
    LlmConfig, Logo, MetricsSnapshot, ServiceMetrics,
};

pub use availability::AvailabilityOracle;
pub use config::AppConfig;
pub use llm::NameGenerator;
pub use logo::LogoGenerator;
pub use service::{LogoService, NameService};

use availability::{DomainRegistry, DomainsDbRegistry};
use config::RegistryBackend;
use server::AppState;
use std::sync::Arc;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wire providers, registry and services from configuration
pub fn build_state(config: &AppConfig) -> Result<AppState> {
    let metrics = Arc::new(ServiceMetrics::new());

    let model: Arc<dyn llm::ChatModel> = Arc::from(llm::create_provider(&config.llm)?);
    let generator = NameGenerator::new(model, config.generation.clone());

    let http = reqwest::Client::builder()
        .timeout(config.check.timeout)
        .user_agent(concat!("brand-forge/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| BrandForgeError::config(format!("Failed to build HTTP client: {}", e)))?;

    let registry: Option<Arc<dyn DomainRegistry>> = match config.registry {
        RegistryBackend::DomainsDb => Some(Arc::new(match &config.domainsdb_url {
            Some(url) => DomainsDbRegistry::with_base_url(http, url.clone()),
            None => DomainsDbRegistry::new(http),
        })),
        #[cfg(feature = "rdap")]
        RegistryBackend::Rdap => Some(Arc::new(availability::RdapRegistry::new(http))),
        #[cfg(not(feature = "rdap"))]
        RegistryBackend::Rdap => {
            return Err(BrandForgeError::config("RDAP support was not compiled in"));
        }
        RegistryBackend::None => None,
    };

    let oracle =
        AvailabilityOracle::new(registry, config.check.clone()).with_metrics(metrics.clone());

    let logos = if config.image_api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY not set, logo generation disabled");
        None
    } else {
        let images: Arc<dyn logo::ImageModel> = Arc::new(logo::OpenAiImageProvider::new(
            &config.image_api_key,
            &config.image_model,
            config.image_base_url.clone(),
        )?);
        Some(Arc::new(LogoService::new(
            LogoGenerator::new(images, config.logo_count),
            metrics.clone(),
        )))
    };

    tracing::info!(
        provider = %config.llm.provider,
        model = %config.llm.model,
        registry = ?config.registry,
        "Services configured"
    );

    Ok(AppState {
        names: Arc::new(NameService::new(generator, Arc::new(oracle), metrics.clone())),
        logos,
        metrics,
    })
}
