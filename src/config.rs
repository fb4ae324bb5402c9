//! Process configuration from environment variables

use crate::config_error;
use crate::error::Result;
use crate::types::{CheckConfig, GenerationConfig, LlmConfig};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Which registry answers availability lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryBackend {
    DomainsDb,
    Rdap,
    None,
}

impl FromStr for RegistryBackend {
    type Err = crate::error::BrandForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "domainsdb" => Ok(Self::DomainsDb),
            "rdap" => Ok(Self::Rdap),
            "none" | "off" => Ok(Self::None),
            other => Err(config_error!(
                "Unsupported registry backend: {}. Supported backends: {}",
                other,
                crate::availability::available_registries().join(", ")
            )),
        }
    }
}

/// Full service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub llm: LlmConfig,
    pub generation: GenerationConfig,
    pub check: CheckConfig,
    pub registry: RegistryBackend,
    pub domainsdb_url: Option<String>,
    /// Key used for image generation; always the OpenAI key
    pub image_api_key: String,
    pub image_model: String,
    pub image_base_url: Option<String>,
    pub logo_count: usize,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(std::env::vars().collect())
    }

    /// Build from an explicit variable map
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let bind_addr = parse_or(
            get("BRAND_FORGE_BIND"),
            "BRAND_FORGE_BIND",
            SocketAddr::from(([127, 0, 0, 1], 3000)),
        )?;

        let provider = get("LLM_PROVIDER").unwrap_or("openai").to_lowercase();
        let openai_key = get("OPENAI_API_KEY").unwrap_or_default().to_string();
        let openai_base = get("OPENAI_BASE_URL").map(str::to_string);

        let llm = match provider.as_str() {
            "openai" => LlmConfig {
                provider: provider.clone(),
                model: get("OPENAI_MODEL").unwrap_or("gpt-4o-mini").to_string(),
                api_key: openai_key.clone(),
                base_url: openai_base.clone(),
            },
            "anthropic" => LlmConfig {
                provider: provider.clone(),
                model: get("ANTHROPIC_MODEL")
                    .unwrap_or("claude-3-5-haiku-latest")
                    .to_string(),
                api_key: get("ANTHROPIC_API_KEY").unwrap_or_default().to_string(),
                base_url: get("ANTHROPIC_BASE_URL").map(str::to_string),
            },
            other => {
                return Err(config_error!(
                    "Unsupported LLM provider: {}. Supported providers: {}",
                    other,
                    crate::llm::available_providers().join(", ")
                ))
            }
        };
        if llm.api_key.is_empty() {
            return Err(config_error!(
                "No API key for provider '{}'. Set {}_API_KEY",
                llm.provider,
                llm.provider.to_uppercase()
            ));
        }

        let defaults = GenerationConfig::default();
        let generation = GenerationConfig {
            count: parse_or(get("NAME_COUNT"), "NAME_COUNT", defaults.count)?,
            temperature: defaults.temperature,
            timeout: Duration::from_secs(parse_or(
                get("LLM_TIMEOUT_SECS"),
                "LLM_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
        };
        if generation.count == 0 {
            return Err(config_error!("NAME_COUNT must be at least 1"));
        }

        let check_defaults = CheckConfig::default();
        let check = CheckConfig {
            timeout: Duration::from_millis(parse_or(
                get("AVAILABILITY_TIMEOUT_MS"),
                "AVAILABILITY_TIMEOUT_MS",
                check_defaults.timeout.as_millis() as u64,
            )?),
            fallback_available_ratio: parse_or(
                get("FALLBACK_AVAILABLE_RATIO"),
                "FALLBACK_AVAILABLE_RATIO",
                check_defaults.fallback_available_ratio,
            )?,
        };
        if !(0.0..=1.0).contains(&check.fallback_available_ratio) {
            return Err(config_error!("FALLBACK_AVAILABLE_RATIO must be between 0 and 1"));
        }

        let registry = match get("REGISTRY_BACKEND") {
            Some(value) => value.parse()?,
            None => RegistryBackend::DomainsDb,
        };
        if registry == RegistryBackend::Rdap && !cfg!(feature = "rdap") {
            return Err(config_error!("REGISTRY_BACKEND=rdap requires the `rdap` feature"));
        }

        Ok(Self {
            bind_addr,
            log_level: get("RUST_LOG").unwrap_or("info").to_string(),
            llm,
            generation,
            check,
            registry,
            domainsdb_url: get("DOMAINSDB_URL").map(str::to_string),
            image_api_key: openai_key,
            image_model: get("IMAGE_MODEL").unwrap_or("dall-e-3").to_string(),
            image_base_url: openai_base,
            logo_count: parse_or(get("LOGO_COUNT"), "LOGO_COUNT", 4)?,
        })
    }
}

fn parse_or<T>(value: Option<&str>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|e| config_error!("Invalid value for {}: '{}' ({})", key, raw, e)),
        None => Ok(default),
    }
}
