//! Core types and structures for brand-forge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Availability channel attached to every candidate name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Com,
    Ai,
    Instagram,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Com, Channel::Ai, Channel::Instagram];

    /// TLD used for the registry lookup of this channel.
    ///
    /// Social handles have no registry; the `.com` lookup stands in for them.
    pub fn registry_tld(self) -> &'static str {
        match self {
            Channel::Com | Channel::Instagram => "com",
            Channel::Ai => "ai",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Com => write!(f, "com"),
            Channel::Ai => write!(f, "ai"),
            Channel::Instagram => write!(f, "instagram"),
        }
    }
}

/// Outcome of one availability lookup.
///
/// Both variants carry the boolean the caller sees; the variant records
/// whether the registry answered or the value was guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Live(bool),
    Fallback(bool),
}

impl Availability {
    pub fn is_available(self) -> bool {
        match self {
            Availability::Live(v) | Availability::Fallback(v) => v,
        }
    }

    pub fn is_live(self) -> bool {
        matches!(self, Availability::Live(_))
    }
}

/// Candidate name with per-channel availability hints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandNameRecord {
    pub name: String,
    pub com_available: bool,
    pub ai_available: bool,
    pub ig_available: bool,
}

impl BrandNameRecord {
    /// Assemble a record from the three channel results
    pub fn new(
        name: impl Into<String>,
        com: Availability,
        ai: Availability,
        ig: Availability,
    ) -> Self {
        Self {
            name: name.into(),
            com_available: com.is_available(),
            ai_available: ai.is_available(),
            ig_available: ig.is_available(),
        }
    }
}

/// `POST /api/generate-names` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateNamesRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// `POST /api/generate-names` success body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateNamesResponse {
    pub names: Vec<BrandNameRecord>,
}

/// `POST /api/generate-logos` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateLogosRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

/// One generated logo image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    pub url: String,
    pub id: String,
}

/// `POST /api/generate-logos` success body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateLogosResponse {
    pub logos: Vec<Logo>,
}

/// Configuration for name generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub count: usize,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            count: 5,
            temperature: 0.8,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Configuration for availability checking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    pub timeout: Duration,
    /// Probability that a guessed result reports "available"
    pub fallback_available_ratio: f64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(3000),
            fallback_available_ratio: 0.7,
        }
    }
}

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: String::new(),
            base_url: None,
        }
    }
}

/// Process-wide counters, shared behind an `Arc`
#[derive(Debug)]
pub struct ServiceMetrics {
    started_at: DateTime<Utc>,
    generations: AtomicU64,
    upstream_errors: AtomicU64,
    live_checks: AtomicU64,
    fallback_checks: AtomicU64,
    logos_generated: AtomicU64,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            generations: AtomicU64::new(0),
            upstream_errors: AtomicU64::new(0),
            live_checks: AtomicU64::new(0),
            fallback_checks: AtomicU64::new(0),
            logos_generated: AtomicU64::new(0),
        }
    }

    pub fn increment_generations(&self) {
        self.generations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_upstream_errors(&self) {
        self.upstream_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_check(&self, availability: Availability) {
        if availability.is_live() {
            self.live_checks.fetch_add(1, Ordering::Relaxed);
        } else {
            self.fallback_checks.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn add_logos(&self, count: usize) {
        self.logos_generated.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            started_at: self.started_at,
            generations: self.generations.load(Ordering::Relaxed),
            upstream_errors: self.upstream_errors.load(Ordering::Relaxed),
            live_checks: self.live_checks.load(Ordering::Relaxed),
            fallback_checks: self.fallback_checks.load(Ordering::Relaxed),
            logos_generated: self.logos_generated.load(Ordering::Relaxed),
        }
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`ServiceMetrics`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub started_at: DateTime<Utc>,
    pub generations: u64,
    pub upstream_errors: u64,
    pub live_checks: u64,
    pub fallback_checks: u64,
    pub logos_generated: u64,
}

impl MetricsSnapshot {
    /// Share of availability checks answered by a registry
    pub fn live_ratio(&self) -> f64 {
        let total = self.live_checks + self.fallback_checks;
        if total == 0 {
            0.0
        } else {
            self.live_checks as f64 / total as f64
        }
    }
}
