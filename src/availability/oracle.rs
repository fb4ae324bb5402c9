//! Availability oracle: bounded registry lookup with a randomized fallback

use crate::availability::{domain_label, DomainRegistry};
use crate::types::{Availability, Channel, CheckConfig, ServiceMetrics};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;

/// Answers "is this name probably free on this channel?".
///
/// Total over its input: timeouts, transport failures and malformed
/// payloads all collapse into a biased coin flip.
pub struct AvailabilityOracle {
    registry: Option<Arc<dyn DomainRegistry>>,
    config: CheckConfig,
    rng: Mutex<StdRng>,
    metrics: Arc<ServiceMetrics>,
}

impl AvailabilityOracle {
    /// Create an oracle over `registry`; `None` means every answer is a guess
    pub fn new(registry: Option<Arc<dyn DomainRegistry>>, config: CheckConfig) -> Self {
        Self::with_rng(registry, config, StdRng::from_entropy())
    }

    /// Create an oracle whose fallback guesses are reproducible
    pub fn with_seed(
        registry: Option<Arc<dyn DomainRegistry>>,
        config: CheckConfig,
        seed: u64,
    ) -> Self {
        Self::with_rng(registry, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        registry: Option<Arc<dyn DomainRegistry>>,
        mut config: CheckConfig,
        rng: StdRng,
    ) -> Self {
        config.fallback_available_ratio = if config.fallback_available_ratio.is_nan() {
            CheckConfig::default().fallback_available_ratio
        } else {
            config.fallback_available_ratio.clamp(0.0, 1.0)
        };
        Self {
            registry,
            config,
            rng: Mutex::new(rng),
            metrics: Arc::new(ServiceMetrics::new()),
        }
    }

    /// Report lookups into a shared metrics sink
    pub fn with_metrics(mut self, metrics: Arc<ServiceMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    pub fn registry_name(&self) -> Option<&'static str> {
        self.registry.as_ref().map(|r| r.name())
    }

    /// Check `name` on `channel`, recording whether the answer was live
    pub async fn check(&self, name: &str, channel: Channel) -> Availability {
        let result = self.lookup(name, channel).await;
        self.metrics.record_check(result);
        result
    }

    /// Collapsed boolean view of [`check`](Self::check)
    pub async fn is_available(&self, name: &str, channel: Channel) -> bool {
        self.check(name, channel).await.is_available()
    }

    async fn lookup(&self, name: &str, channel: Channel) -> Availability {
        let Some(registry) = &self.registry else {
            return self.fallback();
        };
        let Some(label) = domain_label(name) else {
            tracing::debug!(name = %name, "No usable domain label, guessing availability");
            return self.fallback();
        };

        let tld = channel.registry_tld();
        let start_time = Instant::now();

        match timeout(self.config.timeout, registry.is_unregistered(&label, tld)).await {
            Ok(Ok(available)) => {
                tracing::debug!(
                    label = %label,
                    tld = %tld,
                    channel = %channel,
                    registry = %registry.name(),
                    available = %available,
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Availability lookup completed"
                );
                Availability::Live(available)
            }
            Ok(Err(e)) => {
                tracing::debug!(
                    label = %label,
                    tld = %tld,
                    error = %e,
                    "Availability lookup failed, guessing"
                );
                self.fallback()
            }
            Err(_) => {
                tracing::debug!(
                    label = %label,
                    tld = %tld,
                    timeout_ms = %self.config.timeout.as_millis(),
                    "Availability lookup timed out, guessing"
                );
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> Availability {
        let guess = self.rng.lock().gen_bool(self.config.fallback_available_ratio);
        Availability::Fallback(guess)
    }
}
