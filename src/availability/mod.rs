//! Domain availability hints
//!
//! A [`DomainRegistry`] answers "is anything registered under this label?"
//! and the [`AvailabilityOracle`] wraps it with a timeout and a randomized
//! fallback so callers always get a boolean.

pub mod domainsdb;
pub mod label;
pub mod oracle;
#[cfg(feature = "rdap")]
pub mod rdap;

pub use domainsdb::DomainsDbRegistry;
pub use label::domain_label;
pub use oracle::AvailabilityOracle;
#[cfg(feature = "rdap")]
pub use rdap::RdapRegistry;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for domain registry lookups
#[async_trait]
pub trait DomainRegistry: Send + Sync {
    /// `Ok(true)` when no registered domain matches `label` under `tld`
    async fn is_unregistered(&self, label: &str, tld: &str) -> Result<bool>;

    /// Get the registry name
    fn name(&self) -> &'static str;
}

/// Get available registry backends
pub fn available_registries() -> Vec<&'static str> {
    let mut names = vec!["domainsdb", "none"];
    if cfg!(feature = "rdap") {
        names.insert(1, "rdap");
    }
    names
}
