//! RDAP registry lookups.
//!
//! Exact-match alternative to the domainsdb search: a 404 from the TLD's
//! RDAP server means the domain is unregistered.

use crate::availability::DomainRegistry;
use crate::error::{BrandForgeError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Get the RDAP base URL for a TLD (lowercase, without leading dot).
///
/// Returned URL ends with `/`.
pub fn rdap_base_url(tld: &str) -> Option<&'static str> {
    match tld {
        "com" => Some("https://rdap.verisign.com/com/v1/"),
        "net" => Some("https://rdap.verisign.com/net/v1/"),
        "org" => Some("https://rdap.org.org/"),
        "io" => Some("https://rdap.nic.io/"),
        "ai" => Some("https://rdap.nic.ai/"),
        "co" => Some("https://rdap.nic.co/"),
        _ => None,
    }
}

/// Registry backed by per-TLD RDAP servers
pub struct RdapRegistry {
    client: Client,
    base_override: Option<String>,
}

impl RdapRegistry {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_override: None,
        }
    }

    /// Send every query to one server regardless of TLD
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self {
            client,
            base_override: Some(base),
        }
    }

    fn domain_url(&self, label: &str, tld: &str) -> Result<String> {
        let base = match &self.base_override {
            Some(base) => base.as_str(),
            None => rdap_base_url(tld).ok_or_else(|| {
                BrandForgeError::internal(format!("No RDAP server known for TLD: {}", tld))
            })?,
        };
        Ok(format!("{}domain/{}.{}", base, label, tld))
    }
}

#[async_trait]
impl DomainRegistry for RdapRegistry {
    async fn is_unregistered(&self, label: &str, tld: &str) -> Result<bool> {
        let url = self.domain_url(label, tld)?;
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            Ok(true)
        } else if status.is_success() {
            Ok(false)
        } else {
            Err(BrandForgeError::network(
                format!("RDAP request failed with status {}", status),
                Some(status.as_u16()),
                Some(url),
            ))
        }
    }

    fn name(&self) -> &'static str {
        "rdap"
    }
}
