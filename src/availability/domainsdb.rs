//! domainsdb.info search client

use crate::availability::DomainRegistry;
use crate::error::{BrandForgeError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.domainsdb.info/v1";

/// Registry backed by the domainsdb.info search API
pub struct DomainsDbRegistry {
    client: Client,
    base_url: String,
}

impl DomainsDbRegistry {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DomainRegistry for DomainsDbRegistry {
    async fn is_unregistered(&self, label: &str, tld: &str) -> Result<bool> {
        let url = format!("{}/domains/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("domain", label), ("tld", tld)])
            .send()
            .await?;

        let status = response.status();
        // domainsdb answers 404 when the search matches nothing
        if status == StatusCode::NOT_FOUND {
            return Ok(true);
        }
        if !status.is_success() {
            return Err(BrandForgeError::network(
                format!("domainsdb search failed with status {}", status),
                Some(status.as_u16()),
                Some(url),
            ));
        }

        let text = response.text().await?;
        let search: SearchResponse = serde_json::from_str(&text)
            .map_err(|e| BrandForgeError::parse(e.to_string(), Some(text)))?;

        Ok(search.domains.is_empty())
    }

    fn name(&self) -> &'static str {
        "domainsdb"
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    domains: Vec<serde_json::Value>,
}
