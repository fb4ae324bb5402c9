//! Chat-completion provider implementations
//!
//! Each provider is implemented in its own module.

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

use crate::error::BrandForgeError;

/// Map a non-success provider status to an upstream error
pub(crate) fn status_error(
    provider: &str,
    status: reqwest::StatusCode,
    body: &str,
) -> BrandForgeError {
    let message = match status.as_u16() {
        401 => format!("Authentication failed (401). Please check your {} API key", provider),
        403 => "Access forbidden (403). Your API key may not have permission".to_string(),
        429 => "Rate limit exceeded (429). Please try again later".to_string(),
        500..=599 => format!("Server error ({}). The API service is experiencing issues", status),
        _ => format!("API request failed ({}): {}", status, body),
    };
    BrandForgeError::upstream(provider, message, Some(status.as_u16()))
}
