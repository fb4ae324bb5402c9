//! Error handling for brand-forge

use thiserror::Error;

/// Coarse error classes surfaced to HTTP callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    Upstream,
    Internal,
}

/// Main error type for brand-forge
#[derive(Error, Debug, Clone)]
pub enum BrandForgeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{message}")]
    InvalidRequest { message: String },

    #[error("Upstream error ({provider}): {message}")]
    Upstream {
        provider: String,
        message: String,
        status_code: Option<u16>,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BrandForgeError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create an upstream provider error
    pub fn upstream(
        provider: impl Into<String>,
        message: impl Into<String>,
        status_code: Option<u16>,
    ) -> Self {
        Self::Upstream {
            provider: provider.into(),
            message: message.into(),
            status_code,
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Wrap any failure of an upstream call as an `Upstream` error for `provider`.
    ///
    /// Already-classified upstream errors pass through untouched.
    pub fn into_upstream(self, provider: &str) -> Self {
        match self {
            Self::Upstream { .. } => self,
            Self::Network {
                message,
                status_code,
                ..
            } => Self::upstream(provider, message, status_code),
            other => Self::upstream(provider, other.to_string(), None),
        }
    }

    /// Classify for the HTTP boundary
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            Self::Upstream { .. } | Self::Network { .. } | Self::Timeout { .. } => {
                ErrorKind::Upstream
            }
            Self::Config { .. } | Self::Parse { .. } | Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("Configuration problem: {}. Check your .env file or environment", message)
            }
            Self::InvalidRequest { message } => message.clone(),
            Self::Upstream { provider, message, .. } => {
                format!("AI provider ({}) failed: {}. Please try again", provider, message)
            }
            Self::Network { message, status_code, .. } => {
                let status = status_code.map_or(String::new(), |c| format!(" ({})", c));
                format!("Network error{}: {}", status, message)
            }
            Self::Timeout {
                operation,
                timeout_ms,
            } => format!(
                "'{}' timed out after {}ms. Please try again",
                operation, timeout_ms
            ),
            Self::Parse { message, .. } => format!("Unexpected response: {}", message),
            Self::Internal { message } => format!("Internal error: {}", message),
        }
    }
}

impl From<reqwest::Error> for BrandForgeError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::network("Request timed out", status_code, url)
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<serde_json::Error> for BrandForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for BrandForgeError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BrandForgeError>;

#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::BrandForgeError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::BrandForgeError::config(format!($fmt, $($arg)*))
    };
}
