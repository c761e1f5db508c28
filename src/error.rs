//! Error handling for domain-muse

use thiserror::Error;

/// Main error type for domain-muse
#[derive(Error, Debug, Clone)]
pub enum DomainMuseError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("LLM provider error ({provider}): {message}")]
    LlmProvider {
        provider: crate::types::ProviderKind,
        message: String,
        status_code: Option<u16>,
    },

    #[error("No registry lookup service for TLD '{tld}'")]
    UnsupportedRegistry { tld: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Authentication error: {message}")]
    Authentication { message: String },

    #[error("Timeout error: {operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainMuseError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an LLM provider error
    pub fn llm_provider(
        provider: crate::types::ProviderKind,
        message: impl Into<String>,
        status_code: Option<u16>,
    ) -> Self {
        Self::LlmProvider {
            provider,
            message: message.into(),
            status_code,
        }
    }

    pub fn unsupported_registry(tld: impl Into<String>) -> Self {
        Self::UnsupportedRegistry { tld: tld.into() }
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

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the failure happened while talking to a registry.
    ///
    /// The resolver collapses every one of these into `Undetermined`.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedRegistry { .. }
                | Self::Network { .. }
                | Self::Timeout { .. }
                | Self::Io { .. }
        )
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or command line flags", message)
            }
            Self::LlmProvider { provider, message, .. } => {
                format!("❌ AI processing failed ({}): {}\n💡 Check your API key and rate limits", provider, message)
            }
            Self::UnsupportedRegistry { tld } => {
                format!("⚠️  No WHOIS service known for .{}", tld)
            }
            Self::Network { message, status_code, .. } => {
                let status = status_code.map_or(String::new(), |c| format!(" ({})", c));
                format!("❌ Network error{}: {}\n💡 Check your internet connection", status, message)
            }
            Self::Authentication { message } => {
                format!("❌ Authentication failed: {}\n💡 Verify your API key is correct", message)
            }
            Self::Timeout { operation, timeout_secs } => {
                format!("⏱️  Operation '{}' timed out after {}s\n💡 Try again or raise --timeout", operation, timeout_secs)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}\n💡 The model returned an unexpected format, try again", message)
            }
            Self::Validation { message } => {
                format!("❌ Invalid input: {}\n💡 Check your input format", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

impl From<reqwest::Error> for DomainMuseError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::timeout("HTTP request", 30)
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<serde_json::Error> for DomainMuseError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for DomainMuseError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

impl From<tokio::time::error::Elapsed> for DomainMuseError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::timeout("Operation", 30)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DomainMuseError>;

#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::DomainMuseError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DomainMuseError::validation(format!($fmt, $($arg)*))
    };
}
