//! Error types for the DDNS relay
//!
//! Every error a provider adapter can hit maps to exactly one legacy
//! [`StatusCode`] through [`Error::status_code`]. Adapters fold errors into
//! status codes at their boundary, so nothing unmapped reaches the gateway.

use crate::status::StatusCode;
use thiserror::Error;

/// Result type alias for DDNS relay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS relay
#[derive(Error, Debug)]
pub enum Error {
    /// The provider API hostname did not resolve
    #[error("Endpoint resolution failed: {0}")]
    Resolve(String),

    /// The record is not a fully-qualified domain name
    #[error("Not a fully-qualified domain name: {0}")]
    NotFqdn(String),

    /// Invalid input rejected before reaching the provider
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Zone or record not found (or not unique)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Connect failure or timeout talking to the provider
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Any other HTTP client error
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered with a status the caller did not expect
    #[error("Unexpected HTTP status {status} from {provider}")]
    UnexpectedStatus {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create an endpoint resolution error
    pub fn resolve(msg: impl Into<String>) -> Self {
        Self::Resolve(msg.into())
    }

    /// Create a "not an FQDN" error
    pub fn not_fqdn(record: impl Into<String>) -> Self {
        Self::NotFqdn(record.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an unexpected status error
    pub fn unexpected_status(provider: impl Into<String>, status: u16) -> Self {
        Self::UnexpectedStatus {
            provider: provider.into(),
            status,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Translate this error into the legacy status vocabulary
    ///
    /// Unexpected HTTP statuses go through the same table as upsert
    /// responses; everything unclassified becomes `911`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Resolve(_) => StatusCode::BadResolv,
            Error::NotFqdn(_) => StatusCode::NotFqdn,
            Error::InvalidInput(_) => StatusCode::BadAgent,
            Error::Authentication(_) => StatusCode::BadAuth,
            Error::NotFound(_) => StatusCode::NoHost,
            Error::RateLimited(_) => StatusCode::Abuse,
            Error::Connection(_) => StatusCode::BadConn,
            Error::UnexpectedStatus { status, .. } => StatusCode::from_http_status(*status),
            Error::Http(_) | Error::Json(_) | Error::Config(_) | Error::Provider { .. } => {
                StatusCode::ProviderError
            }
        }
    }
}
