//! Configuration types for the DDNS relay
//!
//! The daemon fills these from environment variables; library users can
//! build or deserialize them directly.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Cloudflare API v4 base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4/";

/// Default timeout for every provider API call (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// DNS provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Cloudflare provider
    Cloudflare {
        /// Default zone name (e.g. "example.com"); a request's username overrides it
        #[serde(default)]
        zone: Option<String>,
        /// Fallback API token; a request's password overrides it
        #[serde(default)]
        api_token: Option<String>,
        /// API base URL
        #[serde(default = "default_cloudflare_endpoint")]
        endpoint: String,
        /// Timeout applied to each API call
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

impl ProviderConfig {
    /// Cloudflare configuration with the public API endpoint and default timeout
    pub fn cloudflare(zone: Option<String>, api_token: Option<String>) -> Self {
        ProviderConfig::Cloudflare {
            zone,
            api_token,
            endpoint: default_cloudflare_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Cloudflare {
                endpoint,
                timeout_secs,
                ..
            } => {
                parse_endpoint(endpoint)?;
                if *timeout_secs == 0 {
                    return Err(crate::Error::config("Provider timeout must be > 0"));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Cloudflare { .. } => "cloudflare",
        }
    }

    /// Timeout applied to each provider API call
    pub fn timeout(&self) -> Duration {
        match self {
            ProviderConfig::Cloudflare { timeout_secs, .. } => Duration::from_secs(*timeout_secs),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::cloudflare(None, None)
    }
}

/// Parse an API base URL
///
/// The result always ends with `/` so relative paths join beneath it
/// instead of replacing the last segment.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, crate::Error> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| crate::Error::config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

    if url.host_str().is_none() {
        return Err(crate::Error::config(format!(
            "Endpoint has no host: {}",
            endpoint
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn default_cloudflare_endpoint() -> String {
    CLOUDFLARE_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
