//! Environment configuration for the relay daemon

use anyhow::{Context, Result};
use ddns_relay_core::ProviderConfig;
use ddns_relay_core::config::{CLOUDFLARE_API_BASE, DEFAULT_TIMEOUT_SECS};
use std::env;
use std::fmt;
use std::net::SocketAddr;

/// Default listen address
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";

/// Application configuration
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub provider_type: String,
    pub cloudflare_zone: Option<String>,
    pub cloudflare_api_token: Option<String>,
    pub cloudflare_endpoint: String,
    pub timeout_secs: u64,
}

// Custom Debug implementation that hides the API token
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("listen_addr", &self.listen_addr)
            .field("log_level", &self.log_level)
            .field("provider_type", &self.provider_type)
            .field("cloudflare_zone", &self.cloudflare_zone)
            .field(
                "cloudflare_api_token",
                &self.cloudflare_api_token.as_ref().map(|_| "<REDACTED>"),
            )
            .field("cloudflare_endpoint", &self.cloudflare_endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key → value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match non_empty("DDNS_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DDNS_TIMEOUT_SECS is not a number: {}", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            listen_addr: non_empty("DDNS_LISTEN_ADDR")
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
            log_level: non_empty("DDNS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            provider_type: non_empty("DDNS_PROVIDER_TYPE")
                .unwrap_or_else(|| "cloudflare".to_string()),
            cloudflare_zone: non_empty("DDNS_CLOUDFLARE_ZONE"),
            cloudflare_api_token: non_empty("DDNS_CLOUDFLARE_API_TOKEN"),
            cloudflare_endpoint: non_empty("DDNS_CLOUDFLARE_ENDPOINT")
                .unwrap_or_else(|| CLOUDFLARE_API_BASE.to_string()),
            timeout_secs,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "DDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        match self.provider_type.as_str() {
            "cloudflare" => {}
            _ => anyhow::bail!(
                "DDNS_PROVIDER_TYPE '{}' is not supported. \
                Supported providers: cloudflare",
                self.provider_type
            ),
        }

        if !(1..=300).contains(&self.timeout_secs) {
            anyhow::bail!(
                "DDNS_TIMEOUT_SECS must be between 1 and 300 seconds. Got: {}",
                self.timeout_secs
            );
        }

        // Check for obvious placeholder tokens (common mistake)
        if let Some(token) = &self.cloudflare_api_token {
            let token_lower = token.to_lowercase();
            if token_lower.contains("your_token") || token_lower.contains("replace_me") {
                anyhow::bail!(
                    "DDNS_CLOUDFLARE_API_TOKEN appears to be a placeholder. \
                    Use an actual API token or leave it unset and pass one per request."
                );
            }
        }

        if let Some(zone) = &self.cloudflare_zone
            && !ddns_relay_core::precheck::is_fqdn(zone)
        {
            anyhow::bail!(
                "DDNS_CLOUDFLARE_ZONE must be a lowercase domain name. Got: {}",
                zone
            );
        }

        self.provider_config()
            .validate()
            .context("DDNS_CLOUDFLARE_ENDPOINT is invalid")?;

        Ok(())
    }

    /// Parsed listen address
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen_addr
            .parse()
            .with_context(|| format!("DDNS_LISTEN_ADDR is not a socket address: {}", self.listen_addr))
    }

    /// Provider configuration for the registry
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::Cloudflare {
            zone: self.cloudflare_zone.clone(),
            api_token: self.cloudflare_api_token.clone(),
            endpoint: self.cloudflare_endpoint.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
