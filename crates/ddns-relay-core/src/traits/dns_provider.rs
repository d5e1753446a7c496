// # DNS Provider Trait
//
// Defines the capability set every provider adapter implements.
//
// ## Implementations
//
// - Cloudflare: `ddns-relay-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_relay_core::{DnsProvider, UpdateRequest};
//
// let provider = /* DnsProvider implementation */;
// let request = UpdateRequest::new("home.example.com", "203.0.113.7", "example.com", "token");
//
// // Always a status token, never an error
// let status = provider.update_record(&request).await;
// println!("{}", status);
// ```

use async_trait::async_trait;
use std::fmt;

use crate::error::Result;
use crate::precheck;
use crate::status::StatusCode;

/// One inbound update, as received from the consumer device
#[derive(Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Fully-qualified record name (e.g. "home.example.com")
    pub record: String,
    /// Target address
    pub value: String,
    /// Zone override; empty means "use the configured zone"
    pub username: String,
    /// Bearer token; empty means "use the configured token"
    pub password: String,
}

impl UpdateRequest {
    /// Create a new update request
    pub fn new(
        record: impl Into<String>,
        value: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            record: record.into(),
            value: value.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// The zone override, if one was supplied
    pub fn username(&self) -> Option<&str> {
        Some(self.username.as_str()).filter(|s| !s.is_empty())
    }

    /// The bearer token, if one was supplied
    pub fn password(&self) -> Option<&str> {
        Some(self.password.as_str()).filter(|s| !s.is_empty())
    }
}

// The password is a provider token
impl fmt::Debug for UpdateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateRequest")
            .field("record", &self.record)
            .field("value", &self.value)
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

/// Credentials scoped to a single `update_record` call
///
/// Built from the request and the adapter's defaults, then passed down to
/// every provider call of that invocation. Never stored on the adapter.
#[derive(Clone)]
pub struct Credentials {
    /// Zone the record lives in
    pub zone: String,
    /// Bearer token, if any is available
    pub api_token: Option<String>,
}

impl Credentials {
    /// Resolve per-call credentials
    ///
    /// A supplied username replaces `default_zone`, a supplied password
    /// replaces `default_token`. Returns `None` when no zone is known.
    pub fn for_request(
        request: &UpdateRequest,
        default_zone: Option<&str>,
        default_token: Option<&str>,
    ) -> Option<Self> {
        let zone = request
            .username()
            .or(default_zone.filter(|z| !z.is_empty()))?;
        let api_token = request
            .password()
            .or(default_token.filter(|t| !t.is_empty()))
            .map(str::to_string);

        Some(Self {
            zone: zone.to_string(),
            api_token,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("zone", &self.zone)
            .field("api_token", &self.api_token.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

/// Trait for DNS provider adapters
///
/// An adapter encapsulates one provider's API shape: endpoint validation,
/// zone/record ID resolution, the record upsert and the translation of the
/// provider's answers into [`StatusCode`].
///
/// # Thread Safety
///
/// One adapter instance serves all concurrent gateway requests.
///
/// # Contract
///
/// - `update_record` never fails: every outcome is a [`StatusCode`].
/// - Each network step runs at most once per call. No retries.
/// - Credentials are request-scoped (see [`Credentials`]).
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Point `request.record` at `request.value`
    ///
    /// Implementations run [`DnsProvider::pre_check`] first, then resolve
    /// the zone and record IDs and issue the upsert.
    async fn update_record(&self, request: &UpdateRequest) -> StatusCode;

    /// Check that the provider's API hostname resolves
    async fn check_endpoint(&self) -> Result<()>;

    /// Check that `record` is something this provider can update
    fn check_fqdn(&self, record: &str) -> Result<()> {
        precheck::check_fqdn(record)
    }

    /// Run the prechecks in their fixed order: endpoint, then FQDN
    async fn pre_check(&self, record: &str) -> Result<()> {
        self.check_endpoint().await?;
        self.check_fqdn(record)
    }

    /// Where to read the provider's API documentation
    fn docs_url(&self) -> &'static str;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing DNS providers from configuration
pub trait DnsProviderFactory: Send + Sync {
    /// Create a DnsProvider instance from configuration
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<std::sync::Arc<dyn DnsProvider>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_are_not_supplied() {
        let request = UpdateRequest::new("home.example.com", "203.0.113.7", "", "");
        assert_eq!(request.username(), None);
        assert_eq!(request.password(), None);
    }

    #[test]
    fn test_username_overrides_zone() {
        let request = UpdateRequest::new("home.example.org", "203.0.113.7", "example.org", "");
        let creds = Credentials::for_request(&request, Some("example.com"), Some("default")).unwrap();
        assert_eq!(creds.zone, "example.org");
        assert_eq!(creds.api_token.as_deref(), Some("default"));
    }

    #[test]
    fn test_password_overrides_token() {
        let request = UpdateRequest::new("home.example.com", "203.0.113.7", "", "per-call");
        let creds = Credentials::for_request(&request, Some("example.com"), Some("default")).unwrap();
        assert_eq!(creds.zone, "example.com");
        assert_eq!(creds.api_token.as_deref(), Some("per-call"));
    }

    #[test]
    fn test_no_zone_anywhere() {
        let request = UpdateRequest::new("home.example.com", "203.0.113.7", "", "token");
        assert!(Credentials::for_request(&request, None, None).is_none());
        assert!(Credentials::for_request(&request, Some(""), None).is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let request = UpdateRequest::new("home.example.com", "203.0.113.7", "example.com", "s3cret");
        let creds = Credentials::for_request(&request, None, None).unwrap();

        assert!(!format!("{:?}", request).contains("s3cret"));
        assert!(!format!("{:?}", creds).contains("s3cret"));
    }
}
