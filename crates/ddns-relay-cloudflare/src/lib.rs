// # Cloudflare Provider Adapter
//
// This crate translates legacy DDNS update requests into Cloudflare API v4
// calls and maps the outcome back to the legacy status vocabulary.
//
// ## Flow
//
// `PRECHECK → RESOLVE_ZONE → RESOLVE_RECORD → UPSERT`, each step at most once
// per call and no retries. Any step can end the call with an error status.
//
// ## Caching
//
// Zone IDs are cached by zone name and record IDs by zone ID + record name,
// for the lifetime of the adapter. Entries are never evicted.
//
// ## Security Requirements
//
// - API tokens NEVER appear in logs or `Debug` output
// - Tokens are request-scoped: a request's password is used for that call only
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones?name=...`
// - List DNS Records: GET `/zones/:zone_id/dns_records?name=...&type=A`
// - Update DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`

use async_trait::async_trait;
use ddns_relay_core::config::{ProviderConfig, parse_endpoint};
use ddns_relay_core::precheck;
use ddns_relay_core::traits::{Credentials, DnsProvider, DnsProviderFactory, UpdateRequest};
use ddns_relay_core::{Error, IdCache, ProviderRegistry, Result, StatusCode};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

const PROVIDER_NAME: &str = "cloudflare";

/// Cloudflare API documentation
pub const DOCS_URL: &str = "https://developers.cloudflare.com/api/";

/// The only record type this adapter manages
const RECORD_TYPE: &str = "A";

/// `ttl: 1` means "automatic" to Cloudflare
const AUTOMATIC_TTL: u32 = 1;

/// Envelope of the list endpoints (`/zones`, `/zones/:id/dns_records`)
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    result: Option<Vec<ListEntry>>,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    #[serde(default)]
    id: String,
}

/// Body of the record upsert
#[derive(Debug, Serialize)]
struct RecordPayload<'a> {
    #[serde(rename = "type")]
    record_type: &'a str,
    name: &'a str,
    content: &'a str,
    ttl: u32,
    proxied: bool,
}

/// Cloudflare provider adapter
///
/// One instance is shared by every gateway request. The only mutable state
/// is the pair of ID caches; credentials travel with each call.
pub struct CloudflareProvider {
    /// API base URL, always ending with `/`
    endpoint: Url,

    /// Zone used when the request carries no username
    zone: Option<String>,

    /// Token used when the request carries no password
    /// ⚠️ NEVER log this value
    api_token: Option<String>,

    /// HTTP client with the bounded per-call timeout
    client: reqwest::Client,

    /// Zone name → zone ID
    zone_ids: IdCache,

    /// "zone ID/record name" → record ID
    record_ids: IdCache,
}

// Custom Debug implementation that hides the API token
impl fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("endpoint", &self.endpoint.as_str())
            .field("zone", &self.zone)
            .field("api_token", &self.api_token.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare adapter
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g. `https://api.cloudflare.com/client/v4/`)
    /// - `zone`: Default zone name, overridden per call by the request's username
    /// - `api_token`: Fallback token, overridden per call by the request's password
    /// - `timeout`: Applied to every API call
    pub fn new(
        endpoint: &str,
        zone: Option<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let endpoint = parse_endpoint(endpoint)?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            zone: zone.filter(|z| !z.is_empty()),
            api_token: api_token.filter(|t| !t.is_empty()),
            client,
            zone_ids: IdCache::new(),
            record_ids: IdCache::new(),
        })
    }

    /// Build an adapter from its configuration
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        match config {
            ProviderConfig::Cloudflare {
                zone,
                api_token,
                endpoint,
                ..
            } => Self::new(endpoint, zone.clone(), api_token.clone(), config.timeout()),
        }
    }

    /// Number of zone IDs cached so far
    pub async fn cached_zones(&self) -> usize {
        self.zone_ids.len().await
    }

    /// Number of record IDs cached so far
    pub async fn cached_records(&self) -> usize {
        self.record_ids.len().await
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.endpoint
            .join(path)
            .map_err(|e| Error::invalid_input(format!("Invalid API path '{}': {}", path, e)))
    }

    fn authorized(
        &self,
        builder: reqwest::RequestBuilder,
        credentials: &Credentials,
    ) -> reqwest::RequestBuilder {
        match credentials.api_token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Get the zone ID for the zone named in `credentials`
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones?name=example.com
    /// Authorization: Bearer <token>
    /// ```
    async fn zone_id(&self, credentials: &Credentials) -> Result<String> {
        if let Some(zone_id) = self.zone_ids.get(&credentials.zone).await {
            tracing::debug!("Using cached zone ID for {}", credentials.zone);
            return Ok(zone_id);
        }

        tracing::debug!("Looking up zone ID for: {}", credentials.zone);

        let request = self
            .client
            .get(self.url("zones")?)
            .query(&[("name", credentials.zone.as_str())]);

        let zone_id = self
            .list_single_id(request, credentials, "zone", &credentials.zone)
            .await?;

        self.zone_ids.insert(&credentials.zone, &zone_id).await;
        tracing::info!("Zone ID cached for {}", credentials.zone);
        Ok(zone_id)
    }

    /// Get the ID of the A record `record` within `zone_id`
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones/:zone_id/dns_records?name=home.example.com&type=A
    /// Authorization: Bearer <token>
    /// ```
    async fn record_id(
        &self,
        zone_id: &str,
        record: &str,
        credentials: &Credentials,
    ) -> Result<String> {
        let key = format!("{}/{}", zone_id, record);
        if let Some(record_id) = self.record_ids.get(&key).await {
            tracing::debug!("Using cached record ID for {}", record);
            return Ok(record_id);
        }

        tracing::debug!("Looking up record ID: {} (type: {})", record, RECORD_TYPE);

        let request = self
            .client
            .get(self.url(&format!("zones/{}/dns_records", zone_id))?)
            .query(&[("name", record), ("type", RECORD_TYPE)]);

        let record_id = self
            .list_single_id(request, credentials, "record", record)
            .await?;

        self.record_ids.insert(key, &record_id).await;
        tracing::info!("Record ID cached for {}", record);
        Ok(record_id)
    }

    /// Send a list request and extract the ID of its single result
    ///
    /// Zero or several matches are both "not found": the adapter refuses to
    /// guess which entry the consumer meant.
    async fn list_single_id(
        &self,
        request: reqwest::RequestBuilder,
        credentials: &Credentials,
        kind: &str,
        name: &str,
    ) -> Result<String> {
        let response = self
            .authorized(request, credentials)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if matches!(status.as_u16(), 401 | 403) {
            tracing::error!("Token rejected while looking up {} {}", kind, name);
            return Err(Error::auth(format!(
                "Invalid API token or insufficient permissions. Status: {}",
                status
            )));
        }
        if !status.is_success() {
            tracing::error!("Lookup of {} {} failed: {}", kind, name, status);
            return Err(Error::unexpected_status(PROVIDER_NAME, status.as_u16()));
        }

        let body: ListResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                transport_error(e)
            } else {
                Error::provider(PROVIDER_NAME, format!("Failed to parse response: {}", e))
            }
        })?;
        tracing::debug!("{} lookup response: {:?}", kind, body);

        let mut entries = body.result.unwrap_or_default();
        match (entries.pop(), entries.is_empty()) {
            (Some(entry), true) if !entry.id.is_empty() => {
                tracing::debug!("Found {} ID for {}", kind, name);
                Ok(entry.id)
            }
            (None, _) => {
                tracing::error!("Can't find ID of {} {}", kind, name);
                Err(Error::not_found(format!("No {} named {}", kind, name)))
            }
            _ => {
                tracing::error!("Can't find a unique ID of {} {}", kind, name);
                Err(Error::not_found(format!("No unique {} named {}", kind, name)))
            }
        }
    }

    /// Set the A record `record_id` to `request.value`
    ///
    /// # API Call
    ///
    /// ```http
    /// PUT /zones/:zone_id/dns_records/:record_id
    /// {"type": "A", "name": "...", "content": "...", "ttl": 1, "proxied": false}
    /// ```
    async fn put_record(
        &self,
        zone_id: &str,
        record_id: &str,
        request: &UpdateRequest,
        credentials: &Credentials,
    ) -> Result<StatusCode> {
        let payload = RecordPayload {
            record_type: RECORD_TYPE,
            name: &request.record,
            content: &request.value,
            ttl: AUTOMATIC_TTL,
            proxied: false,
        };
        tracing::debug!("Upsert payload: {:?}", payload);

        let builder = self
            .client
            .put(self.url(&format!("zones/{}/dns_records/{}", zone_id, record_id))?)
            .json(&payload);

        let response = self
            .authorized(builder, credentials)
            .send()
            .await
            .map_err(transport_error)?;

        let status = StatusCode::from_http_status(response.status().as_u16());
        if !status.is_success() {
            tracing::error!(
                "Cloudflare rejected update of {}: {} -> {}",
                request.record,
                response.status(),
                status
            );
        }
        Ok(status)
    }

    async fn try_update(&self, request: &UpdateRequest) -> Result<StatusCode> {
        self.pre_check(&request.record).await?;
        tracing::info!("Arguments check passed for {}", request.record);

        let credentials = Credentials::for_request(
            request,
            self.zone.as_deref(),
            self.api_token.as_deref(),
        )
        .ok_or_else(|| Error::not_found("No zone configured and no username supplied"))?;

        let zone_id = self.zone_id(&credentials).await?;
        let record_id = self
            .record_id(&zone_id, &request.record, &credentials)
            .await?;

        self.put_record(&zone_id, &record_id, request, &credentials)
            .await
    }
}

/// Classify a reqwest failure
///
/// Timeouts and connect failures are `badconn`; anything else is
/// unclassified.
fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() || e.is_connect() {
        tracing::error!("Request to Cloudflare timed out or failed to connect: {}", e);
        Error::connection(e.to_string())
    } else {
        tracing::error!("Request to Cloudflare failed: {}", e);
        Error::http(e.to_string())
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    async fn update_record(&self, request: &UpdateRequest) -> StatusCode {
        tracing::info!(
            "Updating Cloudflare DNS record: {} -> {}",
            request.record,
            request.value
        );

        match self.try_update(request).await {
            Ok(status) => {
                tracing::info!("Update of {} finished: {}", request.record, status);
                status
            }
            Err(e @ (Error::Resolve(_) | Error::NotFqdn(_))) => {
                tracing::warn!("Pre check error: {}", e);
                e.status_code()
            }
            Err(e) => {
                let status = e.status_code();
                tracing::error!("Update of {} failed: {} -> {}", request.record, e, status);
                status
            }
        }
    }

    async fn check_endpoint(&self) -> Result<()> {
        precheck::check_endpoint(&self.endpoint).await
    }

    fn docs_url(&self) -> &'static str {
        DOCS_URL
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Factory for creating Cloudflare adapters
pub struct CloudflareFactory;

impl DnsProviderFactory for CloudflareFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Arc<dyn DnsProvider>> {
        let provider = CloudflareProvider::from_config(config)?;

        if provider.zone.is_none() {
            tracing::warn!("No default Cloudflare zone configured; every request must carry a username");
        }

        Ok(Arc::new(provider))
    }
}

/// Register the Cloudflare factory with a registry
///
/// # Example
///
/// ```rust
/// use ddns_relay_core::ProviderRegistry;
///
/// let mut registry = ProviderRegistry::new();
/// ddns_relay_cloudflare::register(&mut registry);
/// assert!(registry.has_factory("cloudflare"));
/// ```
pub fn register(registry: &mut ProviderRegistry) {
    registry.register_factory(PROVIDER_NAME, Box::new(CloudflareFactory));
}
