//! HTTP gateway for legacy DDNS clients
//!
//! `GET /update` and `POST /update` take `record`, `value`, `username`,
//! `password` and an optional `provider`, and answer `200 text/plain` with
//! one status token. Failures are encoded in the body, never in the HTTP
//! status, because consumer devices only read the body.
//!
//! Some devices can only send GET, others only POST, so both verbs share
//! one handler. POST bodies (`application/x-www-form-urlencoded`) take
//! precedence over the query string.

use axum::Router;
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Query, State};
use axum::routing::get;
use ddns_relay_core::{ProviderRegistry, StatusCode, UpdateRequest};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Path consumer devices are configured with
pub const UPDATE_PATH: &str = "/update";

/// Raw parameters of an update request
#[derive(Default, Deserialize)]
pub struct UpdateParams {
    record: Option<String>,
    value: Option<String>,
    username: Option<String>,
    password: Option<String>,
    provider: Option<String>,
}

impl UpdateParams {
    /// Fill fields missing from `self` with those from `fallback`
    fn or(self, fallback: UpdateParams) -> UpdateParams {
        UpdateParams {
            record: self.record.or(fallback.record),
            value: self.value.or(fallback.value),
            username: self.username.or(fallback.username),
            password: self.password.or(fallback.password),
            provider: self.provider.or(fallback.provider),
        }
    }

    /// Split into the provider selector and the update request
    ///
    /// Returns `None` when any required field is absent or empty.
    fn into_request(self) -> Option<(Option<String>, UpdateRequest)> {
        let required = |field: Option<String>| field.filter(|v| !v.is_empty());

        let request = UpdateRequest::new(
            required(self.record)?,
            required(self.value)?,
            required(self.username)?,
            required(self.password)?,
        );
        Some((self.provider, request))
    }
}

/// Build the gateway router
pub fn router(registry: Arc<ProviderRegistry>) -> Router {
    Router::new()
        .route(UPDATE_PATH, get(update).post(update))
        .with_state(registry)
}

async fn update(
    State(registry): State<Arc<ProviderRegistry>>,
    query: Result<Query<UpdateParams>, QueryRejection>,
    form: Result<Form<UpdateParams>, FormRejection>,
) -> String {
    let query = query.map(|Query(params)| params).unwrap_or_default();
    let params = match form {
        Ok(Form(body)) => body.or(query),
        Err(_) => query,
    };

    respond(&registry, params).await.to_string()
}

async fn respond(registry: &ProviderRegistry, params: UpdateParams) -> StatusCode {
    let Some((selector, request)) = params.into_request() else {
        warn!("Update request is missing required fields");
        return StatusCode::NoHost;
    };

    let Some(provider) = registry.resolve(selector.as_deref()) else {
        warn!(
            "No provider for selector {:?} (installed: {:?})",
            selector,
            registry.list_providers()
        );
        return StatusCode::BadAgent;
    };

    info!(
        "Update request for {} via {}",
        request.record,
        provider.provider_name()
    );
    provider.update_record(&request).await
}
