//! Shared fixtures for Cloudflare adapter contract tests
//!
//! Every test runs against a `wiremock` server standing in for the
//! Cloudflare API. Mocks carry call-count expectations which are verified
//! when the server is dropped.

#![allow(dead_code)]

use ddns_relay_cloudflare::CloudflareProvider;
use ddns_relay_core::UpdateRequest;
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ZONE: &str = "example.com";
pub const ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
pub const RECORD: &str = "home.example.com";
pub const RECORD_ID: &str = "372e67954025e0ba6aaa6d586b9e0b59";
pub const VALUE: &str = "203.0.113.7";
pub const TOKEN: &str = "test-token";

/// Cloudflare list envelope with one result per ID
pub fn list_body(ids: &[&str]) -> Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": ids.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>(),
    })
}

/// Adapter pointed at the mock server, default zone `example.com`, no token
pub fn provider_for(server: &MockServer) -> CloudflareProvider {
    provider_with_timeout(server, Duration::from_secs(5))
}

/// Same as [`provider_for`] with a custom timeout
pub fn provider_with_timeout(server: &MockServer, timeout: Duration) -> CloudflareProvider {
    CloudflareProvider::new(
        &format!("{}/client/v4", server.uri()),
        Some(ZONE.to_string()),
        None,
        timeout,
    )
    .expect("provider construction succeeds")
}

/// The usual request: default zone, password as token
pub fn update_request() -> UpdateRequest {
    UpdateRequest::new(RECORD, VALUE, "", TOKEN)
}

/// Mock `GET /zones?name=<zone>`
pub fn zone_lookup(zone: &str) -> wiremock::MockBuilder {
    Mock::given(method("GET"))
        .and(path("/client/v4/zones"))
        .and(query_param("name", zone))
}

/// Mock `GET /zones/<zone_id>/dns_records?name=<record>&type=A`
pub fn record_lookup(zone_id: &str, record: &str) -> wiremock::MockBuilder {
    Mock::given(method("GET"))
        .and(path(format!("/client/v4/zones/{}/dns_records", zone_id)))
        .and(query_param("name", record))
        .and(query_param("type", "A"))
}

/// Mock `PUT /zones/<zone_id>/dns_records/<record_id>` with the expected body
pub fn upsert(zone_id: &str, record_id: &str, record: &str, value: &str) -> wiremock::MockBuilder {
    Mock::given(method("PUT"))
        .and(path(format!(
            "/client/v4/zones/{}/dns_records/{}",
            zone_id, record_id
        )))
        .and(body_json(json!({
            "type": "A",
            "name": record,
            "content": value,
            "ttl": 1,
            "proxied": false,
        })))
}

/// Mount the full happy path for `times` updates
///
/// Lookups are expected exactly once: later calls must hit the cache.
pub async fn mount_happy_path(server: &MockServer, times: u64) {
    zone_lookup(ZONE)
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&[ZONE_ID])))
        .expect(1)
        .mount(server)
        .await;

    record_lookup(ZONE_ID, RECORD)
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&[RECORD_ID])))
        .expect(1)
        .mount(server)
        .await;

    upsert(ZONE_ID, RECORD_ID, RECORD, VALUE)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(times)
        .mount(server)
        .await;
}

/// Number of requests the mock server has seen
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}
