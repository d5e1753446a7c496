//! Contract Test: Request-Scoped Credentials
//!
//! Constraints verified:
//! - A request's password is the bearer token for every call it makes
//! - The configured token is the fallback when no password is given
//! - A request's username replaces the configured zone
//! - Concurrent requests with different tokens never borrow each other's
//!
//! If this test fails, one tenant's token can leak into another's update.

mod common;

use common::*;
use ddns_relay_cloudflare::CloudflareProvider;
use ddns_relay_core::{DnsProvider, StatusCode, UpdateRequest};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::header;
use wiremock::{MockServer, ResponseTemplate};

#[tokio::test]
async fn password_is_bearer_token_for_every_call() {
    let server = MockServer::start().await;
    let auth = format!("Bearer {}", TOKEN);

    zone_lookup(ZONE)
        .and(header("authorization", auth.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&[ZONE_ID])))
        .expect(1)
        .mount(&server)
        .await;
    record_lookup(ZONE_ID, RECORD)
        .and(header("authorization", auth.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&[RECORD_ID])))
        .expect(1)
        .mount(&server)
        .await;
    upsert(ZONE_ID, RECORD_ID, RECORD, VALUE)
        .and(header("authorization", auth.as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let status = provider_for(&server).update_record(&update_request()).await;
    assert_eq!(status, StatusCode::Good);
}

#[tokio::test]
async fn configured_token_is_fallback() {
    let server = MockServer::start().await;

    zone_lookup(ZONE)
        .and(header("authorization", "Bearer configured"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&[ZONE_ID])))
        .expect(1)
        .mount(&server)
        .await;
    record_lookup(ZONE_ID, RECORD)
        .and(header("authorization", "Bearer configured"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&[RECORD_ID])))
        .expect(1)
        .mount(&server)
        .await;
    upsert(ZONE_ID, RECORD_ID, RECORD, VALUE)
        .and(header("authorization", "Bearer configured"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let provider = CloudflareProvider::new(
        &format!("{}/client/v4", server.uri()),
        Some(ZONE.to_string()),
        Some("configured".to_string()),
        Duration::from_secs(5),
    )
    .unwrap();

    let request = UpdateRequest::new(RECORD, VALUE, "", "");
    assert_eq!(provider.update_record(&request).await, StatusCode::Good);
}

#[tokio::test]
async fn username_overrides_configured_zone() {
    let server = MockServer::start().await;

    zone_lookup("example.net")
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&["zone-net"])))
        .expect(1)
        .mount(&server)
        .await;
    zone_lookup(ZONE)
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&[ZONE_ID])))
        .expect(0)
        .mount(&server)
        .await;
    record_lookup("zone-net", "vpn.example.net")
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&["record-net"])))
        .expect(1)
        .mount(&server)
        .await;
    upsert("zone-net", "record-net", "vpn.example.net", VALUE)
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = UpdateRequest::new("vpn.example.net", VALUE, "example.net", TOKEN);
    assert_eq!(provider.update_record(&request).await, StatusCode::Good);
}

#[tokio::test]
async fn concurrent_tokens_stay_separate() {
    let server = MockServer::start().await;

    // Lookups may race and run twice; only the upserts are counted
    zone_lookup(ZONE)
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&[ZONE_ID])))
        .mount(&server)
        .await;
    record_lookup(ZONE_ID, RECORD)
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(&[RECORD_ID])))
        .mount(&server)
        .await;
    for token in ["alpha", "beta"] {
        upsert(ZONE_ID, RECORD_ID, RECORD, VALUE)
            .and(header("authorization", format!("Bearer {}", token).as_str()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    let provider = Arc::new(provider_for(&server));
    let alpha = UpdateRequest::new(RECORD, VALUE, "", "alpha");
    let beta = UpdateRequest::new(RECORD, VALUE, "", "beta");

    let (first, second) = tokio::join!(
        provider.update_record(&alpha),
        provider.update_record(&beta)
    );

    assert_eq!(first, StatusCode::Good);
    assert_eq!(second, StatusCode::Good);
}
