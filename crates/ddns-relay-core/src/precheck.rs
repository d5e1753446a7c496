//! Checks that run before any provider API call
//!
//! Order matters to the consumer: the endpoint check runs first, then the
//! FQDN check. See [`crate::DnsProvider::pre_check`].

use crate::error::{Error, Result};
use url::Url;

/// Check that `record` is a lowercase fully-qualified domain name
///
/// Accepts one or more `label.` segments followed by a top-level label of at
/// least two ASCII letters. Labels are lowercase alphanumeric with internal
/// hyphens only. This mirrors `^([a-z0-9]+(-[a-z0-9]+)*\.)+[a-z]{2,}$`.
pub fn check_fqdn(record: &str) -> Result<()> {
    if is_fqdn(record) {
        Ok(())
    } else {
        Err(Error::not_fqdn(record))
    }
}

/// Boolean form of [`check_fqdn`]
pub fn is_fqdn(record: &str) -> bool {
    let Some((labels, tld)) = record.rsplit_once('.') else {
        return false;
    };

    if tld.len() < 2 || !tld.bytes().all(|b| b.is_ascii_lowercase()) {
        return false;
    }

    labels.split('.').all(is_label)
}

fn is_label(label: &str) -> bool {
    // Hyphens are allowed only between alphanumeric runs
    !label.is_empty()
        && !label.starts_with('-')
        && !label.ends_with('-')
        && !label.contains("--")
        && label
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Check that the hostname of `endpoint` resolves via DNS
pub async fn check_endpoint(endpoint: &Url) -> Result<()> {
    let host = endpoint
        .host_str()
        .ok_or_else(|| Error::resolve(format!("Endpoint has no host: {}", endpoint)))?;
    let port = endpoint.port_or_known_default().unwrap_or(443);

    let mut addrs = tokio::net::lookup_host(format!("{}:{}", host, port))
        .await
        .map_err(|e| Error::resolve(format!("Failed to resolve {}: {}", host, e)))?;

    if addrs.next().is_none() {
        return Err(Error::resolve(format!("No addresses for {}", host)));
    }

    tracing::debug!("Endpoint host resolved: {}", host);
    Ok(())
}
