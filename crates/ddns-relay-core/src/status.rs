//! Legacy DDNS status vocabulary
//!
//! Consumer devices (NAS DDNS clients and friends) parse these tokens
//! verbatim, so the string forms are part of the wire contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A status token returned to the consumer device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    /// Update applied
    #[serde(rename = "good")]
    Good,
    /// Update applied, value unchanged
    #[serde(rename = "nochg")]
    NoChange,
    /// Record not found for this account, or required fields missing
    #[serde(rename = "nohost")]
    NoHost,
    /// Blocked for update abuse
    #[serde(rename = "abuse")]
    Abuse,
    /// Record is not a fully-qualified domain name
    #[serde(rename = "notfqdn")]
    NotFqdn,
    /// Authentication failed
    #[serde(rename = "badauth")]
    BadAuth,
    /// Provider-side or unclassified problem
    #[serde(rename = "911")]
    ProviderError,
    /// Request rejected as malformed
    #[serde(rename = "badagent")]
    BadAgent,
    /// Provider API hostname failed to resolve
    #[serde(rename = "badresolv")]
    BadResolv,
    /// Connection to the provider failed or timed out
    #[serde(rename = "badconn")]
    BadConn,
}

impl StatusCode {
    /// Every token, in the order DDNS clients usually document them
    pub const ALL: [StatusCode; 10] = [
        StatusCode::Good,
        StatusCode::NoChange,
        StatusCode::NoHost,
        StatusCode::Abuse,
        StatusCode::NotFqdn,
        StatusCode::BadAuth,
        StatusCode::ProviderError,
        StatusCode::BadAgent,
        StatusCode::BadResolv,
        StatusCode::BadConn,
    ];

    /// The wire token
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Good => "good",
            StatusCode::NoChange => "nochg",
            StatusCode::NoHost => "nohost",
            StatusCode::Abuse => "abuse",
            StatusCode::NotFqdn => "notfqdn",
            StatusCode::BadAuth => "badauth",
            StatusCode::ProviderError => "911",
            StatusCode::BadAgent => "badagent",
            StatusCode::BadResolv => "badresolv",
            StatusCode::BadConn => "badconn",
        }
    }

    /// Whether the update was applied
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Good | StatusCode::NoChange)
    }

    /// Map a provider HTTP status to the legacy vocabulary
    ///
    /// Anything not in the table is a provider-side problem (`911`).
    pub fn from_http_status(status: u16) -> Self {
        match status {
            200 => StatusCode::Good,
            400 | 405 | 415 => StatusCode::BadAgent,
            401 | 403 => StatusCode::BadAuth,
            429 => StatusCode::Abuse,
            _ => StatusCode::ProviderError,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusCode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| crate::Error::invalid_input(format!("Unknown status token: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_table() {
        assert_eq!(StatusCode::from_http_status(200), StatusCode::Good);
        assert_eq!(StatusCode::from_http_status(400), StatusCode::BadAgent);
        assert_eq!(StatusCode::from_http_status(401), StatusCode::BadAuth);
        assert_eq!(StatusCode::from_http_status(403), StatusCode::BadAuth);
        assert_eq!(StatusCode::from_http_status(405), StatusCode::BadAgent);
        assert_eq!(StatusCode::from_http_status(415), StatusCode::BadAgent);
        assert_eq!(StatusCode::from_http_status(429), StatusCode::Abuse);
    }

    #[test]
    fn test_unmapped_http_status_is_911() {
        for status in [201, 204, 404, 409, 500, 503] {
            assert_eq!(
                StatusCode::from_http_status(status),
                StatusCode::ProviderError,
                "status {} should be unmapped",
                status
            );
        }
    }

    #[test]
    fn test_tokens_parse_back() {
        for code in StatusCode::ALL {
            assert_eq!(code.to_string().parse::<StatusCode>().unwrap(), code);
        }
        assert!("GOOD".parse::<StatusCode>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_tokens() {
        let json = serde_json::to_string(&StatusCode::ProviderError).unwrap();
        assert_eq!(json, "\"911\"");
    }

    #[test]
    fn test_success_codes() {
        assert!(StatusCode::Good.is_success());
        assert!(StatusCode::NoChange.is_success());
        assert!(!StatusCode::NoHost.is_success());
    }
}
