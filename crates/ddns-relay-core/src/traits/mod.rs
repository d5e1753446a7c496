//! Core traits for the DDNS relay
//!
//! - [`DnsProvider`]: Translate an update request into provider API calls
//! - [`DnsProviderFactory`]: Build providers from configuration

pub mod dns_provider;

pub use dns_provider::{Credentials, DnsProvider, DnsProviderFactory, UpdateRequest};
