// # ddns-relay-core
//
// Core library for the DDNS relay.
//
// The relay sits between consumer devices speaking the legacy DDNS status
// protocol (`good`, `nochg`, `badauth`, ...) and a DNS provider's management
// API. This crate holds everything that is provider-independent.
//
// ## Architecture Overview
//
// - **StatusCode**: The closed legacy status vocabulary
// - **Error**: Error taxonomy, each variant maps to exactly one StatusCode
// - **precheck**: Endpoint resolution and FQDN checks run before any API call
// - **IdCache**: Lifetime cache for provider-side zone/record IDs
// - **DnsProvider**: Capability trait every provider adapter implements
// - **ProviderRegistry**: Name-keyed registry of factories and adapters
//
// ## Design Principles
//
// 1. **Closed Vocabulary**: Adapters return a StatusCode, never an error
// 2. **Request-Scoped Credentials**: No credential lives on shared state
// 3. **Plugin-Based**: Providers are registered by name, no hard-coded if-else
// 4. **No Retries**: A failure is reported once and left to the client

pub mod cache;
pub mod config;
pub mod error;
pub mod precheck;
pub mod registry;
pub mod status;
pub mod traits;

// Re-export core types for convenience
pub use cache::IdCache;
pub use config::ProviderConfig;
pub use error::{Error, Result};
pub use registry::ProviderRegistry;
pub use status::StatusCode;
pub use traits::{Credentials, DnsProvider, DnsProviderFactory, UpdateRequest};
