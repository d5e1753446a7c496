//! Name-keyed provider registry
//!
//! Factories are registered by provider type name; the daemon then installs
//! one adapter instance per configured provider. The gateway looks adapters
//! up by the request's `provider` selector.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ddns_relay_core::{ProviderConfig, ProviderRegistry};
//!
//! let mut registry = ProviderRegistry::new();
//! ddns_relay_cloudflare::register(&mut registry);
//!
//! registry.install(&ProviderConfig::cloudflare(Some("example.com".into()), None))?;
//! let provider = registry.resolve(None).expect("sole provider");
//! ```

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::traits::{DnsProvider, DnsProviderFactory};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of provider factories and installed adapter instances
///
/// Built mutably at startup, then shared read-only (`Arc<ProviderRegistry>`)
/// by the gateway.
#[derive(Default)]
pub struct ProviderRegistry {
    /// Registered DNS provider factories
    factories: HashMap<String, Box<dyn DnsProviderFactory>>,

    /// Installed adapter instances, keyed by provider name
    providers: HashMap<String, Arc<dyn DnsProvider>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a DNS provider factory
    ///
    /// # Parameters
    ///
    /// - `name`: Provider type name (e.g., "cloudflare")
    /// - `factory`: Factory object for creating provider instances
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        factory: Box<dyn DnsProviderFactory>,
    ) {
        self.factories.insert(name.into(), factory);
    }

    /// Create a DNS provider from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Arc<dyn DnsProvider>)`: Created provider instance
    /// - `Err(Error)`: If the provider type is not registered or creation fails
    pub fn create_provider(&self, config: &ProviderConfig) -> Result<Arc<dyn DnsProvider>> {
        let provider_type = config.type_name();

        let factory = self
            .factories
            .get(provider_type)
            .ok_or_else(|| Error::config(format!("Unknown provider type: {}", provider_type)))?;

        factory.create(config)
    }

    /// Create a provider from configuration and make it available by name
    pub fn install(&mut self, config: &ProviderConfig) -> Result<Arc<dyn DnsProvider>> {
        config.validate()?;
        let provider = self.create_provider(config)?;
        self.insert(config.type_name(), Arc::clone(&provider));
        Ok(provider)
    }

    /// Make an existing provider instance available under `name`
    pub fn insert(&mut self, name: impl Into<String>, provider: Arc<dyn DnsProvider>) {
        let name = name.into();
        tracing::info!("Provider installed: {}", name);
        self.providers.insert(name, provider);
    }

    /// Look up an installed provider by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn DnsProvider>> {
        self.providers.get(name).cloned()
    }

    /// Pick the provider for a request
    ///
    /// An explicit selector must name an installed provider. Without one,
    /// the sole installed provider is used; with zero or several installed
    /// there is no default.
    pub fn resolve(&self, selector: Option<&str>) -> Option<Arc<dyn DnsProvider>> {
        match selector.filter(|s| !s.is_empty()) {
            Some(name) => self.get(name),
            None if self.providers.len() == 1 => self.providers.values().next().cloned(),
            None => None,
        }
    }

    /// List all registered factory names
    pub fn list_factories(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    /// List all installed provider names
    pub fn list_providers(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Check if a provider factory is registered
    pub fn has_factory(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}
