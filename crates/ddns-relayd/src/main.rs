// # ddns-relayd - DDNS Relay Daemon
//
// Thin integration layer: reads configuration from the environment, sets up
// logging, installs the provider adapter and serves the legacy update
// endpoint. All DNS logic lives in the library crates.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Gateway
// - `DDNS_LISTEN_ADDR`: Socket address to listen on (default `127.0.0.1:8000`)
// - `DDNS_LOG_LEVEL`: trace, debug, info, warn, error (default `info`)
//
// ### DNS Provider
// - `DDNS_PROVIDER_TYPE`: Provider type (cloudflare)
// - `DDNS_CLOUDFLARE_ZONE`: Default zone, overridden by a request's `username`
// - `DDNS_CLOUDFLARE_API_TOKEN`: Fallback token, overridden by a request's `password`
// - `DDNS_CLOUDFLARE_ENDPOINT`: API base URL (default Cloudflare v4)
// - `DDNS_TIMEOUT_SECS`: Timeout for each provider API call (default 20)
//
// ## Example
//
// ```bash
// export DDNS_LISTEN_ADDR=0.0.0.0:8000
// export DDNS_CLOUDFLARE_ZONE=example.com
//
// ddns-relayd
//
// curl 'http://nas-gateway:8000/update?record=home.example.com&value=203.0.113.7&username=example.com&password=<token>'
// ```

mod config;
mod gateway;

use anyhow::Result;
use config::Config;
use ddns_relay_core::ProviderRegistry;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum RelayExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<RelayExitCode> for ExitCode {
    fn from(code: RelayExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return RelayExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return RelayExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return RelayExitCode::ConfigError.into();
    }

    info!("Starting ddns-relayd");
    info!("Log level: {}", log_level);

    let registry = match build_registry(&config) {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            error!("Failed to install provider: {:#}", e);
            return RelayExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return RelayExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_gateway(&config, registry).await {
            error!("Gateway error: {:#}", e);
            RelayExitCode::RuntimeError
        } else {
            RelayExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Register the compiled-in factories and install the configured provider
fn build_registry(config: &Config) -> Result<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();

    #[cfg(feature = "cloudflare")]
    {
        info!("Registering Cloudflare provider");
        ddns_relay_cloudflare::register(&mut registry);
    }

    let provider_config = config.provider_config();
    let provider = registry.install(&provider_config)?;

    match &config.cloudflare_zone {
        Some(zone) => info!("Default zone: {}", zone),
        None => warn!("No default zone; requests must carry a username"),
    }
    info!(
        "Provider ready: {} (docs: {})",
        provider.provider_name(),
        provider.docs_url()
    );

    Ok(registry)
}

/// Serve the update endpoint until a shutdown signal arrives
async fn run_gateway(config: &Config, registry: Arc<ProviderRegistry>) -> Result<()> {
    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {} ({})", addr, gateway::UPDATE_PATH);

    axum::serve(listener, gateway::router(registry))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down ddns-relayd");
    Ok(())
}

/// Wait for SIGTERM or SIGINT
#[cfg(unix)]
async fn shutdown_signal() {
    let (mut sigterm, mut sigint) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(term), Ok(int)) => (term, int),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Failed to set up signal handlers, falling back to CTRL-C: {}", e);
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!("Failed to wait for CTRL-C: {}", e);
                }
                return;
            }
        };

    let received = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    info!("Received shutdown signal: {}", received);
}

/// Wait for CTRL-C
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal: SIGINT"),
        Err(e) => error!("Failed to wait for CTRL-C: {}", e),
    }
}
