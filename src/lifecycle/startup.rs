//! Startup orchestration.
//!
//! # Responsibilities
//! - Report configuration problems that are not fatal (missing token)
//! - Start the metrics exporter when enabled
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: bind and client construction errors are fatal
//! - Listener binds last, once everything else is ready

use tokio::net::TcpListener;

use crate::config::BridgeConfig;
use crate::error::BridgeResult;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Build every subsystem from `config` and serve until a shutdown signal.
pub async fn start(config: BridgeConfig) -> BridgeResult<()> {
    if config.upstream.api_token().is_none() {
        tracing::warn!(
            env = %config.upstream.token_env,
            "Upstream API token is not configured; upstream calls will be rejected"
        );
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        api_prefix = %config.upstream.api_prefix,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    server.run(listener, shutdown.subscribe()).await?;

    Ok(())
}
