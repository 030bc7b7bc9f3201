//! CMS bridge
//!
//! Serves a blog from a headless CMS without exposing the CMS API token.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  CMS BRIDGE                  │
//!   Browser            │                                              │
//!   ───────────────────┼─▶ http::server ──┬─▶ proxy::handlers ──┐     │
//!   GET /v2/...        │  (request id,    │   (JSON passthrough) │     │
//!   GET /, /blog       │   trace, cors)   └─▶ render::handlers ──┤     │
//!                      │                      (Tera HTML)       │     │
//!                      │                                        ▼     │
//!                      │                         proxy::client (+token)─┼──▶ CMS API
//!                      │                                              │
//!                      │  config · observability · lifecycle          │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use cms_bridge::config::loader::load_config;
use cms_bridge::lifecycle::startup;
use cms_bridge::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "cms-bridge")]
#[command(about = "Credential-injecting proxy and HTML blog for a headless CMS", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "CMS_BRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g. 127.0.0.1:8000).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.bind)?;

    init_logging(&config.observability);
    tracing::info!("cms-bridge v{} starting", env!("CARGO_PKG_VERSION"));

    startup::start(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
