//! Minification API server.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                COMPRESSOR API                 │
//!                    │                                               │
//!   Client Request   │  ┌──────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│   cors   │──▶│ request  │──▶│ handlers  │  │
//!                    │  │request-id│   │  schema  │   │           │  │
//!                    │  └──────────┘   └──────────┘   └─────┬─────┘  │
//!                    │                                      │        │
//!                    │                                      ▼        │
//!                    │                 ┌──────────┐   ┌───────────┐  │
//!                    │                 │  minify  │◀──│  options  │  │
//!                    │                 │ adapters │   │normalizer │  │
//!                    │                 └────┬─────┘   └───────────┘  │
//!   Client Response  │  ┌──────────┐        │                        │
//!   ◀────────────────┼──│ response │◀───────┘                        │
//!                    │  └──────────┘                                 │
//!                    │                                               │
//!                    │  config · observability · lifecycle           │
//!                    └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use compressor_api::config;
use compressor_api::http::HttpServer;
use compressor_api::lifecycle::{signals, Shutdown};
use compressor_api::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "compressor-api")]
#[command(about = "HTTP API for minifying JavaScript, CSS and HTML", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "COMPRESSOR_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = config::load(cli.config.as_deref())?;
    logging::init_logging(&config)?;

    tracing::info!("compressor-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        environment = config.environment.as_str(),
        request_timeout_secs = config.timeouts.request_secs,
        max_body_bytes = config.limits.max_body_bytes,
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

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
