//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - Log level configurable via config and `RUST_LOG`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Environment, ServiceConfig};

/// Default filter directives when `RUST_LOG` is not set.
pub fn default_directives(environment: Environment, log_level: &str) -> String {
    match environment {
        Environment::Development => "compressor_api=debug,tower_http=debug".to_string(),
        Environment::Production => format!("compressor_api={level},tower_http={level}", level = log_level),
    }
}

/// Install the global tracing subscriber.
///
/// Call once, before the server starts. Returns an error if a subscriber is
/// already installed.
pub fn init_logging(config: &ServiceConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        default_directives(config.environment, &config.observability.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    match config.environment {
        Environment::Development => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        Environment::Production => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    }
}
