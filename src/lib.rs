pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod pricing;
pub mod server;
pub mod signals;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging with defaults (`info`, text output)
///
/// Note: This function can only be called once. `RUST_LOG` overrides the level.
pub fn init_tracing() {
    init_tracing_with("info", "text");
}

/// Initialize tracing with the configured level and format
///
/// `format` is either `text` or `json`. `RUST_LOG` still takes precedence
/// over `level` when set.
pub fn init_tracing_with(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if format == "json" {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    if let Err(e) = result {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
}
