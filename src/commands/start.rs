use anyhow::Result;
use colored::Colorize;
use msp_pricing::{config, init_tracing_with, server};
use std::path::PathBuf;
use tracing::info;

/// Execute the start command
///
/// Logging is initialized here rather than in `main` so the configured
/// level and format apply from the first line.
pub async fn execute(config_path: PathBuf) -> Result<()> {
    println!("{}", "Starting pricing API...".green());

    let cfg = config::load_config(&config_path)?;
    init_tracing_with(&cfg.server.log_level, &cfg.server.log_format);

    info!(
        config = %config_path.display(),
        "Starting pricing API in foreground mode"
    );

    // Blocks until shutdown
    server::start_server(cfg, config_path).await?;

    Ok(())
}
