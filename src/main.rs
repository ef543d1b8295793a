use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use msp_pricing::{init_tracing, pricing::CustomerProfile};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.get_command();

    // The server initializes tracing itself once the configured level is known
    if !matches!(command, cli::Commands::Start) {
        init_tracing();
    }

    match command {
        cli::Commands::Start => {
            commands::start::execute(args.config).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(&args.config)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Estimate {
            employees,
            servers,
            workstations,
            security,
            sla,
            support,
            commitment,
        } => {
            let profile = CustomerProfile {
                workstations,
                security_level: security,
                sla_level: sla,
                support_type: support,
                commitment,
                ..CustomerProfile::new(employees, servers)
            };
            commands::estimate::execute(&args.config, profile)?;
        }
        cli::Commands::Quote { services } => {
            commands::quote::execute(&args.config, &services)?;
        }
        cli::Commands::Catalog { locale } => {
            commands::catalog::execute(&args.config, &locale)?;
        }
        cli::Commands::Version => {
            println!("msp-pricing v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
