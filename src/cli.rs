use clap::{Parser, Subcommand};
use msp_pricing::pricing::{Commitment, QuoteSelection, SecurityLevel, SlaLevel, SupportType};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "msp-pricing",
    version,
    about = "Pricing engine for managed IT services"
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the pricing API server (default)
    Start,

    /// Test configuration file validity
    Test,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Compare ad-hoc, prepaid and managed pricing for a customer
    Estimate {
        /// Number of employees
        #[arg(short, long)]
        employees: u32,

        /// Number of servers
        #[arg(short, long, default_value = "0")]
        servers: u32,

        /// Number of workstations (defaults to the employee count)
        #[arg(short, long)]
        workstations: Option<u32>,

        /// Security package: low, medium or high
        #[arg(long, default_value = "medium")]
        security: SecurityLevel,

        /// Guaranteed response time: 4h, 2h or 1h
        #[arg(long, default_value = "4h")]
        sla: SlaLevel,

        /// Support delivery: remote or onsite
        #[arg(long, default_value = "remote")]
        support: SupportType,

        /// Billing commitment: monthly or yearly
        #[arg(long, default_value = "monthly")]
        commitment: Commitment,
    },

    /// Generate a quote from catalog services
    Quote {
        /// Service selection as ID=QUANTITY, repeatable
        #[arg(long = "service", value_parser = parse_selection, required = true)]
        services: Vec<QuoteSelection>,
    },

    /// List the service catalog
    Catalog {
        /// Locale for service names: nl or en
        #[arg(short, long, default_value = "nl")]
        locale: String,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Start if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Start)
    }
}

fn parse_selection(value: &str) -> Result<QuoteSelection, String> {
    let (id, quantity) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QUANTITY, got '{}'", value))?;
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid quantity '{}': {}", quantity, e))?;

    Ok(QuoteSelection::new(id.trim(), quantity))
}
