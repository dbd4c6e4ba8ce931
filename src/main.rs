use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use fxsummary::core::log::init_logging;
use fxsummary::core::summary::BreakdownMode;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Serve the dashboard and JSON API over HTTP
    Serve {
        /// Address to listen on, overriding the configured one
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Display the EUR to USD summary for a date range
    Summary {
        /// First date of the range (YYYY-MM-DD)
        #[arg(short, long)]
        start: NaiveDate,
        /// Last date of the range (YYYY-MM-DD)
        #[arg(short, long)]
        end: NaiveDate,
        /// 'day' for a daily breakdown, 'none' for totals only
        #[arg(short, long, default_value = "day")]
        breakdown: BreakdownMode,
    },
    /// Check whether the remote rate API is reachable
    Health,
}

impl From<Commands> for fxsummary::AppCommand {
    fn from(cmd: Commands) -> fxsummary::AppCommand {
        match cmd {
            Commands::Serve { bind } => fxsummary::AppCommand::Serve { bind },
            Commands::Summary {
                start,
                end,
                breakdown,
            } => fxsummary::AppCommand::Summary {
                start,
                end,
                breakdown,
            },
            Commands::Health => fxsummary::AppCommand::Health,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxsummary::cli::setup::setup(),
        Some(cmd) => fxsummary::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
