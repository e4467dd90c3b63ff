use anyhow::Result;
use clap::{Parser, Subcommand};
use euribor::cli::{prompt, setup};
use euribor::core::log::init_logging;

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

impl From<Commands> for euribor::AppCommand {
    fn from(cmd: Commands) -> euribor::AppCommand {
        match cmd {
            Commands::Chart => euribor::AppCommand::Chart,
            Commands::Table => euribor::AppCommand::Table,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Chart rates for a date range (default)
    Chart,
    /// Print rates for a date range as a table
    Table,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command.unwrap_or(Commands::Chart) {
        Commands::Setup => setup::setup(),
        cmd => match prompt::prompt_date_range() {
            Ok(range) => {
                euribor::run_command(cmd.into(), cli.config_path.as_deref(), &range).await
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
