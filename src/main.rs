use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxpick::core::log::init_logging;

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

impl From<Commands> for fxpick::AppCommand {
    fn from(cmd: Commands) -> fxpick::AppCommand {
        match cmd {
            Commands::Convert { symbols } => fxpick::AppCommand::Convert(symbols),
            Commands::Shell => fxpick::AppCommand::Shell,
            Commands::Suggest { prefix } => fxpick::AppCommand::Suggest(prefix),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Switch the native price to each currency in turn
    Convert {
        /// 3-letter currency symbols, e.g. EUR JPY
        #[arg(required = true)]
        symbols: Vec<String>,
    },
    /// Pick currencies interactively
    Shell,
    /// List currency symbols starting with a prefix
    Suggest { prefix: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxpick::cli::setup::setup(),
        Some(cmd) => fxpick::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
