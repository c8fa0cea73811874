pub mod cli;
pub mod controller;
pub mod core;
pub mod providers;

use crate::cli::ui::ProgressRateSource;
use crate::controller::ConversionController;
use crate::core::config::AppConfig;
use crate::core::{ConsoleNotifier, RateSource, SharedPrice, SymbolList};
use crate::providers::ExchangeRateApiProvider;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    /// Switch through the given symbols in one session
    Convert(Vec<String>),
    /// Interactive session reading symbols from stdin
    Shell,
    /// List symbols matching a prefix
    Suggest(String),
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        native_currency = %config.native_currency.symbol,
        native_price = config.native_currency.price,
        base_url = %config.providers.exchange_rate_api.base_url,
        "Loaded config"
    );
    Ok(config)
}

/// Wires a new session from the configuration: HTTP rate source, shared
/// native price seeded from config and console notifications.
pub fn build_controller(config: &AppConfig) -> Result<ConversionController> {
    let api = &config.providers.exchange_rate_api;
    let provider = ExchangeRateApiProvider::new(
        &api.base_url,
        api.api_key.clone(),
        Duration::from_secs(api.timeout_secs),
    )?;
    let source: Arc<dyn RateSource> = Arc::new(ProgressRateSource::new(Arc::new(provider)));
    let price = SharedPrice::new(config.native_currency.price);

    Ok(ConversionController::new(
        SymbolList::default(),
        source,
        Arc::new(price),
        Arc::new(ConsoleNotifier),
    ))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxpick starting...");

    match command {
        AppCommand::Suggest(prefix) => {
            cli::suggest::run(&SymbolList::default(), &prefix);
            Ok(())
        }
        AppCommand::Convert(symbols) => {
            let config = load_config(config_path)?;
            let mut controller = build_controller(&config)?;
            cli::convert::run(&mut controller, &symbols, &config.native_currency.symbol).await
        }
        AppCommand::Shell => {
            let config = load_config(config_path)?;
            let mut controller = build_controller(&config)?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            cli::shell::run(
                &mut controller,
                stdin,
                &mut stdout,
                &config.native_currency.symbol,
            )
            .await
        }
    }
}
