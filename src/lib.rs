pub mod cli;
pub mod core;
pub mod dashboard;
pub mod providers;

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::core::currency::CurrencyCode;
use crate::dashboard::Dashboard;
use crate::providers::conversion_service::ConversionService;
use crate::providers::history_router::HistoryRouter;
use crate::providers::history_service::HistoryService;
use crate::providers::market_data::MarketDataService;
use crate::providers::rate_service::RateService;

pub enum AppCommand {
    Show {
        currency: CurrencyCode,
    },
    Convert {
        from: CurrencyCode,
        to: CurrencyCode,
        amount: f64,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency dashboard starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let reference = config.reference_currency;

    let rates = RateService::new(config.backend_base_url());
    let history = HistoryRouter::new(
        HistoryService::new(config.backend_base_url(), reference),
        MarketDataService::new(config.market_data_base_url(), reference),
    );
    let conversions = ConversionService::new(config.backend_base_url());

    let dashboard = Dashboard::new(
        Arc::new(rates),
        Arc::new(history),
        Arc::new(conversions),
        reference,
        config.history_days,
    );

    match command {
        AppCommand::Show { currency } => cli::show::run(&dashboard, currency, reference).await,
        AppCommand::Convert { from, to, amount } => {
            cli::convert::run(&dashboard, from, to, amount).await
        }
    }
}
