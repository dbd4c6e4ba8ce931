pub mod cli;
pub mod core;
pub mod fetcher;
pub mod providers;
pub mod server;
pub mod service;

use crate::core::config::AppConfig;
use crate::core::summary::BreakdownMode;
use crate::server::state::AppState;
use crate::service::FxService;
use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Serve {
        bind: Option<String>,
    },
    Summary {
        start: NaiveDate,
        end: NaiveDate,
        breakdown: BreakdownMode,
    },
    Health,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let service = FxService::from_config(&config)?;

    match command {
        AppCommand::Serve { bind } => {
            info!("fxsummary server starting...");
            let bind = bind.unwrap_or(config.server.bind);
            server::serve(Arc::new(AppState { service }), &bind).await
        }
        AppCommand::Summary {
            start,
            end,
            breakdown,
        } => cli::summary::run(&service, start, end, breakdown).await,
        AppCommand::Health => cli::health::run(&service).await,
    }
}
