mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use crate::{config::Config, error::AppError, state::AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    startup::init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), AppError> {
    let pool = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let tokens = startup::setup_token_service(&config, http_client.clone())?;

    let state = AppState::new(pool.clone(), tokens, Arc::new(config), http_client);

    let mut scheduler = scheduler::start_scheduler(&state).await?;

    tracing::info!("Starting IVAO {} bot", state.config.division.division);

    let (bot_client, shard_manager) = bot::start::init_bot(state).await?;

    let bot = tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            shard_manager.shutdown_all().await;
        }
        _ = bot => {
            tracing::warn!("Discord client stopped");
        }
    }

    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!("Failed to stop scheduler: {}", e);
    }
    pool.close().await;

    Ok(())
}
