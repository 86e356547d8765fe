// ABOUTME: HTTP server binary for the Pierre diet planner
// ABOUTME: Loads configuration, opens the database, wires plan generation, and serves the API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pierre Diet Planner Server Binary
//!
//! Starts the onboarding API. Plan generation is enabled only when
//! `GEMINI_API_KEY` is set; calorie calculation always works.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pierre_diet_planner::{
    config::ServerConfig,
    database::{DatabaseProvider, SqliteDatabase},
    llm::{GeminiProvider, LlmProvider},
    logging::{self, AppLogger},
    plans::{GenerationSettings, PlanGenerator},
    resources::ServerResources,
    routes::build_router,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "pierre-diet-server")]
#[command(about = "Pierre Diet Planner - calorie targets and weekly diet and workout plans")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    info!("Starting Pierre Diet Planner");
    AppLogger::log_config_summary(&config.summary(), config.http_port);

    let database = SqliteDatabase::new(&config.database.url).await?;
    if config.database.auto_migrate {
        database.migrate().await?;
        info!("Database migrations applied");
    }
    let database: Arc<dyn DatabaseProvider> = Arc::new(database);

    let generator = build_plan_generator(&config)?;
    let resources = Arc::new(ServerResources::new(database, generator));
    let app = build_router(resources, &config.cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.http_port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.http_port))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated with an error")?;

    info!("Pierre Diet Planner stopped");
    Ok(())
}

fn build_plan_generator(config: &ServerConfig) -> Result<Option<PlanGenerator>> {
    if config.llm.api_key.is_none() {
        warn!("GEMINI_API_KEY not set; diet and workout plan generation is disabled");
        return Ok(None);
    }

    let provider = GeminiProvider::from_config(&config.llm)?;
    info!(
        provider = provider.display_name(),
        model = %config.llm.model,
        "Plan generation enabled"
    );
    Ok(Some(PlanGenerator::new(
        Arc::new(provider),
        GenerationSettings::from(&config.llm),
    )))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
