// ABOUTME: Server binary for the expiry dashboard API and scheduled expiry sweep
// ABOUTME: Loads configuration from the environment, binds storage, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

//! # Expiry Dashboard Server Binary
//!
//! Starts the JSON API consumed by the dashboard front-end and, unless
//! disabled, the periodic expiry sweep.

use anyhow::{Context, Result};
use clap::Parser;
use expiry_dashboard::{
    config::environment::ServerConfig, logging, resources::ServerResources, routes,
    scheduler::ExpiryScheduler, storage::Store,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "expiry-dashboard-server")]
#[command(about = "Server expiry dashboard - renewal tracking with Telegram reminders")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Do not start the periodic expiry sweep
    #[arg(long)]
    no_scheduler: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if args.no_scheduler {
        config.notifications.scheduler_enabled = false;
    }

    logging::init_from_env()?;
    info!("{}", config.summary());

    let store = Store::from_config(&config.storage)
        .await
        .context("Failed to initialize key-value store")?;
    if store.is_none() {
        warn!("Running without storage; data routes will ask for setup");
    }

    let config = Arc::new(config);
    let resources = Arc::new(ServerResources::with_defaults(Arc::clone(&config), store));

    let _scheduler = if config.notifications.scheduler_enabled && resources.store.is_some() {
        Some(ExpiryScheduler::start(
            Arc::clone(&resources),
            Duration::from_secs(config.notifications.check_interval_secs),
        ))
    } else {
        info!("Expiry scheduler disabled");
        None
    };

    let app = routes::router(resources);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Expiry dashboard listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Expiry dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
