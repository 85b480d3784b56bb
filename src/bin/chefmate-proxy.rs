// ABOUTME: Proxy server binary holding recipe and AI provider keys server-side
// ABOUTME: Serves the passthrough and AI endpoints the orchestrator's proxy transport calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `ChefMate` Proxy Binary
//!
//! Reads `SPOONACULAR_API_KEY` and `GEMINI_API_KEY` from the environment and
//! listens on `CHEFMATE_PROXY_BIND` (default `127.0.0.1:3000`).

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chefmate::config::ProxyConfig;
use chefmate::constants::limits::DEFAULT_CONNECT_TIMEOUT_SECS;
use chefmate::http::ReqwestTransport;
use chefmate::logging;
use chefmate::proxy::{ProxyRoutes, ProxyState};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "chefmate-proxy")]
#[command(about = "ChefMate proxy - keeps provider API keys off the client")]
struct Args {
    /// Override the listen address
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let mut config = ProxyConfig::from_env();
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if config.spoonacular_api_key.is_none() {
        warn!("SPOONACULAR_API_KEY not set; /api/spoonacular will answer 500");
    }
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY not set; AI endpoints will serve placeholder content");
    }

    let http = Arc::new(ReqwestTransport::with_timeouts(
        Duration::from_secs(config.request_timeout_secs),
        Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
    ));
    let bind_addr = config.bind_addr;
    let app = ProxyRoutes::routes(ProxyState::new(config, http));

    let listener = TcpListener::bind(bind_addr).await?;
    info!(addr = %bind_addr, "ChefMate proxy listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ChefMate proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
