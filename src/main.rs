//! Credential Gate - username/password check service
//!
//! Holds a fixed credential table and answers one question for two front
//! ends: an HTTP `POST /login` endpoint and an interactive terminal form.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

mod api;
mod auth;
mod cli;
mod config;
mod error;
mod logging;
mod shell;

use crate::api::build_router;
use crate::auth::{Authenticator, CredentialStore, StoreAuthenticator};
use crate::cli::{CliArgs, Command};
use crate::config::Config;
use crate::shell::LoginForm;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Credential check shared with every front end.
    pub authenticator: Arc<dyn Authenticator>,
    /// Size of the credential table, reported by the health endpoint.
    pub user_count: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    let args = CliArgs::parse();
    let command = args.command();

    // Initialize logging
    match command {
        Command::Serve { .. } => logging::init(),
        Command::Form => logging::init_form(),
    }

    tracing::info!("Starting Credential Gate v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = Config::load(args.config.as_deref()).map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    if let Command::Serve { port } = command {
        config.override_port(port);
    }

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        users = config.auth.users.len(),
        "Configuration loaded"
    );

    // Build the credential store and the shared authenticator
    let store = CredentialStore::from_config(config.auth.users.clone()).map_err(|e| {
        tracing::error!(error = %e, "Invalid credential table");
        anyhow::anyhow!("{}", e)
    })?;

    if store.is_empty() {
        tracing::warn!("Credential table is empty - every login will be rejected");
    }
    tracing::warn!("Passwords are held in plaintext - do not use this table for real accounts");

    let authenticator = StoreAuthenticator::new(Arc::new(store));
    let state = AppState {
        user_count: authenticator.user_count(),
        authenticator: Arc::new(authenticator),
    };

    match command {
        Command::Serve { .. } => serve(&config, state).await,
        Command::Form => {
            let form = LoginForm::new(state.authenticator);
            tokio::task::spawn_blocking(move || form.run())
                .await
                .context("Form task panicked")??;
            Ok(())
        }
    }
}

/// Bind the listener and serve the HTTP API until a shutdown signal arrives.
async fn serve(config: &Config, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state, config.server.max_body_bytes);

    let addr = config.bind_addr();
    let listener = bind_listener(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Bind the TCP listener; failure is fatal for the server.
async fn bind_listener(addr: &str) -> anyhow::Result<TcpListener> {
    TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!(address = %addr, error = %e, "Failed to bind listener");
        anyhow::anyhow!("Failed to bind {}: {}", addr, e)
    })
}

/// Resolve on Ctrl-C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
