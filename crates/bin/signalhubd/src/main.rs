//! # signalhubd — signalhub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Build the HTTP command sender and the dispatch worker pool
//! - Restore the registry from storage and start the sequence engine
//! - Build the axum router, injecting the control service
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use signalhub_adapter_dispatch_http::HttpCommandSender;
use signalhub_adapter_http_axum::state::AppState;
use signalhub_adapter_storage_sqlite_sqlx::pool::Config as DatabaseConfig;
use signalhub_app::dispatcher::Dispatcher;
use signalhub_app::registry::Registry;
use signalhub_app::sequence_engine::SequenceEngine;
use signalhub_app::services::control_service::ControlService;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.logging.filter);

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
        max_connections: config.database.max_connections,
    }
    .build()
    .await
    .context("failed to open database")?;

    // Transport
    let sender = HttpCommandSender::new(&config.dispatch).context("failed to build HTTP client")?;
    let dispatcher = Dispatcher::spawn(sender, &config.dispatch.dispatcher());

    // Registry and services
    let registry = Arc::new(Registry::new());
    let control = Arc::new(ControlService::new(
        Arc::clone(&registry),
        dispatcher.clone(),
        db.light_store(),
    ));
    control
        .restore()
        .await
        .context("failed to restore traffic lights")?;

    // Engine
    let engine = SequenceEngine::new(registry, dispatcher)
        .with_tick(config.tick())
        .spawn();

    // HTTP
    let app = signalhub_adapter_http_axum::router::build(AppState::from_arc(control));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, "signalhubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    engine.abort();
    tracing::info!("signalhubd stopped");
    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {filter:?} ({err}), falling back to info");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown requested");
}
