//! HTTP server initialization and runtime setup.
//!
//! Opens the URL store, serves the router, and closes the store once the
//! server has shut down.

use crate::config::Config;
use crate::domain::repositories::UrlStore;
use crate::infrastructure::persistence::{InMemoryUrlStore, SledUrlStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The URL store (one handle for the whole process)
/// - Axum HTTP server with graceful shutdown on Ctrl-C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid or cannot be bound (the store is not
///   opened in that case)
/// - The URL database cannot be opened
/// - Server runtime error occurs
/// - The store fails to flush on close
pub async fn run(config: Config) -> Result<()> {
    // The store is opened only once the listener is bound.
    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    let store = open_store(&config)?;

    let state = AppState::new(store.clone(), config.url_prefix.clone());
    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    tracing::info!("Listening on http://{addr}");

    let served = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await.context("Failed to close URL database")?;
    tracing::info!("URL database closed");

    served?;

    Ok(())
}

/// Opens the store selected by `STORAGE_BACKEND`.
///
/// # Errors
///
/// Failing to open the sled database is fatal for the process.
pub fn open_store(config: &Config) -> Result<Arc<dyn UrlStore>> {
    if config.is_persistent() {
        let store = SledUrlStore::open(&config.database_path)
            .context("Unable to access URL database")?;
        Ok(Arc::new(store))
    } else {
        tracing::warn!("Using in-memory URL store, mappings are lost on exit");
        Ok(Arc::new(InMemoryUrlStore::new()))
    }
}

/// Resolves when the process receives Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Error receiving Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Error installing SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
