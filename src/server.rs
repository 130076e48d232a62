//! HTTP server initialization and runtime setup.
//!
//! Handles graph store setup, service wiring, and the Axum server lifecycle.

use crate::application::services::AffiliateService;
use crate::config::{Config, StoreBackend};
use crate::domain::derivation::StaticDerivation;
use crate::domain::repositories::GraphStore;
use crate::infrastructure::persistence::{MemoryGraphStore, Neo4jGraphStore, Neo4jSettings};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Creates the graph store selected by the configuration.
///
/// # Errors
///
/// Returns an error if the Neo4j driver rejects the connection settings
/// or cannot set up its pool.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn GraphStore>> {
    match config.store_backend {
        StoreBackend::Neo4j => {
            let settings = Neo4jSettings {
                uri: config.neo4j_uri.clone(),
                user: config.neo4j_user.clone(),
                password: config.neo4j_password.clone().unwrap_or_default(),
                database: config.neo4j_database.clone(),
                max_connections: config.neo4j_max_connections,
            };
            let store = Neo4jGraphStore::connect(&settings)
                .await
                .context("Failed to connect to Neo4j")?;
            tracing::info!("Graph store: Neo4j");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Graph store: in-memory, data is lost on shutdown");
            Ok(Arc::new(MemoryGraphStore::new()))
        }
    }
}

/// Wires the affiliate service for a store using the configured derivation.
pub fn build_service(config: &Config, store: Arc<dyn GraphStore>) -> AffiliateService {
    let derivation = Arc::new(StaticDerivation::new(config.default_merchant.clone()));
    AffiliateService::new(store, derivation)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Graph store (Neo4j or in-memory)
/// - Affiliate service
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Store setup fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;

    if !store.health_check().await {
        tracing::warn!("Graph store is not reachable yet; requests will fail until it is");
    }

    let service = build_service(&config, store);
    let state = AppState::new(Arc::new(service));

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
