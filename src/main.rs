//! Roll For Teams binary entrypoint wiring REST, SSE, and the pool store.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod dao;
mod dto;
mod error;
mod routes;
mod services;
mod state;

use config::AppConfig;
use dao::pool_store::{file::FilePoolStore, memory::MemoryPoolStore};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let persist_pool = config.persist_pool;
    let pool_path = config.pool_path.clone();

    let app_state = AppState::new(config);

    if persist_pool {
        let store = FilePoolStore::new(pool_path);
        app_state.install_pool_store(Arc::new(store)).await;
    } else {
        // Degraded mode is reserved for storage failures; a deliberately
        // disabled file store still gets a healthy in-memory backend.
        info!("pool persistence disabled; using an in-memory store");
        app_state
            .install_pool_store(Arc::new(MemoryPoolStore::new()))
            .await;
    }

    if let Err(err) = services::pool_service::bootstrap_pool(&app_state).await {
        // A broken store never blocks startup; the wheel runs in memory.
        warn!(error = %err, "failed to load persisted pool; continuing without it");
    }

    spawn_degraded_watcher(app_state.clone());

    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: state::SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Announce persistence degradation over the SSE stream so connected
/// frontends can tell the user their roster is no longer being saved.
fn spawn_degraded_watcher(state: state::SharedState) {
    tokio::spawn(async move {
        let mut watcher = state.degraded_watcher();
        while watcher.changed().await.is_ok() {
            let degraded = *watcher.borrow_and_update();
            let message = if degraded {
                "pool persistence lost; changes are no longer saved"
            } else {
                "pool persistence restored"
            };
            warn!(degraded, "persistence availability changed");
            services::sse_service::broadcast_info(state.events(), message);
        }
    });
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
