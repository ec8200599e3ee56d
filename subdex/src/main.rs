use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subdex::{
    api::{AppState, router},
    bootstrap::open_store,
    config::AppConfig,
    service::SubstanceService,
};

/// Entry point for the substance lookup service.
///
/// # Environment Variables
/// - `SUBDEX_BIND_ADDR`: listen address (default: "0.0.0.0:8001")
/// - `SUBDEX_STORE`: `mongodb` (default) or `memory`
/// - `MONGO_URL`: MongoDB connection string, required for the mongodb store
/// - `MONGO_DATABASE`: database name (default: "app_db")
/// - `MONGO_COLLECTION`: collection name (default: "substances")
/// - `SUBDEX_SEED_FILE`: JSON array of records loaded into the memory store
/// - `RUST_LOG`: extra tracing directives
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("subdex=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let store = open_store(&config).await?;
    let service = SubstanceService::new(store.clone(), config.collection.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("++ Starting subdex REST on {}", listener.local_addr()?);

    axum::serve(listener, router(AppState::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.shutdown().await?;
    tracing::info!("subdex shutdown complete");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Received shutdown signal, draining connections...");
}
