//! Trustwatch web server
//!
//! Run with: cargo run -p trustwatch-web

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trustwatch_api::ApiClient;
use trustwatch_web::{config::Config, router::build_router, scope::ViewScope, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    info!("Starting Trustwatch dashboard...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let client = ApiClient::new()?;
    info!(backend = %client.base_url(), "backend client ready");

    let state = AppState::new(Arc::new(client));
    let root = state.root_scope();
    let app = build_router(state, &config.server.static_dir);

    let addr = config.server.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(root))
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM, cancelling every in-flight view first.
async fn shutdown_signal(root: Arc<ViewScope>) {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Ctrl+C handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("SIGTERM handler unavailable: {}", e);
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

    root.cancel();
}
