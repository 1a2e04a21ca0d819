use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use subway_server::config::{LOG_FILTER_VAR, ServerConfig};
use subway_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    init_tracing(&config);

    // Build app state
    let state = AppState::in_memory();

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "subway line manager listening");
    info!("  GET    /health");
    info!("  GET    /stations, POST /stations");
    info!("  GET    /stations/:id, DELETE /stations/:id");
    info!("  GET    /lines, POST /lines");
    info!("  GET    /lines/:id, PUT /lines/:id, DELETE /lines/:id");
    info!("  GET    /lines/:id/stations");
    info!("  POST   /lines/:id/sections, DELETE /lines/:id/sections?stationId=");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` or the configured default.
fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.default_log_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
