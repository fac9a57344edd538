pub mod commands;
pub mod infrastructure;
pub mod modules;
pub mod shared;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use infrastructure::{AppConfig, AppState};
use shared::AppResult;

/// 初始化日志，`RUST_LOG` 优先
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

pub async fn run() -> AppResult<()> {
    init_tracing();

    tracing::info!("Luna starting...");

    let config = AppConfig::from_env()?;
    let state = AppState::from_config(&config)?;
    let app = commands::router(state);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Luna stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
