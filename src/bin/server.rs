// Server entry point.
//
// Usage: cargo run --bin herbmap-server

use std::net::SocketAddr;

use herbmap::{create_router, AppState, DataPaths};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herbmap=info,tower_http=debug,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Default: ./data (local development). Deployments point HERBMAP_DATA_DIR
    // at the installed dataset.
    let data_dir = std::env::var("HERBMAP_DATA_DIR").unwrap_or_else(|_| "data".to_string());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!("  HERBMAP_DATA_DIR: {}", data_dir);
    tracing::info!("  PORT: {}", port);

    let state = AppState::new(&DataPaths::from_dir(&data_dir))?;
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
