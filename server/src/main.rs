use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use ai_studio_server::{app, ServerConfig, ServerError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _ = dotenv::dotenv();

    let config = ServerConfig::from_env();
    config.check_root()?;
    config.check_index_file()?;
    let addr = config.socket_addr()?;

    let root = config
        .root
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", config.root.display()))?;
    info!("Serving {} (index: {})", root.display(), config.index_path());
    if !config.root.join(&config.index_file).is_file() {
        warn!(
            "{} not found in {}, / will answer 404",
            config.index_file,
            root.display()
        );
    }

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!("Server started on http://localhost:{}", config.port);
    info!("App available as in AI Studio. Press Ctrl+C to stop");

    axum::serve(listener, app(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
