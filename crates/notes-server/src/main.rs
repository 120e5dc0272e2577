//! Anonymous notes service
//!
//! Provides:
//! - Note creation, returning a shareable view id and a secret edit id
//! - Public reads by view id
//! - Updates authorized by presenting the edit id

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use notes_core::{FileStore, MemoryStore, NoteStore};
use notes_server::config::{Config, StorageKind};
use notes_server::{AppState, build_router};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "notes-server")]
#[command(about = "Anonymous notes with view and edit links")]
struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = 4000, env = "NOTES_PORT")]
    port: u16,

    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0", env = "NOTES_BIND")]
    bind: String,

    /// Path to config directory
    #[arg(long, default_value = "./config", env = "NOTES_CONFIG_PATH")]
    config_path: String,

    /// Directory holding notes.json (file storage only)
    #[arg(long, default_value = "./data", env = "NOTES_DATA_DIR")]
    data_dir: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "notes_server=info,notes_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config_path)?;
    let store: Arc<dyn NoteStore> = match config.storage {
        StorageKind::File => Arc::new(FileStore::open(&cli.data_dir).await?),
        StorageKind::Memory => {
            tracing::warn!("Using in-memory storage, notes will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let state = Arc::new(AppState::new(config, store));
    let app = build_router(state)?;

    // Parse bind address
    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port).parse()?;

    tracing::info!("Starting notes-server on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Notes server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
