use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use schedule_admin::config::AppConfig;
use schedule_admin::db::SqliteStore;
use schedule_admin::server::create_router;
use schedule_admin::types::AppState;

/// Sends log output to both the console and the configured log file.
fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("could not open log file {}", config.log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log level")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(log_file)))
        .try_init()
        .context("could not install tracing subscriber")?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            AppConfig::load_from_file(&path)
                .map_err(|e| anyhow::anyhow!("could not load {}: {}", path.display(), e))?
        }
        None => AppConfig::default(),
    };

    init_tracing(&config)?;

    info!("Opening database at {}", config.database_path.display());
    let store = SqliteStore::open(config.database_path.clone())
        .context("could not initialize the database")?;
    info!("Database initialized");

    let address = config.bind_address();
    let state = Arc::new(AppState::new(Arc::new(store), config));
    let app = create_router(state);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("could not bind {address}"))?;
    info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
