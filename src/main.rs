//! Scorebook - Binary Entry Point
//!
//! Loads configuration and the roster, replays the journal if one is
//! configured, then serves the HTTP API until Ctrl+C / SIGTERM.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use scorebook::api::{create_router, AppState};
use scorebook::config::ServerConfig;
use scorebook::directory::{Directory, StaticDirectory};
use scorebook::scoreboard::Scoreboard;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("scorebook=info,tower_http=info")),
        )
        .with_target(true)
        .init();

    let config = ServerConfig::from_env()?;
    info!(
        bind = %config.bind_addr,
        data_dir = ?config.data_dir,
        directory_file = ?config.directory_file,
        "configuration loaded"
    );

    let directory: Arc<dyn Directory> = match &config.directory_file {
        Some(path) => Arc::new(StaticDirectory::from_file(path)?),
        None => Arc::new(StaticDirectory::with_default_roster()),
    };
    if directory.games().is_empty() {
        warn!("no games configured; every scoring request will be rejected");
    }

    let scoreboard = match config.journal() {
        Some(journal) => {
            let (scoreboard, summary) = Scoreboard::open(directory, &journal)?;
            info!(
                path = %journal.journal_path().display(),
                live_events = summary.live_events,
                "journal ready"
            );
            scoreboard
        }
        None => {
            warn!("SCOREBOOK_DATA_DIR not set; state will not survive a restart");
            Scoreboard::new(directory)
        }
    };

    let state = Arc::new(AppState::with_capacity(Arc::new(scoreboard), config.feed_capacity));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "scorebook listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("scorebook stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
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
                warn!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutdown signal received");
}
