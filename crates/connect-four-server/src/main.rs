//! Connect Four game server.

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod protocol;
mod server;
mod session;

use config::ServerConfig;
use session::SessionManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    info!(
        "Starting Connect Four server (games expire after {}s idle, sweep every {}s)...",
        config.session.idle_timeout.as_secs(),
        config.session.sweep_interval.as_secs()
    );

    let sessions = Arc::new(SessionManager::new(config.session.clone()));
    let sweeper = sessions.spawn_sweeper();

    let result = tokio::select! {
        result = server::run_server(config.addr, Arc::clone(&sessions)) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down, {} game(s) still active", sessions.len());
            Ok(())
        }
    };

    sweeper.stop();
    result
}
