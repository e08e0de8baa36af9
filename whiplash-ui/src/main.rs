//! whiplash-ui - Mood-to-playlist web service entry point
//!
//! Classifies a free-text feeling into a mood label and suggests Spotify
//! playlists for it through a small server-rendered web UI.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use whiplash_ui::config::{self, TomlConfig};
use whiplash_ui::spotify::SpotifyClient;
use whiplash_ui::AppState;

/// Port used when neither CLI, environment, nor TOML names one
const DEFAULT_PORT: u16 = 8501;

/// Command-line arguments for whiplash-ui
#[derive(Parser, Debug)]
#[command(name = "whiplash-ui")]
#[command(about = "Mood-to-playlist web service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "WHIPLASH_PORT")]
    port: Option<u16>,

    /// Path to the TOML config file (defaults to the platform config dir)
    #[arg(short, long, env = "WHIPLASH_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "whiplash_ui=debug,whiplash_mood=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting whiplash-ui");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config_path = args.config.unwrap_or_else(config::default_config_path);
    let toml_config = TomlConfig::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let credentials = config::resolve_spotify_credentials(&toml_config)
        .context("Spotify credentials not configured")?;

    // Port priority: CLI/ENV (clap) -> TOML -> compiled default
    let port = args.port.or(toml_config.port).unwrap_or(DEFAULT_PORT);

    let state = AppState::new(SpotifyClient::new(credentials));
    let app = whiplash_ui::build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
