//! whiplash-ui library interface
//!
//! Serves the whiplash web UI: a free-text mood prompt, the detected-mood
//! bubble, and Spotify playlist suggestions for the top label. The mood
//! detection itself lives in the whiplash-mood crate; this crate owns the
//! collaborators around it (renderer and playlist search).

pub mod api;
pub mod config;
pub mod error;
pub mod spotify;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::spotify::SpotifyClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Spotify playlist search client (token and response caches inside)
    pub spotify: Arc<SpotifyClient>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(spotify: SpotifyClient) -> Self {
        Self {
            spotify: Arc::new(spotify),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI routes (HTML pages)
        .merge(api::ui_routes())
        // API routes
        .merge(api::mood_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
