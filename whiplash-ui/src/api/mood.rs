//! Mood classification and playlist search JSON API

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use whiplash_mood::detect_mood;

use crate::error::{ApiError, ApiResult};
use crate::spotify::PlaylistEntry;
use crate::AppState;

/// Classification request body
#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub text: String,
}

/// Classification response
#[derive(Debug, Serialize, Deserialize)]
pub struct MoodResponse {
    /// The text that was classified
    pub input: String,
    /// Ranked labels, most frequent first
    pub moods: Vec<String>,
    /// First entry of the ranked sequence
    pub top: String,
}

/// POST /api/mood
///
/// Classify free text into ranked mood labels. Total over all inputs;
/// empty text classifies as Neutral.
pub async fn classify(Json(request): Json<MoodRequest>) -> Json<MoodResponse> {
    let moods = detect_mood(&request.text);
    let top = moods[0].clone(); // detect_mood never returns empty

    Json(MoodResponse {
        input: request.text,
        moods,
        top,
    })
}

/// Playlist search query parameters
#[derive(Debug, Deserialize)]
pub struct PlaylistQuery {
    pub mood: String,
}

/// GET /api/playlists?mood=...
///
/// Search Spotify playlists for a mood label. The label is passed
/// verbatim as the query.
pub async fn playlists(
    State(state): State<AppState>,
    Query(query): Query<PlaylistQuery>,
) -> ApiResult<Json<Vec<PlaylistEntry>>> {
    if query.mood.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "mood query parameter is empty".to_string(),
        ));
    }

    let entries = state.spotify.search_playlists(&query.mood).await?;
    Ok(Json(entries))
}

/// Build mood API routes
pub fn mood_routes() -> Router<AppState> {
    Router::new()
        .route("/api/mood", post(classify))
        .route("/api/playlists", get(playlists))
}
