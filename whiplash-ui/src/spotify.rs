//! Spotify playlist search client
//!
//! Queries the Spotify Web API for playlists matching a mood label.
//! Authenticates with the client-credentials grant (search needs no user
//! scope) and caches both the bearer token and search responses, the
//! latter keyed by the exact query string.

use crate::config::SpotifyCredentials;
use reqwest::{header, Client};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::debug;

/// Spotify token endpoint (client-credentials grant)
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Spotify search endpoint
const SEARCH_URL: &str = "https://api.spotify.com/v1/search";

/// Default timeout for Spotify API requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Refresh the bearer token this long before it actually expires
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Playlists requested per search
const SEARCH_LIMIT: u32 = 10;

/// User-Agent header for API requests
const USER_AGENT: &str = concat!("whiplash/", env!("CARGO_PKG_VERSION"));

/// Search error type
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network request failed
    #[error("Network error: {0}")]
    Network(String),

    /// Spotify API returned a non-success status
    #[error("Spotify API error: {0}")]
    Api(String),

    /// Token endpoint rejected the credentials
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Response body did not parse
    #[error("Response parse failed: {0}")]
    Parse(String),
}

/// A playlist suggestion surfaced to the renderer.
///
/// Search records missing either field are dropped before one of these
/// is built.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PlaylistEntry {
    pub name: String,
    pub url: String,
}

/// Cached bearer token with its refresh deadline
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Spotify Web API client
///
/// Holds the reqwest client, the cached client-credentials token, and a
/// response cache keyed by the exact mood label queried. Caching lives
/// here, on the collaborator side; it never changes what the classifier
/// produced.
pub struct SpotifyClient {
    http_client: Client,
    credentials: SpotifyCredentials,
    token: Mutex<Option<CachedToken>>,
    search_cache: RwLock<HashMap<String, Vec<PlaylistEntry>>>,
}

impl SpotifyClient {
    /// Create a new client from resolved credentials
    pub fn new(credentials: SpotifyCredentials) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );

        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .default_headers(headers)
                .build()
                .expect("Failed to create HTTP client"),
            credentials,
            token: Mutex::new(None),
            search_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch or reuse a client-credentials bearer token
    async fn bearer_token(&self) -> Result<String, SearchError> {
        let mut token = self.token.lock().await;

        if let Some(cached) = token.as_ref() {
            if Instant::now() < cached.expires_at {
                return Ok(cached.access_token.clone());
            }
            debug!("Spotify token expired, refreshing");
        }

        let response = self
            .http_client
            .post(TOKEN_URL)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| SearchError::Network(format!("Spotify token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Auth(format!(
                "Spotify token endpoint returned error {}: {}",
                status, body
            )));
        }

        let grant: TokenGrant = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("Failed to parse token response: {}", e)))?;

        let lifetime = Duration::from_secs(grant.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        let access_token = grant.access_token.clone();
        *token = Some(CachedToken {
            access_token: grant.access_token,
            expires_at: Instant::now() + lifetime,
        });

        debug!(expires_in = grant.expires_in, "Spotify token refreshed");
        Ok(access_token)
    }

    /// Search playlists for a mood label.
    ///
    /// The label is used verbatim as the query. Responses are cached keyed
    /// by the exact label string; a cache hit skips the network entirely.
    pub async fn search_playlists(&self, mood: &str) -> Result<Vec<PlaylistEntry>, SearchError> {
        if let Some(hit) = self.search_cache.read().await.get(mood) {
            debug!(mood, "playlist cache hit");
            return Ok(hit.clone());
        }

        let token = self.bearer_token().await?;
        let limit = SEARCH_LIMIT.to_string();

        debug!(mood, "querying Spotify playlist search");
        let response = self
            .http_client
            .get(SEARCH_URL)
            .bearer_auth(&token)
            .query(&[("q", mood), ("type", "playlist"), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| SearchError::Network(format!("Spotify search request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api(format!(
                "Spotify search returned error {}: {}",
                status, body
            )));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("Failed to parse search response: {}", e)))?;

        let entries = collect_entries(search);
        debug!(mood, count = entries.len(), "Spotify search complete");

        self.search_cache
            .write()
            .await
            .insert(mood.to_string(), entries.clone());

        Ok(entries)
    }
}

/// Keep only records carrying both a name and a Spotify URL.
fn collect_entries(search: SearchResponse) -> Vec<PlaylistEntry> {
    search
        .playlists
        .and_then(|page| page.items)
        .unwrap_or_default()
        .into_iter()
        .flatten() // drop null items
        .filter_map(|item| {
            let name = item.name.filter(|n| !n.is_empty())?;
            let url = item
                .external_urls
                .and_then(|u| u.spotify)
                .filter(|u| !u.is_empty())?;
            Some(PlaylistEntry { name, url })
        })
        .collect()
}

// ============================================================================
// Spotify API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    expires_in: u64,
}

/// Search response, modeled loosely: Spotify omits fields and interleaves
/// null items, so every level is optional and validated before use.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    playlists: Option<PlaylistPage>,
}

#[derive(Debug, Deserialize)]
struct PlaylistPage {
    items: Option<Vec<Option<PlaylistItem>>>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    name: Option<String>,
    external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> SearchResponse {
        serde_json::from_str(body).expect("test body should parse")
    }

    #[test]
    fn well_formed_records_collect() {
        let search = parse(
            r#"{"playlists": {"items": [
                {"name": "Happy Hits", "external_urls": {"spotify": "https://open.spotify.com/playlist/1"}},
                {"name": "Mood Booster", "external_urls": {"spotify": "https://open.spotify.com/playlist/2"}}
            ]}}"#,
        );
        let entries = collect_entries(search);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Happy Hits");
        assert_eq!(entries[0].url, "https://open.spotify.com/playlist/1");
    }

    #[test]
    fn null_items_are_dropped() {
        let search = parse(
            r#"{"playlists": {"items": [
                null,
                {"name": "Happy Hits", "external_urls": {"spotify": "https://open.spotify.com/playlist/1"}},
                null
            ]}}"#,
        );
        assert_eq!(collect_entries(search).len(), 1);
    }

    #[test]
    fn records_missing_name_or_url_are_dropped() {
        let search = parse(
            r#"{"playlists": {"items": [
                {"external_urls": {"spotify": "https://open.spotify.com/playlist/1"}},
                {"name": "No Urls"},
                {"name": "Empty Urls", "external_urls": {}},
                {"name": "", "external_urls": {"spotify": "https://open.spotify.com/playlist/2"}},
                {"name": "Keeper", "external_urls": {"spotify": "https://open.spotify.com/playlist/3"}}
            ]}}"#,
        );
        let entries = collect_entries(search);
        assert_eq!(entries, vec![PlaylistEntry {
            name: "Keeper".to_string(),
            url: "https://open.spotify.com/playlist/3".to_string(),
        }]);
    }

    #[test]
    fn missing_playlists_object_yields_empty() {
        assert!(collect_entries(parse("{}")).is_empty());
        assert!(collect_entries(parse(r#"{"playlists": {}}"#)).is_empty());
        assert!(collect_entries(parse(r#"{"playlists": {"items": []}}"#)).is_empty());
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let result = serde_json::from_str::<SearchResponse>(r#"[1, 2, 3]"#);
        assert!(result.is_err());
    }
}
