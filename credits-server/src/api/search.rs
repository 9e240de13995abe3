//! Album search endpoint

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::models::AlbumSummary;
use crate::{ApiError, ApiResult, AppState};

/// Query parameters for album search
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Album name (required, non-blank)
    #[serde(default)]
    pub album: String,
    /// Artist name narrowing the search
    #[serde(default)]
    pub artist: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<AlbumSummary>,
}

/// GET /api/search?album=...&artist=...
///
/// **Errors:**
/// - 400 Bad Request: missing or blank `album` (checked before any upstream call)
/// - 500 Internal Server Error: the upstream search request failed
pub async fn search_albums(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchResponse>> {
    let album = query.album.trim();
    let artist = query.artist.trim();

    if album.is_empty() {
        return Err(ApiError::BadRequest("album parameter required".to_string()));
    }

    let results = state
        .catalog
        .search_albums(album, artist)
        .await
        .map_err(|e| {
            error!("Search error: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(SearchResponse { results }))
}

/// Build search routes
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/api/search", get(search_albums))
}
