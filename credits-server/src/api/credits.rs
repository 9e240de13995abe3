//! Album credits endpoint

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::models::PersonCredit;
use crate::services::{AggregationOptions, CreditAggregator};
use crate::{ApiResult, AppState};

/// Query parameters for album credits
#[derive(Debug, Default, Deserialize)]
pub struct CreditsQuery {
    /// Also fetch Instagram profiles and extract contact emails
    #[serde(default)]
    pub contacts: bool,
}

#[derive(Debug, Serialize)]
pub struct CreditsResponse {
    pub credits: Vec<PersonCredit>,
}

/// GET /api/album/:album_id/credits[?contacts=true]
///
/// All-or-nothing: a failed track listing or credit fetch returns 500 with
/// the upstream message and no credits. Handle lookups are best-effort.
pub async fn get_album_credits(
    State(state): State<AppState>,
    Path(album_id): Path<u64>,
    Query(query): Query<CreditsQuery>,
) -> ApiResult<Json<CreditsResponse>> {
    let options = AggregationOptions {
        resolve_contacts: query.contacts,
    };

    let credits = CreditAggregator::new(state.catalog.as_ref(), &state.pacing)
        .with_social(state.social.as_deref())
        .aggregate_album_credits(album_id, options)
        .await
        .map_err(|e| {
            error!(album_id, "Credits error: {}", e);
            e
        })?;

    Ok(Json(CreditsResponse { credits }))
}

/// Build album credits routes
pub fn credits_routes() -> Router<AppState> {
    Router::new().route("/api/album/:album_id/credits", get(get_album_credits))
}
