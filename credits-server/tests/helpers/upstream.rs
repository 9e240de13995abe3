//! Mock upstream servers
//!
//! Each mock is a plain axum router bound to an ephemeral local port.
//!
//! Genius fixture:
//! - search hits: 101, 104 (500), 102, 103, 105 (no album)
//! - album 1: page 1 = [101 Intro], page 2 = [102 Single]
//! - album 2: [103 Deep Cut]
//! - album 7: three pages, each reporting a stale `next_page` of 1 until the last
//! - album 99: page 1 ok, page 2 fails with 500
//! - artists: 1 → "jane", 2 → 500, 3 → no handle, 4 → "private"

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use credits_server::services::{GeniusClient, InstagramClient, Pacer, PacingPolicy, SocialApi};
use credits_server::AppState;

pub const TEST_TOKEN: &str = "test-token";

/// Requests observed by the mock Genius server
#[derive(Clone, Default)]
pub struct Recorded {
    pub auth_headers: Arc<Mutex<Vec<String>>>,
    pub song_requests: Arc<Mutex<Vec<u64>>>,
    pub track_pages: Arc<Mutex<Vec<(u64, u32)>>>,
}

/// Serve `router` on 127.0.0.1 and return its base URL
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn artist(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "url": format!("https://genius.com/artists/{}", name.replace(' ', "-")),
    })
}

fn song_fixture(id: u64) -> Option<Value> {
    let jane = artist(1, "Jane Doe");
    let sam = artist(2, "Sam Roe");
    let max = artist(3, "Max Poe");

    let song = match id {
        101 => json!({
            "id": 101,
            "title": "Intro",
            "album": {"id": 1, "name": "First Album", "cover_art_url": "http://img.test/1.jpg"},
            "primary_artist": {"id": 50, "name": "The Band"},
            "custom_performances": [{"label": "Mixing Engineer", "artists": [jane.clone()]}],
            "producer_artists": [jane, sam.clone()]
        }),
        102 => json!({
            "id": 102,
            "title": "Single",
            "album": {"id": 1, "name": "First Album", "cover_art_url": "http://img.test/1.jpg"},
            "primary_artist": {"id": 50, "name": "The Band"},
            "custom_performances": [
                {"label": "Guitar", "artists": [sam]},
                {"label": "Vocals", "artists": [max]}
            ],
            "producer_artists": []
        }),
        103 => json!({
            "id": 103,
            "title": "Deep Cut",
            "album": {"id": 2, "name": "Second Album", "cover_art_url": null},
            "primary_artist": {"id": 51, "name": "Other Band"},
            "custom_performances": [],
            "producer_artists": [artist(4, "Private Person")]
        }),
        105 => json!({
            "id": 105,
            "title": "Loose Single",
            "album": null,
            "primary_artist": {"id": 50, "name": "The Band"}
        }),
        _ => return None,
    };
    Some(song)
}

fn server_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"meta": {"status": 500, "message": message}})),
    )
        .into_response()
}

async fn search(State(rec): State<Recorded>, headers: HeaderMap) -> Json<Value> {
    if let Some(auth) = headers.get("authorization") {
        rec.auth_headers
            .lock()
            .unwrap()
            .push(auth.to_str().unwrap_or_default().to_string());
    }
    let hits: Vec<Value> = [101, 104, 102, 103, 105]
        .iter()
        .map(|id| json!({"type": "song", "result": {"id": id}}))
        .collect();
    Json(json!({"meta": {"status": 200}, "response": {"hits": hits}}))
}

async fn song(State(rec): State<Recorded>, Path(id): Path<u64>) -> Response {
    rec.song_requests.lock().unwrap().push(id);
    match song_fixture(id) {
        Some(song) => Json(json!({"response": {"song": song}})).into_response(),
        None => server_error("song lookup exploded"),
    }
}

async fn tracks(
    State(rec): State<Recorded>,
    Path(album_id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    rec.track_pages.lock().unwrap().push((album_id, page));

    let track = |id: u64, title: &str| json!({"number": id - 100, "song": {"id": id, "title": title}});

    let (tracks, next_page) = match (album_id, page) {
        (1, 1) => (vec![track(101, "Intro")], json!(2)),
        (1, 2) => (vec![track(102, "Single")], Value::Null),
        (2, 1) => (vec![track(103, "Deep Cut")], Value::Null),
        (7, 1) => (vec![track(111, "One")], json!(1)),
        (7, 2) => (vec![track(112, "Two")], json!(1)),
        (7, 3) => (vec![track(113, "Three")], Value::Null),
        (99, 1) => (vec![track(101, "Intro")], json!(2)),
        (99, _) => return server_error("tracks page exploded"),
        _ => (Vec::new(), Value::Null),
    };

    Json(json!({"response": {"tracks": tracks, "next_page": next_page}})).into_response()
}

async fn artist_detail(Path(id): Path<u64>) -> Response {
    let handle = match id {
        1 => json!("jane"),
        4 => json!("private"),
        2 => return server_error("artist lookup exploded"),
        _ => Value::Null,
    };
    Json(json!({"response": {"artist": {"id": id, "instagram_name": handle}}})).into_response()
}

/// Mock Genius API router
pub fn mock_genius(rec: Recorded) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/songs/:id", get(song))
        .route("/albums/:id/tracks", get(tracks))
        .route("/artists/:id", get(artist_detail))
        .with_state(rec)
}

async fn web_profile_info(Query(params): Query<HashMap<String, String>>) -> Response {
    let username = params.get("username").cloned().unwrap_or_default();
    match username.as_str() {
        "jane" => Json(json!({
            "data": {"user": {
                "full_name": "Jane Doe",
                "biography": "Producer. Bookings: jane.doe+work@label.co",
                "external_url": "https://linktr.ee/janedoe",
                "edge_followed_by": {"count": 4200}
            }},
            "status": "ok"
        }))
        .into_response(),
        "linkonly" => Json(json!({
            "data": {"user": {
                "full_name": "Link Only",
                "biography": "no email in here",
                "external_url": "http://x.com?e=foo@bar.io",
                "edge_followed_by": {"count": 7}
            }},
            "status": "ok"
        }))
        .into_response(),
        "private" => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Please wait a few minutes", "require_login": true, "status": "fail"})),
        )
            .into_response(),
        "walled" => (
            StatusCode::FOUND,
            [("location", "https://www.instagram.com/accounts/login/")],
        )
            .into_response(),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream hiccup").into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"status": "fail"}))).into_response(),
    }
}

/// Mock Instagram web API router
pub fn mock_instagram() -> Router {
    Router::new().route("/api/v1/users/web_profile_info/", get(web_profile_info))
}

/// App state wired to local mocks with pacing disabled
pub fn test_state(genius_url: &str, instagram_url: Option<&str>) -> AppState {
    let pacing = PacingPolicy::disabled();
    let catalog = GeniusClient::new(
        TEST_TOKEN,
        genius_url,
        Duration::from_secs(5),
        Arc::new(Pacer::disabled("search_song")),
    )
    .unwrap();

    let social = instagram_url.map(|url| {
        Arc::new(InstagramClient::new(url, Duration::from_secs(5))) as Arc<dyn SocialApi>
    });

    AppState::new(Arc::new(catalog), social, pacing, true)
}
