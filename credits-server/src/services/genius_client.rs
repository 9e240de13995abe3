//! Genius API client
//!
//! Album search, track listing, per-song credits and artist handle lookup
//! against the Genius REST API. Every call carries the static bearer token
//! and the same per-request timeout; nothing is retried.
//!
//! # API Reference
//! - `GET /search?q=...` - song hits (no album info)
//! - `GET /songs/{id}` - full song record incl. album and credits
//! - `GET /albums/{id}/tracks?page=N&per_page=50` - paginated track listing
//! - `GET /artists/{id}` - artist record incl. `instagram_name`

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::catalog::{CatalogApi, CatalogError};
use super::pacing::Pacer;
use crate::models::{AlbumSummary, CreditEntry, Track};

const USER_AGENT: &str = concat!("album-credits/", env!("CARGO_PKG_VERSION"));

/// Hits requested from the search endpoint
const SEARCH_PAGE_SIZE: u32 = 20;

/// Hits actually resolved to albums (one song fetch each)
const MAX_SEARCH_HITS: usize = 8;

const TRACKS_PAGE_SIZE: u32 = 50;

/// Role assigned to entries from `producer_artists`
const PRODUCER_ROLE: &str = "Producer";

/// Max characters of an error body carried into error messages
const ERROR_BODY_LIMIT: usize = 200;

/// Genius API client
pub struct GeniusClient {
    http_client: Client,
    base_url: String,
    search_pacer: Arc<Pacer>,
}

impl GeniusClient {
    /// Create a client sending `Authorization: Bearer <token>` on every call
    pub fn new(
        token: &str,
        base_url: impl Into<String>,
        timeout: Duration,
        search_pacer: Arc<Pacer>,
    ) -> Result<Self, CatalogError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|e| CatalogError::Network(format!("Invalid bearer token: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);

        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            search_pacer,
        })
    }

    /// GET `{base_url}{path}` and decode the `response` envelope
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Querying Genius API");

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let envelope: dto::Envelope<T> = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(envelope.response)
    }

    async fn fetch_song(&self, song_id: u64) -> Result<dto::Song, CatalogError> {
        let song: dto::SongResponse = self.get_json(&format!("/songs/{}", song_id), &[]).await?;
        Ok(song.song)
    }
}

#[async_trait]
impl CatalogApi for GeniusClient {
    async fn search_albums(
        &self,
        album_name: &str,
        artist_name: &str,
    ) -> Result<Vec<AlbumSummary>, CatalogError> {
        let query = format!("{} {}", artist_name, album_name).trim().to_string();

        let search: dto::SearchResponse = self
            .get_json(
                "/search",
                &[("q", query.clone()), ("per_page", SEARCH_PAGE_SIZE.to_string())],
            )
            .await?;

        let mut albums: Vec<AlbumSummary> = Vec::new();

        // Search hits carry no album info; each hit needs its song record
        for hit in search.hits.iter().take(MAX_SEARCH_HITS) {
            let song_id = hit.result.id;
            self.search_pacer.pace().await;

            let song = match self.fetch_song(song_id).await {
                Ok(song) => song,
                Err(e) => {
                    debug!(song_id, error = %e, "Skipping search hit");
                    continue;
                }
            };

            if let Some(album) = song.album {
                if !albums.iter().any(|a| a.id == album.id) {
                    albums.push(AlbumSummary {
                        id: album.id,
                        name: album.name,
                        artist: song
                            .primary_artist
                            .and_then(|a| a.name)
                            .unwrap_or_default(),
                        cover_art: album.cover_art_url,
                        songs: Vec::new(),
                    });
                }
            }
        }

        info!(query = %query, albums = albums.len(), "Album search complete");
        Ok(albums)
    }

    async fn get_album_tracks(&self, album_id: u64) -> Result<Vec<Track>, CatalogError> {
        let path = format!("/albums/{}/tracks", album_id);
        let mut tracks = Vec::new();
        let mut page: u32 = 1;

        loop {
            let listing: dto::TracksResponse = self
                .get_json(
                    &path,
                    &[
                        ("page", page.to_string()),
                        ("per_page", TRACKS_PAGE_SIZE.to_string()),
                    ],
                )
                .await?;

            tracks.extend(listing.tracks.into_iter().map(|t| Track {
                id: t.song.id,
                title: t.song.title,
            }));

            // next_page only signals whether more pages exist
            if listing.next_page.is_none() {
                break;
            }
            page += 1;
        }

        debug!(album_id, tracks = tracks.len(), "Fetched album track listing");
        Ok(tracks)
    }

    async fn get_song_credits(&self, song_id: u64) -> Result<Vec<CreditEntry>, CatalogError> {
        let song = self.fetch_song(song_id).await?;
        Ok(credits_from_song(&song))
    }

    async fn get_artist_social_handle(&self, artist_id: Option<u64>) -> Option<String> {
        let artist_id = artist_id?;

        match self
            .get_json::<dto::ArtistResponse>(&format!("/artists/{}", artist_id), &[])
            .await
        {
            Ok(artist) => artist.artist.instagram_name.filter(|h| !h.is_empty()),
            Err(e) => {
                warn!(artist_id, error = %e, "Could not get Instagram handle for artist");
                None
            }
        }
    }
}

/// Merge `custom_performances` and `producer_artists` into one entry per
/// credited name
fn credits_from_song(song: &dto::Song) -> Vec<CreditEntry> {
    let mut credits: Vec<CreditEntry> = Vec::new();

    let performances = song.custom_performances.iter().flatten().flat_map(|perf| {
        let role = perf.label.as_deref().unwrap_or_default();
        perf.artists.iter().flatten().map(move |artist| (artist, role))
    });
    let producers = song
        .producer_artists
        .iter()
        .flatten()
        .map(|artist| (artist, PRODUCER_ROLE));

    for (artist, role) in performances.chain(producers) {
        let name = match artist.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };

        let index = match credits.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                credits.push(CreditEntry::new(
                    name,
                    artist.url.clone().unwrap_or_default(),
                    artist.id,
                ));
                credits.len() - 1
            }
        };
        credits[index].add_role(role);
    }

    credits
}

/// Wire shapes of the Genius API responses (only the fields we read)
mod dto {
    use super::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct Envelope<T> {
        pub response: T,
    }

    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        pub hits: Vec<SearchHit>,
    }

    #[derive(Debug, Deserialize)]
    pub struct SearchHit {
        pub result: HitResult,
    }

    #[derive(Debug, Deserialize)]
    pub struct HitResult {
        pub id: u64,
    }

    #[derive(Debug, Deserialize)]
    pub struct SongResponse {
        pub song: Song,
    }

    #[derive(Debug, Deserialize)]
    pub struct Song {
        pub album: Option<AlbumRef>,
        pub primary_artist: Option<ArtistRef>,
        pub custom_performances: Option<Vec<Performance>>,
        pub producer_artists: Option<Vec<ArtistRef>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct AlbumRef {
        pub id: u64,
        pub name: String,
        pub cover_art_url: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ArtistRef {
        pub id: Option<u64>,
        pub name: Option<String>,
        pub url: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Performance {
        pub label: Option<String>,
        pub artists: Option<Vec<ArtistRef>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct TracksResponse {
        pub tracks: Vec<TrackItem>,
        pub next_page: Option<u32>,
    }

    #[derive(Debug, Deserialize)]
    pub struct TrackItem {
        pub song: TrackSong,
    }

    #[derive(Debug, Deserialize)]
    pub struct TrackSong {
        pub id: u64,
        pub title: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ArtistResponse {
        pub artist: Artist,
    }

    #[derive(Debug, Deserialize)]
    pub struct Artist {
        pub instagram_name: Option<String>,
    }
}
