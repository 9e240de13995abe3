//! Music catalog seam
//!
//! The aggregator and HTTP handlers talk to the catalog only through
//! [`CatalogApi`], so tests can substitute in-memory implementations.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AlbumSummary, CreditEntry, Track};

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Album, track and credit lookups against a remote music catalog
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Albums reachable from the top search hits, deduplicated by album id
    ///
    /// The initial search failing is an error; individual hit lookups that
    /// fail are skipped.
    async fn search_albums(
        &self,
        album_name: &str,
        artist_name: &str,
    ) -> Result<Vec<AlbumSummary>, CatalogError>;

    /// Every track of an album across all pages (all-or-nothing)
    async fn get_album_tracks(&self, album_id: u64) -> Result<Vec<Track>, CatalogError>;

    /// Credited people for one song, keyed by display name
    async fn get_song_credits(&self, song_id: u64) -> Result<Vec<CreditEntry>, CatalogError>;

    /// Best-effort Instagram handle lookup; never fails, `None` on any error
    async fn get_artist_social_handle(&self, artist_id: Option<u64>) -> Option<String>;
}
