//! Album search results and track listings

use serde::{Deserialize, Serialize};

/// Album discovered through search
///
/// Only a seed for a later track lookup by `id`; never re-fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumSummary {
    /// Genius album id
    pub id: u64,
    pub name: String,
    /// Primary artist of the song that led to this album
    pub artist: String,
    pub cover_art: Option<String>,
    /// Always empty; tracks are fetched separately
    pub songs: Vec<String>,
}

/// One entry of an album track listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Genius song id
    pub id: u64,
    pub title: String,
}
