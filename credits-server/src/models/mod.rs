//! Data models for the album credits service
//!
//! Everything here is request-scoped: built while serving one HTTP request
//! and dropped after the response is serialized.

pub mod album;
pub mod credit;
pub mod social;

pub use album::{AlbumSummary, Track};
pub use credit::{merge_roles, CreditEntry, PersonCredit, SongCredit};
pub use social::{ProfileData, SocialLookup, SocialProfile};
