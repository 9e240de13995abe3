//! HTTP API handlers for credits-server
//!
//! Read-only JSON endpoints:
//! - `GET /api/search` - album search
//! - `GET /api/album/:album_id/credits` - aggregated album credits
//! - `GET /api/health` - health probe

pub mod credits;
pub mod health;
pub mod search;

pub use credits::credits_routes;
pub use health::health_routes;
pub use search::search_routes;
