//! Service modules for the album credits workflow
//!
//! Upstream clients (Genius, Instagram), the catalog seam, pacing, contact
//! extraction and album credit aggregation.

pub mod catalog;
pub mod contact_extractor;
pub mod credit_aggregator;
pub mod genius_client;
pub mod pacing;
pub mod social_client;

pub use catalog::{CatalogApi, CatalogError};
pub use contact_extractor::{extract_contact_email, extract_email};
pub use credit_aggregator::{AggregationOptions, CreditAggregator};
pub use genius_client::GeniusClient;
pub use pacing::{Pacer, PacingPolicy};
pub use social_client::{InstagramClient, SocialApi};
