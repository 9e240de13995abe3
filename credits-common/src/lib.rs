//! # Album Credits Common Library
//!
//! Shared code for the album credits service:
//! - Error types
//! - TOML configuration schema and loading
//! - Genius token resolution

pub mod config;
pub mod error;

pub use error::{Error, Result};
