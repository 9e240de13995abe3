//! Test Helper Utilities
//!
//! Shared utilities for testing credits-server: local stand-ins for the
//! Genius and Instagram APIs plus app state wired to them.

pub mod upstream;

pub use upstream::{mock_genius, mock_instagram, spawn_upstream, test_state, Recorded};
