//! Test module for determinism and integration tests.
//!
//! - **Determinism tests**: same seed + same input script ⇒ identical state
//! - **Integration tests**: full frame loop from controls to store feeds
//! - **Helper functions**: session/world factories and driving utilities
//!
//! # Test Structure
//!
//! - `determinism.rs`: replay and seed-divergence tests
//! - `integration.rs`: end-to-end gameplay tests
//! - `helpers.rs`: test setup utilities and factory functions

mod helpers;

// Re-export for convenience
pub use helpers::*;
