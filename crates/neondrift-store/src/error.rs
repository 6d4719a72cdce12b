//! Error types for store operations.

use thiserror::Error;

use crate::player::PlayerId;

/// Errors returned by [`crate::Store`] mutation methods.
///
/// The store has exactly one failure mode: a mutation referencing a player
/// that was never created (or a stale id). This is a caller bug, not a
/// recoverable condition, so callers are expected to hold a valid id obtained
/// from [`crate::Store::get_or_create`] before mutating.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The referenced player does not exist.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
}
