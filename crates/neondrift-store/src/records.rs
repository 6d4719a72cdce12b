//! Leaderboard rows and append-only event records.

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// One row of the global leaderboard, keyed by player.
///
/// The score mirrors the player's respect stat and is refreshed on every
/// [`crate::Store::update_stats`] call (upsert, never duplicated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// The player this row belongs to.
    pub player_id: PlayerId,
    /// Display name, denormalized for feed rendering.
    pub player_name: String,
    /// Current score (= respect).
    pub score: i64,
    /// Timestamp of the last score refresh, milliseconds.
    pub updated_at: u64,
}

/// An entry in the crime feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrimeReport {
    /// The offending player.
    pub player_id: PlayerId,
    /// Display name, denormalized for feed rendering.
    pub player_name: String,
    /// Short description, e.g. `"grabbed cash"`.
    pub crime_type: String,
    /// Where it happened, e.g. `"Downtown"`.
    pub location: String,
    /// When it happened, milliseconds.
    pub timestamp: u64,
}

/// A completed-mission log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRecord {
    /// The player who completed the mission.
    pub player_id: PlayerId,
    /// Mission kind, e.g. `"heist"`.
    pub mission_type: String,
    /// Cash reward paid out.
    pub cash_earned: i64,
    /// Respect reward paid out.
    pub respect_earned: i64,
    /// Completion timestamp, milliseconds.
    pub completed_at: u64,
}
