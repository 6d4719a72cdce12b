//! Player identity, profile records, and stat mutation payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cash balance granted to newly created players.
pub const STARTING_CASH: i64 = 500;

/// Default car color for newly created players.
pub const DEFAULT_CAR_COLOR: &str = "#ff00ff";

/// Maximum wanted level; the escalation counter saturates here.
pub const MAX_WANTED_LEVEL: u8 = 5;

/// Unique identifier for a player.
///
/// `PlayerId` is a newtype wrapper around `u64`. Ids are assigned
/// monotonically by the store and are never reused.
///
/// # Example
///
/// ```
/// use neondrift_store::PlayerId;
///
/// let id = PlayerId::new(3);
/// assert_eq!(id.as_u64(), 3);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u64);

impl PlayerId {
    /// Creates a new `PlayerId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// A player profile with gameplay stats.
///
/// # Invariants
///
/// - `cash` and `respect` are never negative.
/// - `wanted_level` lies in `[0, MAX_WANTED_LEVEL]`.
///
/// Both invariants are enforced by [`crate::Store::update_stats`], which
/// clamps deltas rather than rejecting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Unique identifier assigned by the store.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Opaque session identity the player is keyed by.
    pub session_id: String,
    /// Cash balance, floored at zero.
    pub cash: i64,
    /// Respect score, floored at zero. Doubles as the leaderboard score.
    pub respect: i64,
    /// Wanted escalation level, `0..=5`. Drives the pursuer population.
    pub wanted_level: u8,
    /// Lifetime mission completions.
    pub total_missions: u64,
    /// Lifetime crimes committed.
    pub total_crimes: u64,
    /// Cosmetic car color as a hex string.
    pub car_color: String,
    /// Last activity timestamp in milliseconds.
    pub last_seen: u64,
}

impl PlayerRecord {
    /// Creates a fresh player with starting stats.
    ///
    /// The default name is derived from the first six characters of the
    /// session id when no explicit name is given.
    #[must_use]
    pub fn new(id: PlayerId, session_id: &str, name: Option<&str>, now_ms: u64) -> Self {
        let name = match name {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => {
                let prefix: String = session_id.chars().take(6).collect();
                format!("Player_{prefix}")
            }
        };

        Self {
            id,
            name,
            session_id: session_id.to_owned(),
            cash: STARTING_CASH,
            respect: 0,
            wanted_level: 0,
            total_missions: 0,
            total_crimes: 0,
            car_color: DEFAULT_CAR_COLOR.to_owned(),
            last_seen: now_ms,
        }
    }
}

/// A batch of stat changes produced by one gameplay event.
///
/// Deltas are applied atomically by [`crate::Store::update_stats`]; cash and
/// respect floor at zero, wanted saturates into `[0, 5]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDelta {
    /// Cash to add (or remove, when negative).
    pub cash_delta: i64,
    /// Respect to add (or remove, when negative).
    pub respect_delta: i64,
    /// Wanted level change; clamped into range after applying.
    pub wanted_delta: i8,
    /// Whether this event completes a mission (bumps `total_missions`).
    pub mission_completed: bool,
    /// Whether this event counts as a crime (bumps `total_crimes`).
    pub crime_committed: bool,
}

/// The post-mutation stat values returned by [`crate::Store::update_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSnapshot {
    /// Cash after clamping.
    pub cash: i64,
    /// Respect after clamping.
    pub respect: i64,
    /// Wanted level after clamping.
    pub wanted_level: u8,
}
