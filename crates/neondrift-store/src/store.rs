//! The store: player tables, leaderboard, and event feeds.
//!
//! Storage mirrors the backing schema of the original service:
//!
//! - `players`, indexed by id and by session identity
//! - `leaderboard`, one row per player, upserted on stat mutation
//! - `crime_reports` and `missions`, append-only logs
//!
//! # Determinism
//!
//! Player and leaderboard tables use `BTreeMap` so iteration order is
//! deterministic across platforms. The session index is a `HashMap`, which is
//! acceptable because it is only ever probed by key, never iterated in a way
//! that affects results.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::player::{PlayerId, PlayerRecord, StatDelta, StatSnapshot, MAX_WANTED_LEVEL};
use crate::records::{CrimeReport, LeaderboardEntry, MissionRecord};

/// Page size for the crime feed, leaderboard, and mission history queries.
pub const FEED_PAGE_SIZE: usize = 10;

/// In-memory backing store for player persistence.
///
/// # Example
///
/// ```
/// use neondrift_store::Store;
///
/// let mut store = Store::new();
/// let id = store.get_or_create("session-1", Some("Tommy"), 0);
///
/// let player = store.player(id).unwrap();
/// assert_eq!(player.name, "Tommy");
/// assert_eq!(player.cash, 500);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store {
    /// Monotonically increasing player id counter.
    next_player_id: u64,
    /// Player profiles in deterministic id order.
    players: BTreeMap<PlayerId, PlayerRecord>,
    /// Session identity -> player id index.
    by_session: HashMap<String, PlayerId>,
    /// Leaderboard rows, one per player.
    leaderboard: BTreeMap<PlayerId, LeaderboardEntry>,
    /// Append-only crime feed, ascending by insertion time.
    crime_reports: Vec<CrimeReport>,
    /// Append-only mission log, ascending by insertion time.
    missions: Vec<MissionRecord>,
}

impl Store {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Players
    // =========================================================================

    /// Looks up a player by session identity, creating one if absent.
    ///
    /// On a hit the player's last-seen timestamp is refreshed. On a miss a new
    /// player is created with starting stats (500 cash, zero respect/wanted,
    /// default car color) and a name derived from the session id when `name`
    /// is `None` or empty.
    pub fn get_or_create(&mut self, session_id: &str, name: Option<&str>, now_ms: u64) -> PlayerId {
        if let Some(id) = self.by_session.get(session_id).copied() {
            if let Some(player) = self.players.get_mut(&id) {
                player.last_seen = now_ms;
            }
            return id;
        }

        let id = PlayerId::new(self.next_player_id);
        self.next_player_id += 1;

        let player = PlayerRecord::new(id, session_id, name, now_ms);
        info!(player = %id, name = %player.name, "created player");

        self.by_session.insert(session_id.to_owned(), id);
        self.players.insert(id, player);
        id
    }

    /// Returns the player keyed by session identity, if any.
    #[must_use]
    pub fn get_by_session(&self, session_id: &str) -> Option<&PlayerRecord> {
        let id = self.by_session.get(session_id)?;
        self.players.get(id)
    }

    /// Returns a player by id, if it exists.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.players.get(&id)
    }

    /// Returns the number of players in the store.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Applies a stat delta to a player, clamping the results.
    ///
    /// Cash and respect floor at zero; the wanted level saturates into
    /// `[0, MAX_WANTED_LEVEL]`. Mission/crime totals are bumped according to
    /// the delta flags, the last-seen timestamp is refreshed, and the
    /// leaderboard row is upserted with `score = respect`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PlayerNotFound`] when `id` does not reference a
    /// live player. This is fatal to the operation; nothing is retried.
    pub fn update_stats(
        &mut self,
        id: PlayerId,
        delta: &StatDelta,
        now_ms: u64,
    ) -> Result<StatSnapshot, StoreError> {
        let player = self
            .players
            .get_mut(&id)
            .ok_or(StoreError::PlayerNotFound(id))?;

        player.cash = player.cash.saturating_add(delta.cash_delta).max(0);
        player.respect = player.respect.saturating_add(delta.respect_delta).max(0);
        player.wanted_level = (i16::from(player.wanted_level) + i16::from(delta.wanted_delta))
            .clamp(0, i16::from(MAX_WANTED_LEVEL)) as u8;
        player.total_missions += u64::from(delta.mission_completed);
        player.total_crimes += u64::from(delta.crime_committed);
        player.last_seen = now_ms;

        let snapshot = StatSnapshot {
            cash: player.cash,
            respect: player.respect,
            wanted_level: player.wanted_level,
        };
        let player_name = player.name.clone();

        debug!(
            player = %id,
            cash = snapshot.cash,
            respect = snapshot.respect,
            wanted = snapshot.wanted_level,
            "applied stat delta"
        );

        // Leaderboard upsert: score tracks respect.
        self.leaderboard
            .entry(id)
            .and_modify(|entry| {
                entry.score = snapshot.respect;
                entry.updated_at = now_ms;
            })
            .or_insert_with(|| LeaderboardEntry {
                player_id: id,
                player_name,
                score: snapshot.respect,
                updated_at: now_ms,
            });

        Ok(snapshot)
    }

    /// Updates a player's cosmetic car color.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PlayerNotFound`] when `id` does not reference a
    /// live player.
    pub fn update_car_color(&mut self, id: PlayerId, color: &str) -> Result<(), StoreError> {
        let player = self
            .players
            .get_mut(&id)
            .ok_or(StoreError::PlayerNotFound(id))?;
        player.car_color = color.to_owned();
        Ok(())
    }

    /// Reduces the player's wanted level by one, stopping at zero.
    ///
    /// A missing player is a silent no-op: this mutation is fired from decay
    /// timers that may outlive the player reference.
    pub fn reduce_wanted(&mut self, id: PlayerId) {
        if let Some(player) = self.players.get_mut(&id) {
            if player.wanted_level > 0 {
                player.wanted_level -= 1;
                debug!(player = %id, wanted = player.wanted_level, "wanted level decayed");
            }
        }
    }

    // =========================================================================
    // Feeds
    // =========================================================================

    /// Appends an entry to the crime feed.
    pub fn report_crime(
        &mut self,
        id: PlayerId,
        player_name: &str,
        crime_type: &str,
        location: &str,
        now_ms: u64,
    ) {
        debug!(player = %id, crime = crime_type, location, "crime reported");
        self.crime_reports.push(CrimeReport {
            player_id: id,
            player_name: player_name.to_owned(),
            crime_type: crime_type.to_owned(),
            location: location.to_owned(),
            timestamp: now_ms,
        });
    }

    /// Appends a completed mission to the mission log.
    pub fn log_mission(
        &mut self,
        id: PlayerId,
        mission_type: &str,
        cash_earned: i64,
        respect_earned: i64,
        now_ms: u64,
    ) {
        debug!(player = %id, mission = mission_type, cash_earned, "mission logged");
        self.missions.push(MissionRecord {
            player_id: id,
            mission_type: mission_type.to_owned(),
            cash_earned,
            respect_earned,
            completed_at: now_ms,
        });
    }

    /// Returns the most recent crime reports, newest first.
    ///
    /// Limited to [`FEED_PAGE_SIZE`] entries.
    #[must_use]
    pub fn recent_crimes(&self) -> Vec<CrimeReport> {
        self.crime_reports
            .iter()
            .rev()
            .take(FEED_PAGE_SIZE)
            .cloned()
            .collect()
    }

    /// Returns a player's mission history, newest first.
    ///
    /// Limited to [`FEED_PAGE_SIZE`] entries.
    #[must_use]
    pub fn missions_for(&self, id: PlayerId) -> Vec<MissionRecord> {
        self.missions
            .iter()
            .rev()
            .filter(|m| m.player_id == id)
            .take(FEED_PAGE_SIZE)
            .cloned()
            .collect()
    }

    /// Returns the top leaderboard rows, highest score first.
    ///
    /// Ties break on player id (older players first) so the ordering is
    /// deterministic. Limited to [`FEED_PAGE_SIZE`] entries.
    #[must_use]
    pub fn top_players(&self) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = self.leaderboard.values().cloned().collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score).then(a.player_id.cmp(&b.player_id)));
        entries.truncate(FEED_PAGE_SIZE);
        entries
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn delta(cash: i64, respect: i64, wanted: i8) -> StatDelta {
        StatDelta {
            cash_delta: cash,
            respect_delta: respect,
            wanted_delta: wanted,
            ..StatDelta::default()
        }
    }

    mod player_lifecycle_tests {
        use super::*;

        #[test]
        fn get_or_create_assigns_sequential_ids() {
            let mut store = Store::new();
            let a = store.get_or_create("s1", None, 0);
            let b = store.get_or_create("s2", None, 0);

            assert_eq!(a, PlayerId::new(0));
            assert_eq!(b, PlayerId::new(1));
            assert_eq!(store.player_count(), 2);
        }

        #[test]
        fn get_or_create_is_idempotent_per_session() {
            let mut store = Store::new();
            let a = store.get_or_create("s1", Some("Tommy"), 0);
            let b = store.get_or_create("s1", Some("SomebodyElse"), 500);

            assert_eq!(a, b);
            assert_eq!(store.player_count(), 1);
            // Existing player keeps the original name but gets a fresh last_seen.
            let player = store.player(a).unwrap();
            assert_eq!(player.name, "Tommy");
            assert_eq!(player.last_seen, 500);
        }

        #[test]
        fn get_by_session_finds_player() {
            let mut store = Store::new();
            let id = store.get_or_create("s1", Some("Tommy"), 0);

            let player = store.get_by_session("s1").unwrap();
            assert_eq!(player.id, id);
            assert!(store.get_by_session("unknown").is_none());
        }

        #[test]
        fn update_car_color() {
            let mut store = Store::new();
            let id = store.get_or_create("s1", None, 0);

            store.update_car_color(id, "#00ffff").unwrap();
            assert_eq!(store.player(id).unwrap().car_color, "#00ffff");
        }

        #[test]
        fn update_car_color_unknown_player_fails() {
            let mut store = Store::new();
            let err = store.update_car_color(PlayerId::new(99), "#00ffff");
            assert_eq!(err, Err(StoreError::PlayerNotFound(PlayerId::new(99))));
        }

        #[test]
        fn serialization_roundtrip_preserves_id_sequence() {
            let mut store = Store::new();
            store.get_or_create("s1", None, 0);
            store.get_or_create("s2", None, 0);

            let json = serde_json::to_string(&store).unwrap();
            let mut restored: Store = serde_json::from_str(&json).unwrap();

            let next = restored.get_or_create("s3", None, 0);
            assert_eq!(next, PlayerId::new(2));
            assert_eq!(restored.player_count(), 3);
        }
    }

    mod stat_mutation_tests {
        use super::*;

        #[test]
        fn deltas_apply_and_totals_bump() {
            let mut store = Store::new();
            let id = store.get_or_create("s1", None, 0);

            let snapshot = store
                .update_stats(
                    id,
                    &StatDelta {
                        cash_delta: 150,
                        respect_delta: 5,
                        wanted_delta: 1,
                        mission_completed: true,
                        crime_committed: true,
                    },
                    1000,
                )
                .unwrap();

            assert_eq!(snapshot.cash, 650);
            assert_eq!(snapshot.respect, 5);
            assert_eq!(snapshot.wanted_level, 1);

            let player = store.player(id).unwrap();
            assert_eq!(player.total_missions, 1);
            assert_eq!(player.total_crimes, 1);
            assert_eq!(player.last_seen, 1000);
        }

        #[test]
        fn cash_and_respect_floor_at_zero() {
            let mut store = Store::new();
            let id = store.get_or_create("s1", None, 0);

            let snapshot = store.update_stats(id, &delta(-10_000, -50, 0), 0).unwrap();
            assert_eq!(snapshot.cash, 0);
            assert_eq!(snapshot.respect, 0);
        }

        #[test]
        fn wanted_level_saturates_at_five() {
            let mut store = Store::new();
            let id = store.get_or_create("s1", None, 0);

            let snapshot = store.update_stats(id, &delta(0, 0, 100), 0).unwrap();
            assert_eq!(snapshot.wanted_level, MAX_WANTED_LEVEL);

            let snapshot = store.update_stats(id, &delta(0, 0, -100), 0).unwrap();
            assert_eq!(snapshot.wanted_level, 0);
        }

        #[test]
        fn unknown_player_is_fatal() {
            let mut store = Store::new();
            let err = store.update_stats(PlayerId::new(7), &delta(1, 1, 0), 0);
            assert_eq!(err, Err(StoreError::PlayerNotFound(PlayerId::new(7))));
        }

        #[test]
        fn reduce_wanted_decrements_and_stops_at_zero() {
            let mut store = Store::new();
            let id = store.get_or_create("s1", None, 0);
            store.update_stats(id, &delta(0, 0, 2), 0).unwrap();

            store.reduce_wanted(id);
            assert_eq!(store.player(id).unwrap().wanted_level, 1);
            store.reduce_wanted(id);
            store.reduce_wanted(id);
            assert_eq!(store.player(id).unwrap().wanted_level, 0);
        }

        #[test]
        fn reduce_wanted_missing_player_is_noop() {
            let mut store = Store::new();
            // Must not panic or error.
            store.reduce_wanted(PlayerId::new(42));
        }

        proptest! {
            /// Clamping invariants hold for any sequence of deltas.
            #[test]
            fn stat_invariants_hold_for_any_delta_sequence(
                deltas in prop::collection::vec((-10_000i64..10_000, -500i64..500, -10i8..10), 1..40)
            ) {
                let mut store = Store::new();
                let id = store.get_or_create("s1", None, 0);

                for (cash, respect, wanted) in deltas {
                    let snapshot = store.update_stats(id, &delta(cash, respect, wanted), 0).unwrap();
                    prop_assert!(snapshot.cash >= 0);
                    prop_assert!(snapshot.respect >= 0);
                    prop_assert!(snapshot.wanted_level <= MAX_WANTED_LEVEL);
                }
            }
        }
    }

    mod leaderboard_tests {
        use super::*;

        #[test]
        fn update_stats_upserts_leaderboard_row() {
            let mut store = Store::new();
            let id = store.get_or_create("s1", Some("Tommy"), 0);

            store.update_stats(id, &delta(0, 30, 0), 100).unwrap();
            let top = store.top_players();
            assert_eq!(top.len(), 1);
            assert_eq!(top[0].player_name, "Tommy");
            assert_eq!(top[0].score, 30);

            // Second mutation updates the same row rather than inserting.
            store.update_stats(id, &delta(0, 20, 0), 200).unwrap();
            let top = store.top_players();
            assert_eq!(top.len(), 1);
            assert_eq!(top[0].score, 50);
            assert_eq!(top[0].updated_at, 200);
        }

        #[test]
        fn top_players_sorted_by_score_descending() {
            let mut store = Store::new();
            for (session, respect) in [("a", 10), ("b", 50), ("c", 30)] {
                let id = store.get_or_create(session, Some(session), 0);
                store.update_stats(id, &delta(0, respect, 0), 0).unwrap();
            }

            let top = store.top_players();
            let scores: Vec<i64> = top.iter().map(|e| e.score).collect();
            assert_eq!(scores, vec![50, 30, 10]);
        }

        #[test]
        fn top_players_limited_to_page_size() {
            let mut store = Store::new();
            for i in 0..15 {
                let id = store.get_or_create(&format!("s{i}"), None, 0);
                store.update_stats(id, &delta(0, i, 0), 0).unwrap();
            }

            assert_eq!(store.top_players().len(), FEED_PAGE_SIZE);
        }

        #[test]
        fn score_ties_break_on_player_id() {
            let mut store = Store::new();
            let a = store.get_or_create("a", None, 0);
            let b = store.get_or_create("b", None, 0);
            store.update_stats(b, &delta(0, 10, 0), 0).unwrap();
            store.update_stats(a, &delta(0, 10, 0), 0).unwrap();

            let top = store.top_players();
            assert_eq!(top[0].player_id, a);
            assert_eq!(top[1].player_id, b);
        }
    }

    mod feed_tests {
        use super::*;

        #[test]
        fn recent_crimes_newest_first() {
            let mut store = Store::new();
            let id = store.get_or_create("s1", Some("Tommy"), 0);

            store.report_crime(id, "Tommy", "grabbed cash", "Downtown", 100);
            store.report_crime(id, "Tommy", "completed heist", "Vice City", 200);

            let feed = store.recent_crimes();
            assert_eq!(feed.len(), 2);
            assert_eq!(feed[0].crime_type, "completed heist");
            assert_eq!(feed[1].crime_type, "grabbed cash");
        }

        #[test]
        fn recent_crimes_limited_to_page_size() {
            let mut store = Store::new();
            let id = store.get_or_create("s1", Some("Tommy"), 0);
            for i in 0..25 {
                store.report_crime(id, "Tommy", &format!("crime {i}"), "Downtown", i);
            }

            let feed = store.recent_crimes();
            assert_eq!(feed.len(), FEED_PAGE_SIZE);
            assert_eq!(feed[0].crime_type, "crime 24");
        }

        #[test]
        fn missions_for_filters_by_player() {
            let mut store = Store::new();
            let a = store.get_or_create("a", None, 0);
            let b = store.get_or_create("b", None, 0);

            store.log_mission(a, "heist", 5000, 50, 100);
            store.log_mission(b, "race", 2000, 30, 200);
            store.log_mission(a, "delivery", 1000, 20, 300);

            let missions = store.missions_for(a);
            assert_eq!(missions.len(), 2);
            assert_eq!(missions[0].mission_type, "delivery");
            assert_eq!(missions[1].mission_type, "heist");
        }
    }
}
