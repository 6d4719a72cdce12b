//! The session: one player's world wired to the persistence store.
//!
//! A [`GameSession`] owns a [`World`], its [`GameEvents`], and a [`Store`],
//! and translates fired events into stat deltas, feed entries, and pursuer
//! pool changes. The frontend calls [`GameSession::step`] once per render
//! frame and reads poses and stats back through the accessors.

use neondrift_store::{PlayerId, StatDelta, StatSnapshot, Store, StoreError};
use tracing::info;

use crate::events::{GameEvent, GameEvents, PICKUP_RESPECT};
use crate::vehicle::Controls;
use crate::world::World;

/// A running game session for a single player.
///
/// # Example
///
/// ```
/// use neondrift_core::session::GameSession;
/// use neondrift_core::vehicle::Controls;
///
/// let mut session = GameSession::new("session-abc123", Some("Tommy"), 7);
/// session.step(1.0 / 60.0, Controls::FORWARD).unwrap();
/// assert_eq!(session.stats().unwrap().cash, 500);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    world: World,
    events: GameEvents,
    store: Store,
    player_id: PlayerId,
}

impl GameSession {
    /// Starts a session, creating (or resuming) the player keyed by
    /// `session_id`.
    #[must_use]
    pub fn new(session_id: &str, name: Option<&str>, seed: u64) -> Self {
        let mut store = Store::new();
        let player_id = store.get_or_create(session_id, name, 0);
        info!(player = %player_id, seed, "session started");

        let mut session = Self {
            world: World::new(seed),
            events: GameEvents::new(),
            store,
            player_id,
        };
        session.resync_pursuers();
        session
    }

    /// Resumes a session against an existing store (e.g. a deserialized one).
    #[must_use]
    pub fn with_store(session_id: &str, name: Option<&str>, seed: u64, mut store: Store) -> Self {
        let player_id = store.get_or_create(session_id, name, 0);
        let mut session = Self {
            world: World::new(seed),
            events: GameEvents::new(),
            store,
            player_id,
        };
        session.resync_pursuers();
        session
    }

    /// Advances the session by `dt` seconds and applies whatever fired.
    ///
    /// Cash grabs and mission completions become stat deltas and feed
    /// entries; the pursuer pool is re-synced whenever the wanted level may
    /// have moved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PlayerNotFound`] if the session's player has
    /// been removed from the store.
    pub fn step(&mut self, dt: f32, controls: Controls) -> Result<Vec<GameEvent>, StoreError> {
        self.world.step(dt, controls);

        let now = self.world.elapsed();
        let player_pos = self.world.player().position;
        let fired = self
            .events
            .poll(player_pos, now, self.world.rng_mut());

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let now_ms = (now * 1000.0) as u64;

        let mut snapshot = None;
        for event in &fired {
            snapshot = Some(self.apply(*event, now_ms)?);
        }

        if let Some(snapshot) = snapshot {
            self.world.sync_pursuers(snapshot.wanted_level);
        }

        Ok(fired)
    }

    /// Applies one fired event to the store.
    fn apply(&mut self, event: GameEvent, now_ms: u64) -> Result<StatSnapshot, StoreError> {
        match event {
            GameEvent::CashCollected {
                amount,
                wanted_bump,
            } => {
                let delta = StatDelta {
                    cash_delta: amount,
                    respect_delta: PICKUP_RESPECT,
                    wanted_delta: i8::from(wanted_bump),
                    mission_completed: false,
                    crime_committed: true,
                };
                let snapshot = self.store.update_stats(self.player_id, &delta, now_ms)?;
                let name = self.player_name()?;
                self.store
                    .report_crime(self.player_id, &name, "grabbed cash", "Downtown", now_ms);
                Ok(snapshot)
            }
            GameEvent::MissionStarted { .. } => {
                // Activation alone moves no stats; report the current state.
                self.stats()
            }
            GameEvent::MissionCompleted { kind, reward } => {
                let delta = StatDelta {
                    cash_delta: reward.cash,
                    respect_delta: reward.respect,
                    wanted_delta: reward.wanted_delta,
                    mission_completed: true,
                    crime_committed: reward.counts_as_crime,
                };
                let snapshot = self.store.update_stats(self.player_id, &delta, now_ms)?;
                self.store.log_mission(
                    self.player_id,
                    kind.as_str(),
                    reward.cash,
                    reward.respect,
                    now_ms,
                );
                let name = self.player_name()?;
                self.store.report_crime(
                    self.player_id,
                    &name,
                    &format!("completed {kind}"),
                    "Vice City",
                    now_ms,
                );
                Ok(snapshot)
            }
        }
    }

    /// Decays the wanted level by one step and shrinks the pursuer pool.
    ///
    /// The frontend fires this from its heat-decay timer.
    pub fn decay_wanted(&mut self) {
        self.store.reduce_wanted(self.player_id);
        self.resync_pursuers();
    }

    /// Re-reads the wanted level and syncs the pursuer pool to it.
    fn resync_pursuers(&mut self) {
        let wanted = self
            .store
            .player(self.player_id)
            .map_or(0, |p| p.wanted_level);
        self.world.sync_pursuers(wanted);
    }

    fn player_name(&self) -> Result<String, StoreError> {
        self.store
            .player(self.player_id)
            .map(|p| p.name.clone())
            .ok_or(StoreError::PlayerNotFound(self.player_id))
    }

    /// The session player's current stat snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PlayerNotFound`] if the player has been removed
    /// from the store.
    pub fn stats(&self) -> Result<StatSnapshot, StoreError> {
        self.store
            .player(self.player_id)
            .map(|p| StatSnapshot {
                cash: p.cash,
                respect: p.respect,
                wanted_level: p.wanted_level,
            })
            .ok_or(StoreError::PlayerNotFound(self.player_id))
    }

    /// Progress of the running mission in percent, if one is active.
    #[must_use]
    pub fn mission_progress(&self) -> Option<u8> {
        self.events
            .active_mission()
            .map(|m| m.progress(self.world.elapsed()))
    }

    /// The simulation world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world, for scenario setup.
    #[must_use]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The gameplay-event state.
    #[must_use]
    pub fn events(&self) -> &GameEvents {
        &self.events
    }

    /// The persistence store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable access to the store, for profile mutations such as car color.
    #[must_use]
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// The session player's id.
    #[must_use]
    pub const fn player_id(&self) -> PlayerId {
        self.player_id
    }
}

// =============================================================================
// Tests
// =============================================================================
