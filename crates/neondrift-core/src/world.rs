//! The world container: player vehicle, pursuer pool, and simulation time.
//!
//! The world is advanced synchronously once per render frame. Within a step
//! the player integrates first, then every pursuer steers toward a snapshot
//! of the player's position taken after the player moved. Pursuers never
//! mutate the player and never read each other, so their relative update
//! order is not observable; they are still iterated in id order (`BTreeMap`)
//! for bit-identical runs across platforms.
//!
//! # Determinism
//!
//! Pursuer spawn positions come from a `ChaCha8Rng` seeded at construction.
//! Two worlds built with the same seed and stepped with the same input
//! sequence are identical, which is what the replay tests rely on.

use std::collections::BTreeMap;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::vehicle::{Controls, PlayerVehicle, PursuerId, PursuerVehicle, SirenPhase};

/// Half-extent of the square pursuers spawn into.
pub const PURSUER_SPAWN_EXTENT: f32 = 40.0;

/// A vehicle pose as consumed by the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehiclePose {
    /// World position.
    pub position: Vec3,
    /// Signed heading in radians.
    pub heading: f32,
}

/// The simulation world.
///
/// # Example
///
/// ```
/// use neondrift_core::vehicle::Controls;
/// use neondrift_core::world::World;
///
/// let mut world = World::new(42);
/// world.sync_pursuers(2);
/// assert_eq!(world.pursuer_count(), 2);
///
/// for _ in 0..60 {
///     world.step(1.0 / 60.0, Controls::FORWARD);
/// }
/// assert!(world.player().position.z > 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// The player-controlled vehicle.
    player: PlayerVehicle,
    /// Pursuit vehicles with stable identity, iterated in id order.
    pursuers: BTreeMap<PursuerId, PursuerVehicle>,
    /// Monotonically increasing pursuer id counter; ids are never reused.
    next_pursuer_id: u64,
    /// Completed simulation steps.
    tick: u64,
    /// Accumulated simulation time in seconds.
    elapsed: f64,
    /// Deterministic RNG for spawn positions (re-seeded after deserialize).
    #[serde(skip)]
    rng: Option<ChaCha8Rng>,
    /// Seed the RNG was created from, kept for replay.
    seed: u64,
}

impl World {
    /// Creates a new world with the player at rest at the origin.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            player: PlayerVehicle::new(),
            pursuers: BTreeMap::new(),
            next_pursuer_id: 0,
            tick: 0,
            elapsed: 0.0,
            rng: Some(ChaCha8Rng::seed_from_u64(seed)),
            seed,
        }
    }

    /// Advances the whole world by `dt` seconds.
    ///
    /// The player steps first; pursuers then chase a snapshot of the player's
    /// new position. `dt` must be positive and finite.
    pub fn step(&mut self, dt: f32, controls: Controls) {
        self.player.step(dt, controls);

        // Read-only snapshot of the target; pursuers never see each other.
        let target = self.player.position;
        for pursuer in self.pursuers.values_mut() {
            pursuer.step(dt, target);
        }

        self.elapsed += f64::from(dt);
        self.tick += 1;
    }

    /// Grows or shrinks the pursuer pool to match the wanted level.
    ///
    /// Surviving pursuers keep their id, position, and heading; only the
    /// excess (newest first) is despawned when the level drops, and new
    /// pursuers spawn at pseudo-random positions when it rises.
    pub fn sync_pursuers(&mut self, wanted_level: u8) {
        let target = usize::from(wanted_level);

        while self.pursuers.len() < target {
            let id = PursuerId::new(self.next_pursuer_id);
            self.next_pursuer_id += 1;

            let (x, z) = {
                let rng = self.rng_mut();
                (
                    rng.gen_range(-PURSUER_SPAWN_EXTENT..PURSUER_SPAWN_EXTENT),
                    rng.gen_range(-PURSUER_SPAWN_EXTENT..PURSUER_SPAWN_EXTENT),
                )
            };
            debug!(pursuer = %id, x, z, "pursuer spawned");
            self.pursuers.insert(id, PursuerVehicle::at_position(x, z));
        }

        while self.pursuers.len() > target {
            if let Some((id, _)) = self.pursuers.pop_last() {
                debug!(pursuer = %id, "pursuer despawned");
            }
        }
    }

    /// Returns the player vehicle.
    #[must_use]
    pub fn player(&self) -> &PlayerVehicle {
        &self.player
    }

    /// Returns a mutable reference to the player vehicle.
    ///
    /// Intended for scenario setup; normal play mutates the player only
    /// through [`World::step`].
    #[must_use]
    pub fn player_mut(&mut self) -> &mut PlayerVehicle {
        &mut self.player
    }

    /// Returns the player's pose for the rendering collaborator.
    #[must_use]
    pub fn player_pose(&self) -> VehiclePose {
        VehiclePose {
            position: self.player.position,
            heading: self.player.heading,
        }
    }

    /// Iterates pursuers in id order.
    pub fn pursuers(&self) -> impl Iterator<Item = (PursuerId, &PursuerVehicle)> + '_ {
        self.pursuers.iter().map(|(id, p)| (*id, p))
    }

    /// Returns pursuer poses in id order for the rendering collaborator.
    #[must_use]
    pub fn pursuer_poses(&self) -> Vec<(PursuerId, VehiclePose)> {
        self.pursuers
            .iter()
            .map(|(id, p)| {
                (
                    *id,
                    VehiclePose {
                        position: p.position,
                        heading: p.heading,
                    },
                )
            })
            .collect()
    }

    /// Returns the number of live pursuers.
    #[must_use]
    pub fn pursuer_count(&self) -> usize {
        self.pursuers.len()
    }

    /// Returns the number of completed simulation steps.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Returns accumulated simulation time in seconds.
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Returns the seed this world was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the current siren flash phase (timing driver for rendering).
    #[must_use]
    pub fn siren_phase(&self) -> SirenPhase {
        #[allow(clippy::cast_possible_truncation)]
        SirenPhase::at(self.elapsed as f32)
    }

    /// Mutable access to the deterministic RNG.
    ///
    /// The RNG is not serialized; after deserialization it is re-created from
    /// the original seed on first use.
    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        let seed = self.seed;
        self.rng.get_or_insert_with(|| ChaCha8Rng::seed_from_u64(seed))
    }
}

// =============================================================================
// Tests
// =============================================================================
