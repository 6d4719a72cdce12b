//! Proximity-triggered gameplay events: cash pickups and missions.
//!
//! This is the gameplay-event collaborator of the kinematic core: it polls
//! the player's pose against fixed pickup and marker coordinates with simple
//! ground-plane distance tests and emits [`GameEvent`]s. Everything
//! time-based here is a plain deadline check against accumulated simulation
//! time; nothing suspends or blocks.

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::kinematics::GROUND_OFFSET;

/// Fixed cash pickup spawn points (ground-plane x, z).
pub const PICKUP_SPAWN_POINTS: [(f32, f32); 5] =
    [(5.0, 5.0), (-10.0, 8.0), (15.0, -12.0), (-8.0, -15.0), (20.0, 20.0)];

/// Hover height of a cash pickup.
pub const PICKUP_HEIGHT: f32 = 0.5;

/// Collection radius around a pickup.
pub const PICKUP_RADIUS: f32 = 1.5;

/// Delay before a collected pickup respawns, seconds.
pub const PICKUP_RESPAWN_SECS: f64 = 5.0;

/// Half-extent of the square respawned pickups land in.
pub const PICKUP_RESPAWN_EXTENT: f32 = 30.0;

/// Base cash reward for a pickup; a random roll of up to
/// [`PICKUP_CASH_ROLL`] is added on top.
pub const PICKUP_CASH_BASE: i64 = 100;

/// Upper bound (exclusive) of the random cash roll.
pub const PICKUP_CASH_ROLL: i64 = 100;

/// Respect earned per pickup.
pub const PICKUP_RESPECT: i64 = 5;

/// Probability that grabbing cash bumps the wanted level.
pub const PICKUP_WANTED_CHANCE: f64 = 0.3;

/// Activation radius around a mission marker.
pub const MARKER_RADIUS: f32 = 2.0;

/// Mission duration, seconds. Completion is a deadline check.
pub const MISSION_DURATION_SECS: f64 = 5.0;

/// The three mission types, each anchored to a fixed marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionKind {
    /// High risk, high reward; counts as a crime.
    Heist,
    /// Street race.
    Race,
    /// Package delivery; no heat.
    Delivery,
}

impl MissionKind {
    /// All mission kinds, in marker order.
    pub const ALL: [Self; 3] = [Self::Heist, Self::Race, Self::Delivery];

    /// Stable string form, used in the mission log and crime feed.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heist => "heist",
            Self::Race => "race",
            Self::Delivery => "delivery",
        }
    }

    /// The fixed marker position for this mission.
    #[must_use]
    pub fn marker_position(self) -> Vec3 {
        let (x, z) = match self {
            Self::Heist => (-20.0, -20.0),
            Self::Race => (20.0, -20.0),
            Self::Delivery => (0.0, 30.0),
        };
        Vec3::new(x, GROUND_OFFSET, z)
    }

    /// The payout for completing this mission.
    #[must_use]
    pub const fn reward(self) -> MissionReward {
        match self {
            Self::Heist => MissionReward {
                cash: 5000,
                respect: 50,
                wanted_delta: 2,
                counts_as_crime: true,
            },
            Self::Race => MissionReward {
                cash: 2000,
                respect: 30,
                wanted_delta: 1,
                counts_as_crime: false,
            },
            Self::Delivery => MissionReward {
                cash: 1000,
                respect: 20,
                wanted_delta: 0,
                counts_as_crime: false,
            },
        }
    }
}

impl std::fmt::Display for MissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payout of a completed mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionReward {
    /// Cash earned.
    pub cash: i64,
    /// Respect earned.
    pub respect: i64,
    /// Wanted level change caused by the mission.
    pub wanted_delta: i8,
    /// Whether completion is also reported as a crime.
    pub counts_as_crime: bool,
}

/// A cash pickup slot.
///
/// A slot is live unless it has a pending respawn deadline; collected
/// pickups come back [`PICKUP_RESPAWN_SECS`] later at a fresh random spot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashPickup {
    /// Current position (meaningful only while live).
    pub position: Vec3,
    /// Respawn deadline in simulation seconds, `None` while live.
    pub respawn_at: Option<f64>,
}

impl CashPickup {
    fn at(x: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, PICKUP_HEIGHT, z),
            respawn_at: None,
        }
    }

    /// Returns `true` when the pickup is collectable.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.respawn_at.is_none()
    }
}

/// A mission in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveMission {
    /// Which mission is running.
    pub kind: MissionKind,
    /// Simulation time the mission was activated at.
    pub started_at: f64,
}

impl ActiveMission {
    /// Progress in percent, clamped to `0..=100`.
    #[must_use]
    pub fn progress(&self, now: f64) -> u8 {
        let fraction = (now - self.started_at) / MISSION_DURATION_SECS;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            (fraction * 100.0).clamp(0.0, 100.0) as u8
        }
    }
}

/// Something that happened this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player drove through a cash pickup.
    CashCollected {
        /// Total cash grabbed (base + random roll).
        amount: i64,
        /// Whether this grab raises the wanted level.
        wanted_bump: bool,
    },
    /// The player reached a mission marker with no mission running.
    MissionStarted {
        /// The activated mission.
        kind: MissionKind,
    },
    /// The running mission hit its completion deadline.
    MissionCompleted {
        /// The finished mission.
        kind: MissionKind,
        /// Its payout.
        reward: MissionReward,
    },
}

/// Pickup and mission state, polled once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvents {
    pickups: Vec<CashPickup>,
    active_mission: Option<ActiveMission>,
}

impl GameEvents {
    /// Creates the initial event state: five live pickups, no mission.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pickups: PICKUP_SPAWN_POINTS
                .iter()
                .map(|&(x, z)| CashPickup::at(x, z))
                .collect(),
            active_mission: None,
        }
    }

    /// Polls proximity triggers and deadlines against the player's position.
    ///
    /// Order per frame: due pickups respawn, live pickups within
    /// [`PICKUP_RADIUS`] are collected, then the running mission completes at
    /// its deadline or, if none is running, the first marker within
    /// [`MARKER_RADIUS`] activates.
    pub fn poll(&mut self, player_pos: Vec3, now: f64, rng: &mut ChaCha8Rng) -> Vec<GameEvent> {
        let mut fired = Vec::new();

        for pickup in &mut self.pickups {
            if let Some(deadline) = pickup.respawn_at {
                if now >= deadline {
                    let x = rng.gen_range(-PICKUP_RESPAWN_EXTENT..PICKUP_RESPAWN_EXTENT);
                    let z = rng.gen_range(-PICKUP_RESPAWN_EXTENT..PICKUP_RESPAWN_EXTENT);
                    *pickup = CashPickup::at(x, z);
                    debug!(x, z, "cash pickup respawned");
                }
                continue;
            }

            if ground_distance(player_pos, pickup.position) <= PICKUP_RADIUS {
                pickup.respawn_at = Some(now + PICKUP_RESPAWN_SECS);
                let amount = PICKUP_CASH_BASE + rng.gen_range(0..PICKUP_CASH_ROLL);
                let wanted_bump = rng.gen_bool(PICKUP_WANTED_CHANCE);
                debug!(amount, wanted_bump, "cash collected");
                fired.push(GameEvent::CashCollected {
                    amount,
                    wanted_bump,
                });
            }
        }

        if let Some(active) = self.active_mission {
            if now - active.started_at >= MISSION_DURATION_SECS {
                self.active_mission = None;
                debug!(mission = %active.kind, "mission completed");
                fired.push(GameEvent::MissionCompleted {
                    kind: active.kind,
                    reward: active.kind.reward(),
                });
            }
        } else {
            for kind in MissionKind::ALL {
                if ground_distance(player_pos, kind.marker_position()) <= MARKER_RADIUS {
                    self.active_mission = Some(ActiveMission {
                        kind,
                        started_at: now,
                    });
                    debug!(mission = %kind, "mission started");
                    fired.push(GameEvent::MissionStarted { kind });
                    break;
                }
            }
        }

        fired
    }

    /// The mission currently running, if any.
    #[must_use]
    pub const fn active_mission(&self) -> Option<ActiveMission> {
        self.active_mission
    }

    /// The pickup slots, live or pending respawn.
    #[must_use]
    pub fn pickups(&self) -> &[CashPickup] {
        &self.pickups
    }
}

impl Default for GameEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Distance between two points projected onto the ground plane.
fn ground_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

// =============================================================================
// Tests
// =============================================================================
