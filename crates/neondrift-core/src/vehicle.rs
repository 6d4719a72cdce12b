//! Vehicle state types and control signals.
//!
//! Two vehicle variants share one motion-integration convention (forward
//! motion along `(sin(heading), cos(heading))` in the ground plane):
//!
//! - [`PlayerVehicle`]: velocity accumulates from throttle/brake input
//! - [`PursuerVehicle`]: no velocity state; moves at a fixed pursuit speed
//!
//! Headings are signed radians and accumulate without wrapping, so a vehicle
//! that keeps turning left ends up with a heading greater than `2π`.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::kinematics::GROUND_OFFSET;

bitflags::bitflags! {
    /// Discrete control signals for the player vehicle.
    ///
    /// Forward and backward are resolved by precedence (forward wins when
    /// both are held); left and right apply sequentially and cancel when both
    /// are held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Controls: u8 {
        /// Throttle.
        const FORWARD = 1 << 0;
        /// Brake / reverse.
        const BACKWARD = 1 << 1;
        /// Steer left (heading increases).
        const LEFT = 1 << 2;
        /// Steer right (heading decreases).
        const RIGHT = 1 << 3;
    }
}

/// Unique identifier for a pursuit vehicle.
///
/// Pursuers have stable identity: the pool grows and shrinks with the wanted
/// level, but surviving pursuers keep their id and their in-progress chase
/// state (position and heading).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PursuerId(u64);

impl PursuerId {
    /// Creates a new `PursuerId` from a raw `u64` value.
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

impl fmt::Debug for PursuerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PursuerId({})", self.0)
    }
}

impl fmt::Display for PursuerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The player-controlled vehicle.
///
/// # Invariants
///
/// Maintained by [`PlayerVehicle::step`]:
///
/// - `velocity` lies in `[-5, 15]`
/// - `position.x` and `position.z` lie in `[-45, 45]`
/// - `position.y` is always the ground offset (0.3)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerVehicle {
    /// World position; y is pinned to the ground offset.
    pub position: Vec3,
    /// Signed heading in radians, unbounded.
    pub heading: f32,
    /// Signed scalar speed along the heading direction.
    pub velocity: f32,
}

impl PlayerVehicle {
    /// Creates a player vehicle at rest at the world origin.
    #[must_use]
    pub fn new() -> Self {
        Self::at_position(0.0, 0.0)
    }

    /// Creates a player vehicle at rest at the given ground coordinates.
    #[must_use]
    pub fn at_position(x: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, GROUND_OFFSET, z),
            heading: 0.0,
            velocity: 0.0,
        }
    }
}

impl Default for PlayerVehicle {
    fn default() -> Self {
        Self::new()
    }
}

/// An autonomous pursuit vehicle.
///
/// Pursuers carry no velocity state; they move at a fixed speed and steer
/// toward a target position sampled fresh each step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PursuerVehicle {
    /// World position; y is pinned to the ground offset.
    pub position: Vec3,
    /// Signed heading in radians, unbounded.
    pub heading: f32,
}

impl PursuerVehicle {
    /// Creates a pursuer at the given ground coordinates, heading north (+z).
    #[must_use]
    pub fn at_position(x: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, GROUND_OFFSET, z),
            heading: 0.0,
        }
    }
}

/// Siren flash phase for pursuit vehicles.
///
/// Purely a timing driver for the rendering collaborator: the phase alternates
/// at [`crate::kinematics::SIREN_FLASH_HZ`] as simulation time advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SirenPhase {
    /// Red half of the flash cycle.
    Red,
    /// Blue half of the flash cycle.
    Blue,
}

impl SirenPhase {
    /// Returns the siren phase at the given elapsed simulation time.
    #[must_use]
    pub fn at(elapsed_secs: f32) -> Self {
        if (elapsed_secs * crate::kinematics::SIREN_FLASH_HZ).fract() > 0.5 {
            Self::Red
        } else {
            Self::Blue
        }
    }
}
