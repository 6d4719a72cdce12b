//! Motion integration for player and pursuit vehicles.
//!
//! Both controllers share one integration convention: forward motion is along
//! `(sin(heading), cos(heading))` in the ground plane, scaled by speed and the
//! elapsed step time `dt`. They differ only in how the heading is derived:
//!
//! - The player turns from discrete steering input, gated by a minimum speed.
//! - Pursuers steer toward a target with a bounded turn rate, taking the
//!   shortest angular path.
//!
//! Every step is a single bounded computation: pure, total, and deterministic
//! for finite inputs. There is no error taxonomy here.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::vehicle::{Controls, PlayerVehicle, PursuerVehicle};

// =============================================================================
// Tuning constants
// =============================================================================

/// Throttle acceleration, units per second squared.
pub const ACCEL_RATE: f32 = 8.0;

/// Brake/reverse acceleration, units per second squared.
pub const BRAKE_RATE: f32 = 12.0;

/// Top forward speed for the player vehicle.
pub const MAX_FORWARD_SPEED: f32 = 15.0;

/// Top reverse speed for the player vehicle (negative).
pub const MAX_REVERSE_SPEED: f32 = -5.0;

/// Per-step velocity retention when coasting.
pub const FRICTION: f32 = 0.98;

/// Coasting speeds below this snap to exactly zero.
pub const STOP_EPSILON: f32 = 0.1;

/// Steering has no authority below this speed.
pub const STEERING_GATE: f32 = 0.5;

/// Player turn rate, radians per second at full steering input.
pub const STEER_RATE: f32 = 2.5;

/// Half-extent of the drivable world; x and z are clamped to ±this.
pub const WORLD_BOUND: f32 = 45.0;

/// Constant ground-clearance height; y never deviates from this.
pub const GROUND_OFFSET: f32 = 0.3;

/// Fixed pursuit speed; pursuers carry no accumulated velocity.
pub const PURSUIT_SPEED: f32 = 8.0;

/// Maximum pursuer turn rate, radians per second.
pub const PURSUIT_TURN_RATE: f32 = 2.0;

/// Siren flash frequency in Hz (timing driver for rendering).
pub const SIREN_FLASH_HZ: f32 = 4.0;

/// Wraps an angle into `(-π, π]`.
///
/// Used to take the shortest rotational path when steering a pursuer toward
/// its target, instead of the raw arithmetic difference (which can exceed π
/// and send the pursuer the long way around).
#[must_use]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

impl PlayerVehicle {
    /// Advances the player vehicle by `dt` seconds of the given controls.
    ///
    /// The update order is velocity, heading, position, boundary clamp:
    ///
    /// 1. FORWARD accelerates toward [`MAX_FORWARD_SPEED`]; otherwise BACKWARD
    ///    decelerates toward [`MAX_REVERSE_SPEED`] (forward has precedence
    ///    when both are held). With no throttle input, friction decays the
    ///    velocity and snaps it to zero below [`STOP_EPSILON`].
    /// 2. Steering applies only when the pre-update speed exceeds
    ///    [`STEERING_GATE`]; the turn direction follows the sign of the
    ///    pre-update velocity, so reversing mirrors the steering sense.
    ///    LEFT and RIGHT apply sequentially and cancel when both are held.
    /// 3. Position integrates along the new heading with the new velocity.
    /// 4. x and z clamp to ±[`WORLD_BOUND`]; clamping never zeroes velocity,
    ///    so a vehicle pinned against the boundary keeps its speed. y is
    ///    overwritten with [`GROUND_OFFSET`].
    pub fn step(&mut self, dt: f32, controls: Controls) {
        let prev_velocity = self.velocity;

        if controls.contains(Controls::FORWARD) {
            self.velocity = (self.velocity + dt * ACCEL_RATE).min(MAX_FORWARD_SPEED);
        } else if controls.contains(Controls::BACKWARD) {
            self.velocity = (self.velocity - dt * BRAKE_RATE).max(MAX_REVERSE_SPEED);
        } else {
            self.velocity *= FRICTION;
            if self.velocity.abs() < STOP_EPSILON {
                self.velocity = 0.0;
            }
        }

        // Steering gate and sense use the velocity from before this step.
        if prev_velocity.abs() > STEERING_GATE {
            let turn = dt * STEER_RATE * prev_velocity.signum();
            if controls.contains(Controls::LEFT) {
                self.heading += turn;
            }
            if controls.contains(Controls::RIGHT) {
                self.heading -= turn;
            }
        }

        let step = self.velocity * dt;
        self.position.x = (self.position.x + self.heading.sin() * step).clamp(-WORLD_BOUND, WORLD_BOUND);
        self.position.z = (self.position.z + self.heading.cos() * step).clamp(-WORLD_BOUND, WORLD_BOUND);
        self.position.y = GROUND_OFFSET;
    }
}

impl PursuerVehicle {
    /// Advances the pursuer by `dt` seconds toward the target position.
    ///
    /// The desired heading is `atan2(dx, dz)` (same axis convention as the
    /// player's motion). The heading turns toward it along the shortest
    /// angular path, bounded by [`PURSUIT_TURN_RATE`] per second, then the
    /// position integrates at the fixed [`PURSUIT_SPEED`] and clamps to the
    /// world bounds like the player.
    pub fn step(&mut self, dt: f32, target: Vec3) {
        let desired = (target.x - self.position.x).atan2(target.z - self.position.z);
        let diff = normalize_angle(desired - self.heading);
        self.heading += diff.signum() * diff.abs().min(dt * PURSUIT_TURN_RATE);

        let step = PURSUIT_SPEED * dt;
        self.position.x = (self.position.x + self.heading.sin() * step).clamp(-WORLD_BOUND, WORLD_BOUND);
        self.position.z = (self.position.z + self.heading.cos() * step).clamp(-WORLD_BOUND, WORLD_BOUND);
        self.position.y = GROUND_OFFSET;
    }
}

// =============================================================================
// Tests
// =============================================================================
