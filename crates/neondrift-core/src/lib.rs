//! # Neondrift Core
//!
//! Simulation core for Neondrift, a neon-city arcade driving game.
//!
//! The crate advances a single-threaded, step-driven world once per render
//! frame: the player's vehicle integrates discrete control signals into
//! continuous velocity, heading, and position; pursuit vehicles chase the
//! player with a bounded turn rate, their population driven by the wanted
//! level. Proximity-triggered gameplay events (cash pickups, missions) feed
//! stat deltas into the [`neondrift_store`] persistence substrate.
//!
//! ## Architecture
//!
//! - [`vehicle`]: Vehicle state types and control signals
//! - [`kinematics`]: The motion-integration and pursuit-steering algorithms
//! - [`world`]: The deterministic world container (player + pursuer pool)
//! - [`events`]: Cash pickups and mission markers with deadline timers
//! - [`session`]: Wires a world and its events to the persistence store
//!
//! ## Usage
//!
//! ```rust
//! use neondrift_core::session::GameSession;
//! use neondrift_core::vehicle::Controls;
//!
//! let mut session = GameSession::new("session-abc", Some("Tommy"), 42);
//! let events = session.step(1.0 / 60.0, Controls::FORWARD).unwrap();
//! assert!(events.is_empty()); // nothing within reach on the first frame
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export the store for callers that manage persistence directly
pub use neondrift_store;

pub mod events;
pub mod kinematics;
pub mod session;
pub mod vehicle;
pub mod world;

pub use events::{GameEvent, GameEvents, MissionKind};
pub use session::GameSession;
pub use vehicle::{Controls, PlayerVehicle, PursuerId, PursuerVehicle, SirenPhase};
pub use world::World;

#[cfg(test)]
mod tests;
