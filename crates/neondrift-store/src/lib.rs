//! # Neondrift Store
//!
//! In-memory persistence substrate for the Neondrift driving game: player
//! profiles, stat mutation with clamping, a global leaderboard, and
//! append-only crime/mission event logs.
//!
//! The store is process-local and single-threaded. All mutation goes through
//! [`Store`] methods; the only failure mode is referencing a player that does
//! not exist, surfaced as [`StoreError::PlayerNotFound`].
//!
//! ## Quick Start
//!
//! ```rust
//! use neondrift_store::{StatDelta, Store};
//!
//! let mut store = Store::new();
//! let id = store.get_or_create("session-abc", Some("Tommy"), 0);
//!
//! let snapshot = store
//!     .update_stats(
//!         id,
//!         &StatDelta {
//!             cash_delta: 150,
//!             respect_delta: 5,
//!             wanted_delta: 1,
//!             mission_completed: false,
//!             crime_committed: true,
//!         },
//!         1_000,
//!     )
//!     .unwrap();
//!
//! assert_eq!(snapshot.cash, 650); // 500 starting cash + 150
//! assert_eq!(snapshot.wanted_level, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod player;
pub mod records;
pub mod store;

// Re-exports for convenience
pub use error::StoreError;
pub use player::{PlayerId, PlayerRecord, StatDelta, StatSnapshot};
pub use records::{CrimeReport, LeaderboardEntry, MissionRecord};
pub use store::{Store, FEED_PAGE_SIZE};
