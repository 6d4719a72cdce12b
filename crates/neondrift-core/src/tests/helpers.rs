//! Test helper functions for setting up sessions and driving the world.
//!
//! Factory functions and input-script utilities that keep the determinism
//! and integration tests short and consistent.

use crate::events::MissionKind;
use crate::session::GameSession;
use crate::vehicle::Controls;
use crate::world::World;

/// Fixed frame duration used throughout the tests (60 Hz).
pub const FRAME: f32 = 1.0 / 60.0;

// =============================================================================
// Factories
// =============================================================================

/// Creates a session with a fixed identity and seed.
pub fn test_session(seed: u64) -> GameSession {
    GameSession::new("session-abc123", Some("Tommy"), seed)
}

/// Creates a bare world with the given seed.
pub fn test_world(seed: u64) -> World {
    World::new(seed)
}

// =============================================================================
// Driving utilities
// =============================================================================

/// Teleports the session player to the given ground coordinates.
pub fn park_at(session: &mut GameSession, x: f32, z: f32) {
    let player = session.world_mut().player_mut();
    player.position.x = x;
    player.position.z = z;
    player.velocity = 0.0;
}

/// Parks the session player on a mission marker.
pub fn park_on_marker(session: &mut GameSession, kind: MissionKind) {
    let marker = kind.marker_position();
    park_at(session, marker.x, marker.z);
}

/// Steps the session at 60 Hz for `secs` of simulation time, collecting every
/// event that fires along the way.
pub fn run_for(session: &mut GameSession, secs: f64, controls: Controls) -> Vec<crate::events::GameEvent> {
    let deadline = session.world().elapsed() + secs;
    let mut fired = Vec::new();
    while session.world().elapsed() < deadline {
        fired.extend(session.step(FRAME, controls).unwrap());
    }
    fired
}

/// A scripted control sequence: each entry holds for the given number of
/// frames. Used to feed two worlds identical input.
pub fn input_script() -> Vec<(Controls, u32)> {
    vec![
        (Controls::FORWARD, 120),
        (Controls::FORWARD | Controls::LEFT, 60),
        (Controls::empty(), 30),
        (Controls::BACKWARD, 45),
        (Controls::FORWARD | Controls::RIGHT, 90),
        (Controls::LEFT, 15),
    ]
}

/// Replays an input script against a world at 60 Hz.
pub fn replay_world(world: &mut World, script: &[(Controls, u32)]) {
    for &(controls, frames) in script {
        for _ in 0..frames {
            world.step(FRAME, controls);
        }
    }
}

/// Replays an input script against a session at 60 Hz.
pub fn replay_session(session: &mut GameSession, script: &[(Controls, u32)]) {
    for &(controls, frames) in script {
        for _ in 0..frames {
            session.step(FRAME, controls).unwrap();
        }
    }
}

// =============================================================================
// Tests for helpers
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn park_at_moves_the_player_and_stops_it() {
        let mut session = test_session(1);
        park_at(&mut session, 12.0, -7.0);

        let player = session.world().player();
        assert_eq!(player.position.x, 12.0);
        assert_eq!(player.position.z, -7.0);
        assert_eq!(player.velocity, 0.0);
    }

    #[test]
    fn run_for_advances_simulation_time() {
        let mut session = test_session(1);
        run_for(&mut session, 1.0, Controls::empty());
        assert!(session.world().elapsed() >= 1.0);
    }

    #[test]
    fn replay_world_consumes_the_whole_script() {
        let mut world = test_world(1);
        let script = input_script();
        let frames: u64 = script.iter().map(|&(_, n)| u64::from(n)).sum();

        replay_world(&mut world, &script);
        assert_eq!(world.tick(), frames);
    }
}
