//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically.

use super::oscillator::Oscillator;
use super::state::{GameEvent, GameSession};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Drop the falling block (click/tap/space)
    pub place: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the session by one fixed timestep
///
/// A drop is resolved before the block moves, so it lands where the player
/// saw it on the last rendered frame.
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) -> Option<GameEvent> {
    if session.is_over() {
        return None;
    }

    let place = input.place || (input.idle_mode && autoplay_wants_drop(session, dt));

    let event = if place { session.place() } else { None };
    session.advance(dt);
    event
}

/// Demo AI: drop once the falling block is within one step of the tower top
pub fn autoplay_wants_drop(session: &GameSession, dt: f32) -> bool {
    let step = Oscillator::velocity(session.speed, &session.tuning) * dt;
    let offset = (session.falling.x - session.tower.top().x).abs();
    offset <= step
}
