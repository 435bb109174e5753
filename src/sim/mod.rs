//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod block;
pub mod oscillator;
pub mod particles;
pub mod placement;
pub mod state;
pub mod tick;
pub mod tower;

pub use block::{Block, Overlap};
pub use oscillator::{Direction, Oscillator};
pub use particles::{MAX_PARTICLES, Particle};
pub use placement::{Placement, placement_points, resolve_placement};
pub use state::{GameEvent, GamePhase, GameSession, SessionSnapshot};
pub use tick::{TickInput, autoplay_wants_drop, tick};
pub use tower::Tower;
