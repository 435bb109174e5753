//! Placement resolution
//!
//! Pure function over the tower top and the falling block. The caller applies
//! the outcome; nothing here mutates session state.

use rand::Rng;

use super::block::Block;
use super::tower::Tower;
use crate::travel_range;
use crate::tuning::Tuning;

/// Result of dropping the falling block
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Missed the tower (or geometry was degenerate). Nothing changes.
    GameOver,
    /// Block landed; `settled` goes on the tower and `next` starts falling.
    Placed {
        settled: Block,
        next: Block,
        score: u64,
        speed: f32,
    },
}

impl Placement {
    pub fn is_game_over(&self) -> bool {
        matches!(self, Placement::GameOver)
    }
}

/// Points awarded for reaching a tower of `tower_len` blocks
#[inline]
pub fn placement_points(tower_len: usize, tuning: &Tuning) -> u64 {
    tower_len as u64 * tuning.points_per_level
}

/// Resolve a drop of `falling` onto `tower`
///
/// The settled block is the horizontal intersection of the falling block and
/// the tower top. The next block keeps the trimmed width and spawns at a random
/// playfield edge one block-height above the new top.
pub fn resolve_placement<R: Rng>(
    tower: &Tower,
    falling: &Block,
    score: u64,
    speed: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> Placement {
    let last = tower.top();
    if !falling.is_well_formed() || !last.is_well_formed() {
        return Placement::GameOver;
    }

    let overlap = falling.overlap(last);
    if !overlap.is_hit() {
        return Placement::GameOver;
    }

    let settled = Block {
        width: overlap.len,
        height: falling.height,
        y: last.top(),
        x: overlap.start,
    };

    let (left, right) = travel_range(settled.width, tuning.playfield_width);
    let next = Block {
        width: settled.width,
        height: settled.height,
        y: settled.top(),
        x: if rng.random_bool(0.5) { left } else { right },
    };

    let tower_len = tower.len() + 1;
    Placement::Placed {
        settled,
        next,
        score: score.saturating_add(placement_points(tower_len, tuning)),
        speed: (speed * tuning.speed_growth).min(tuning.max_speed),
    }
}
