//! Block geometry
//!
//! Blocks are plain values. Placement never edits one in place; it builds a
//! new block from the overlap.

use serde::{Deserialize, Serialize};

/// A rectangular slab, either settled in the tower or falling
///
/// `y` is the vertical offset from the playfield floor, `x` the horizontal
/// offset of the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub width: f32,
    pub height: f32,
    pub y: f32,
    pub x: f32,
}

/// Horizontal intersection of two blocks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Left edge of the shared span
    pub start: f32,
    /// Length of the shared span; zero or negative when the blocks miss
    pub len: f32,
}

impl Overlap {
    /// Whether the shared span is usable as a new block
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.len.is_finite() && self.len > 0.0
    }
}

impl Block {
    pub fn new(width: f32, height: f32, y: f32, x: f32) -> Self {
        Self {
            width,
            height,
            y,
            x,
        }
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Vertical offset of the top face
    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal centre
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Copy of this block moved to a new horizontal offset
    #[inline]
    pub fn with_x(self, x: f32) -> Self {
        Self { x, ..self }
    }

    /// True when all dimensions are finite and the block has area
    pub fn is_well_formed(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.x.is_finite()
            && self.y.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Horizontal overlap with `other`
    pub fn overlap(&self, other: &Block) -> Overlap {
        let start = self.x.max(other.x);
        let end = self.right().min(other.right());
        Overlap {
            start,
            len: end - start,
        }
    }
}
