//! The stack of settled blocks

use super::block::Block;

/// Append-only stack of settled blocks
///
/// Index 0 is the base and is never removed. Every block rests on the top face
/// of the one below it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tower {
    blocks: Vec<Block>,
}

impl Tower {
    /// Start a tower from its base block (moved to the floor)
    pub fn new(base: Block) -> Self {
        Self {
            blocks: vec![Block { y: 0.0, ..base }],
        }
    }

    pub fn base(&self) -> &Block {
        &self.blocks[0]
    }

    /// Top settled block
    pub fn top(&self) -> &Block {
        // Never empty: constructed with a base and only ever pushed to
        &self.blocks[self.blocks.len() - 1]
    }

    /// Number of settled blocks, base included
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; kept for the `len` convention
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Height of the stack's top face
    pub fn height(&self) -> f32 {
        self.top().top()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Settle `block` on top of the stack
    ///
    /// The block's vertical offset is snapped to the current top face so the
    /// cumulative-height invariant holds regardless of the caller.
    pub fn push(&mut self, block: Block) {
        let y = self.height();
        self.blocks.push(Block { y, ..block });
    }
}
