//! Statement block handles.
//!
//! Bodies are never linked by reference. The builder that owns a block
//! arena hands out `BlockId`s, and nested scopes refer to their children by
//! handle, so splicing and replay are plain traversals over owned storage.

use std::fmt;

/// Index into a block arena.
///
/// Only meaningful for the arena that issued it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct BlockId(u32);

impl BlockId {
    /// The top-level block of a document arena.
    pub const ROOT: BlockId = BlockId(0);

    #[inline]
    pub const fn new(index: u32) -> Self {
        BlockId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Next handle for an arena currently holding `len` blocks.
///
/// Arenas are bounded by `u32`; exceeding that is an invariant violation of
/// the generator, not a recoverable condition.
#[allow(clippy::cast_possible_truncation)]
pub fn next_block_id(len: usize) -> BlockId {
    debug_assert!(u32::try_from(len).is_ok(), "block arena exceeds u32 handles");
    BlockId(len as u32)
}

#[cfg(test)]
mod tests;
