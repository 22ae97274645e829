//! Block heights
//!
//! The ledger has no wall clock. Every invocation is stamped with the height
//! of the block that includes it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Height of a block in the replicated chain
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    /// Height of the genesis block
    pub const GENESIS: BlockHeight = BlockHeight(1);

    /// Create a block height
    pub const fn new(height: u64) -> Self {
        Self(height)
    }

    /// Get the inner value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Height of the next block. Saturates at `u64::MAX`.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

impl From<u64> for BlockHeight {
    fn from(height: u64) -> Self {
        Self(height)
    }
}
