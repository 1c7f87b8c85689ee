//! Block references — the chain position every engine operation runs at.

use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A block height on the host chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockNumber(u64);

impl BlockNumber {
    /// The genesis block.
    pub const GENESIS: Self = Self(0);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The block immediately before this one (saturating at genesis).
    pub fn prev(&self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The chain position an operation is applied at.
///
/// Operations are applied one at a time in a single total order. The engine
/// never reads ambient time or height — callers pass the position of the
/// block carrying the operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContext {
    /// Height of the block containing the operation.
    pub number: BlockNumber,
    /// Timestamp of the block containing the operation.
    pub time: Timestamp,
}

impl BlockContext {
    pub fn new(number: BlockNumber, time: Timestamp) -> Self {
        Self { number, time }
    }

    /// The snapshot reference for votes created at this position — one block
    /// back, so same-block weight changes cannot influence the vote.
    pub fn snapshot(&self) -> BlockNumber {
        self.number.prev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_one_block_back() {
        let ctx = BlockContext::new(BlockNumber::new(10), Timestamp::new(1000));
        assert_eq!(ctx.snapshot(), BlockNumber::new(9));
    }

    #[test]
    fn prev_saturates_at_genesis() {
        assert_eq!(BlockNumber::GENESIS.prev(), BlockNumber::GENESIS);
    }
}
