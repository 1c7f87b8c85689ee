//! Append-only checkpoint history for historical lookups.

use crate::error::PowerError;
use agora_types::BlockNumber;
use serde::{Deserialize, Serialize};

/// A single (block, value) checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub block: BlockNumber,
    pub value: u128,
}

/// Ordered history of checkpoints for one tracked quantity.
///
/// Appends must be at non-decreasing block heights; recording at the same
/// height as the latest checkpoint overwrites it, since only a block's final
/// value is observable. Lookup returns the value of the last checkpoint at
/// or before the queried block — 0 before the first checkpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointHistory {
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` as of `block`.
    pub fn record(&mut self, block: BlockNumber, value: u128) -> Result<(), PowerError> {
        if let Some(last) = self.checkpoints.last_mut() {
            if block < last.block {
                return Err(PowerError::CheckpointOutOfOrder {
                    last: last.block,
                    attempted: block,
                });
            }
            if block == last.block {
                last.value = value;
                return Ok(());
            }
        }
        self.checkpoints.push(Checkpoint { block, value });
        Ok(())
    }

    /// Value of the last checkpoint at or before `block` (0 if none).
    pub fn value_at(&self, block: BlockNumber) -> u128 {
        match self
            .checkpoints
            .binary_search_by(|c| c.block.cmp(&block))
        {
            Ok(i) => self.checkpoints[i].value,
            Err(0) => 0,
            Err(i) => self.checkpoints[i - 1].value,
        }
    }

    /// Value of the most recent checkpoint (0 if none).
    pub fn latest(&self) -> u128 {
        self.checkpoints.last().map(|c| c.value).unwrap_or(0)
    }

    /// Block of the most recent checkpoint, if any.
    pub fn last_block(&self) -> Option<BlockNumber> {
        self.checkpoints.last().map(|c| c.block)
    }

    /// Whether recording at `block` would respect the append ordering.
    pub fn accepts(&self, block: BlockNumber) -> bool {
        self.last_block().map(|last| block >= last).unwrap_or(true)
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}
