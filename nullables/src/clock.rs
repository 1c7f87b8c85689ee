//! Nullable clock — deterministic time and block height for testing.

use agora_types::{BlockContext, BlockNumber, Timestamp};
use std::cell::Cell;

/// A deterministic chain clock for testing.
///
/// Time and height only advance when you tell them to.
pub struct NullClock {
    secs: Cell<u64>,
    height: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64, initial_height: u64) -> Self {
        Self {
            secs: Cell::new(initial_secs),
            height: Cell::new(initial_height),
        }
    }

    /// Get the current time.
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.secs.get())
    }

    /// Get the current block height.
    pub fn height(&self) -> BlockNumber {
        BlockNumber::new(self.height.get())
    }

    /// The current chain position.
    pub fn context(&self) -> BlockContext {
        BlockContext::new(self.height(), self.now())
    }

    /// Advance time by a number of seconds without sealing a block.
    pub fn advance(&self, secs: u64) {
        self.secs.set(self.secs.get() + secs);
    }

    /// Seal a block: height +1, time +`secs`.
    pub fn advance_block(&self, secs: u64) {
        self.height.set(self.height.get() + 1);
        self.secs.set(self.secs.get() + secs);
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: u64) {
        self.secs.set(secs);
    }
}
