//! Voting power sources.
//!
//! A power source answers two questions about a historical reference block:
//! how much weight a voter holds, and how much weight exists in total. Votes
//! always query a reference strictly before their creation block, so
//! same-block balance or membership changes cannot influence an open vote.

pub mod checkpoint;
pub mod error;
pub mod token;
pub mod whitelist;

pub use checkpoint::CheckpointHistory;
pub use error::PowerError;
pub use token::SnapshotToken;
pub use whitelist::Whitelist;

use agora_types::{Address, BlockNumber};

/// Source of voting weight, evaluated at a historical reference block.
pub trait VotingPowerSource {
    /// Voting weight of `voter` as of `block`.
    fn power_at(&self, voter: &Address, block: BlockNumber) -> u128;

    /// Total eligible voting weight as of `block`.
    fn total_power_at(&self, block: BlockNumber) -> u128;

    /// Whether `creator` may open a new vote against this source.
    ///
    /// The token source leaves creation gating to the caller's permission
    /// layer; the whitelist source requires membership.
    fn may_create(&self, _creator: &Address, _block: BlockNumber) -> bool {
        true
    }
}
