//! Core voting engine for the agora DAO framework.
//!
//! A vote gates an arbitrary action batch behind a weighted threshold
//! decision. Voting weight is fixed at a snapshot block one block before
//! creation; outcomes combine a participation (quorum) check with a support
//! check, both strict fixed-point comparisons. Once the outcome is
//! mathematically decided, a vote can execute before its window closes.
//!
//! Two power sources share this engine: balance-weighted voting against a
//! snapshot token, and one-member-one-vote voting against a whitelist.

pub mod engine;
pub mod error;
pub mod events;
pub mod executor;
pub mod threshold;
pub mod vote;

pub use engine::{VoteSettings, VotingEngine};
pub use error::VotingError;
pub use events::Event;
pub use executor::{ExecutionDelegate, ExecutionError};
pub use vote::{Choice, Vote, VoteLog};

use agora_power::{SnapshotToken, Whitelist};

/// Balance-weighted voting against a snapshot token.
pub type TokenVoting = VotingEngine<SnapshotToken>;

/// One-member-one-vote voting against a whitelist.
pub type WhitelistVoting = VotingEngine<Whitelist>;
