use agora_power::PowerError;
use agora_store::StoreError;
use agora_types::{Address, BlockNumber, Pct, Timestamp, VoteId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VotingError {
    #[error("engine is already initialized")]
    AlreadyInitialized,

    #[error("engine is not initialized")]
    NotInitialized,

    #[error("minimum vote duration must be nonzero")]
    DurationZero,

    #[error("required percentage {0} is not below 100%")]
    InvalidPct(Pct),

    #[error(
        "invalid vote window: now {now}, start {start}, end {end}, minimum duration {min_duration}s"
    )]
    InvalidDuration {
        now: Timestamp,
        start: Timestamp,
        end: Timestamp,
        min_duration: u64,
    },

    #[error("no voting power at snapshot block {0}")]
    ZeroVotingPower(BlockNumber),

    #[error("{0} is not allowed to create a vote")]
    Unauthorized(Address),

    #[error("vote {0} not found")]
    VoteNotFound(VoteId),

    #[error("vote {0} is not open for voting")]
    VoteNotOpen(VoteId),

    #[error("{voter} holds no voting weight on vote {id}")]
    ZeroWeight { id: VoteId, voter: Address },

    #[error("vote {0} cannot be executed")]
    NotExecutable(VoteId),

    #[error("execution of vote {id} failed: {reason}")]
    ExecutionFailed { id: VoteId, reason: String },

    #[error("power source error: {0}")]
    Power(#[from] PowerError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(String),
}
