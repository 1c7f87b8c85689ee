use agora_types::BlockNumber;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PowerError {
    #[error("insufficient balance: needed {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("checkpoint at block {attempted} is older than the latest at block {last}")]
    CheckpointOutOfOrder {
        last: BlockNumber,
        attempted: BlockNumber,
    },

    #[error("arithmetic overflow")]
    Overflow,
}
