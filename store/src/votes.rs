//! Vote storage trait.

use crate::StoreError;
use agora_types::VoteId;

/// Store trait for persisting voting-engine state to durable storage.
///
/// Uses opaque `Vec<u8>` so the store doesn't depend on the voting crate
/// (which would create a circular dependency). The engine
/// serializes/deserializes its own types.
pub trait VoteStore {
    /// Get a serialized vote by id.
    fn get_vote(&self, id: VoteId) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store a serialized vote under its id.
    fn put_vote(&self, id: VoteId, data: &[u8]) -> Result<(), StoreError>;

    /// Number of stored votes.
    fn vote_count(&self) -> Result<u64, StoreError>;

    /// All stored votes, ordered by id.
    fn iter_votes(&self) -> Result<Vec<(VoteId, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
