//! Thread-safe in-memory store backend.

use crate::votes::VoteStore;
use crate::StoreError;
use agora_types::VoteId;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// An in-memory vote store, usable from tests and single-process deployments
/// that rebuild engine state from the replicated log on startup.
pub struct MemoryStore {
    votes: Mutex<BTreeMap<VoteId, Vec<u8>>>,
    meta: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            votes: Mutex::new(BTreeMap::new()),
            meta: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VoteStore for MemoryStore {
    fn get_vote(&self, id: VoteId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.votes.lock().unwrap().get(&id).cloned())
    }

    fn put_vote(&self, id: VoteId, data: &[u8]) -> Result<(), StoreError> {
        self.votes.lock().unwrap().insert(id, data.to_vec());
        Ok(())
    }

    fn vote_count(&self) -> Result<u64, StoreError> {
        Ok(self.votes.lock().unwrap().len() as u64)
    }

    fn iter_votes(&self) -> Result<Vec<(VoteId, Vec<u8>)>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .map(|(id, data)| (*id, data.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.meta
            .lock()
            .unwrap()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
