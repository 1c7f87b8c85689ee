//! Whitelist power source — one member, one vote, with membership history.
//!
//! Membership is checkpointed per address so in-flight votes keep working:
//! an address removed after a vote's snapshot block still counts as a member
//! *of that vote*, while carrying no weight on anything snapshotted later.

use crate::checkpoint::CheckpointHistory;
use crate::error::PowerError;
use crate::VotingPowerSource;
use agora_types::{Address, BlockNumber};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const LISTED: u128 = 1;
const NOT_LISTED: u128 = 0;

/// An address set where each current member holds exactly one unit of weight.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Whitelist {
    members: HashMap<Address, CheckpointHistory>,
    member_count: CheckpointHistory,
}

impl Whitelist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a whitelist with `members` listed as of `block`.
    pub fn with_members(members: &[Address], block: BlockNumber) -> Result<Self, PowerError> {
        let mut list = Self::new();
        list.add(members, block)?;
        Ok(list)
    }

    /// List `addrs` as of `block`. Already-listed addresses are skipped so
    /// the member count stays equal to the number of listed addresses.
    /// Returns the addresses actually added.
    pub fn add(
        &mut self,
        addrs: &[Address],
        block: BlockNumber,
    ) -> Result<Vec<Address>, PowerError> {
        self.ensure_order(addrs, block)?;
        let mut added = Vec::new();
        for addr in addrs {
            if self.is_listed(addr) {
                continue;
            }
            self.members
                .entry(addr.clone())
                .or_default()
                .record(block, LISTED)?;
            added.push(addr.clone());
        }
        if !added.is_empty() {
            let count = self.member_count.latest() + added.len() as u128;
            self.member_count.record(block, count)?;
        }
        Ok(added)
    }

    /// Delist `addrs` as of `block`. Unlisted addresses are skipped.
    /// Returns the addresses actually removed.
    pub fn remove(
        &mut self,
        addrs: &[Address],
        block: BlockNumber,
    ) -> Result<Vec<Address>, PowerError> {
        self.ensure_order(addrs, block)?;
        let mut removed = Vec::new();
        for addr in addrs {
            if !self.is_listed(addr) {
                continue;
            }
            self.members
                .entry(addr.clone())
                .or_default()
                .record(block, NOT_LISTED)?;
            removed.push(addr.clone());
        }
        if !removed.is_empty() {
            let count = self
                .member_count
                .latest()
                .saturating_sub(removed.len() as u128);
            self.member_count.record(block, count)?;
        }
        Ok(removed)
    }

    /// Whether `addr` is currently listed.
    pub fn is_listed(&self, addr: &Address) -> bool {
        self.members
            .get(addr)
            .map(|h| h.latest() == LISTED)
            .unwrap_or(false)
    }

    /// Whether `addr` was listed as of `block`.
    pub fn is_listed_at(&self, addr: &Address, block: BlockNumber) -> bool {
        self.members
            .get(addr)
            .map(|h| h.value_at(block) == LISTED)
            .unwrap_or(false)
    }

    /// Current member count.
    pub fn member_count(&self) -> u128 {
        self.member_count.latest()
    }

    /// Member count as of `block`.
    pub fn member_count_at(&self, block: BlockNumber) -> u128 {
        self.member_count.value_at(block)
    }

    fn ensure_order(&self, addrs: &[Address], block: BlockNumber) -> Result<(), PowerError> {
        let histories = addrs
            .iter()
            .filter_map(|a| self.members.get(a))
            .chain(std::iter::once(&self.member_count));
        for history in histories {
            if !history.accepts(block) {
                return Err(PowerError::CheckpointOutOfOrder {
                    last: history.last_block().unwrap_or(BlockNumber::GENESIS),
                    attempted: block,
                });
            }
        }
        Ok(())
    }
}

impl VotingPowerSource for Whitelist {
    fn power_at(&self, voter: &Address, block: BlockNumber) -> u128 {
        if self.is_listed_at(voter, block) {
            LISTED
        } else {
            NOT_LISTED
        }
    }

    fn total_power_at(&self, block: BlockNumber) -> u128 {
        self.member_count_at(block)
    }

    fn may_create(&self, creator: &Address, block: BlockNumber) -> bool {
        self.is_listed_at(creator, block)
    }
}
