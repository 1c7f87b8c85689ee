//! Vote records and the append-only vote log.

use agora_types::{Action, Address, BlockNumber, Pct, Timestamp, VoteId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A voter's recorded stance on a vote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// No stance recorded (or a previously cast stance retracted).
    #[default]
    None,
    Yea,
    Nay,
    Abstain,
}

/// A single vote over an action batch.
///
/// The window, snapshot block, thresholds, and total eligible weight are
/// frozen at creation; only the tallies, the per-voter choice map, and the
/// executed flag change afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub executed: bool,
    pub start: Timestamp,
    pub end: Timestamp,
    /// Reference block at which voting weight is fixed — one block before
    /// the vote was created.
    pub snapshot_block: BlockNumber,
    pub support_required: Pct,
    pub participation_required: Pct,
    /// Total eligible weight at `snapshot_block`.
    pub voting_power: u128,
    pub yea: u128,
    pub nay: u128,
    pub abstain: u128,
    /// Current recorded choice per voter.
    pub voters: HashMap<Address, Choice>,
    /// Actions dispatched as one batch when the vote passes.
    pub actions: Vec<Action>,
}

impl Vote {
    /// Whether choices can currently be cast: inside `[start, end)` and not
    /// executed.
    pub fn is_open(&self, now: Timestamp) -> bool {
        !self.executed && now >= self.start && now < self.end
    }

    /// Total weight cast so far, regardless of direction.
    pub fn cast_total(&self) -> u128 {
        self.yea
            .saturating_add(self.nay)
            .saturating_add(self.abstain)
    }

    /// The choice currently recorded for `voter`.
    pub fn choice_of(&self, voter: &Address) -> Choice {
        self.voters.get(voter).copied().unwrap_or(Choice::None)
    }

    /// Record `choice` for `voter` with `weight`, reversing any previous
    /// contribution first so the weight lands in at most one bucket.
    /// Returns the previous choice.
    pub fn record_choice(&mut self, voter: &Address, choice: Choice, weight: u128) -> Choice {
        let previous = self.choice_of(voter);
        match previous {
            Choice::Yea => self.yea = self.yea.saturating_sub(weight),
            Choice::Nay => self.nay = self.nay.saturating_sub(weight),
            Choice::Abstain => self.abstain = self.abstain.saturating_sub(weight),
            Choice::None => {}
        }
        match choice {
            Choice::Yea => self.yea = self.yea.saturating_add(weight),
            Choice::Nay => self.nay = self.nay.saturating_add(weight),
            Choice::Abstain => self.abstain = self.abstain.saturating_add(weight),
            Choice::None => {}
        }
        self.voters.insert(voter.clone(), choice);
        previous
    }
}

/// Append-only log of votes, keyed by sequential id.
///
/// Votes are never removed; a vote that passes its end date without meeting
/// the thresholds simply stops being open or executable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteLog {
    votes: Vec<Vote>,
}

impl VoteLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next appended vote will receive.
    pub fn next_id(&self) -> VoteId {
        self.votes.len() as VoteId
    }

    /// Append a vote. Its id must be `next_id()`.
    pub fn push(&mut self, vote: Vote) -> VoteId {
        debug_assert_eq!(vote.id, self.next_id());
        let id = vote.id;
        self.votes.push(vote);
        id
    }

    /// Remove the most recently appended vote. Only used to unwind a failed
    /// compound creation; the log is append-only from the outside.
    pub(crate) fn pop_last(&mut self) -> Option<Vote> {
        self.votes.pop()
    }

    pub fn get(&self, id: VoteId) -> Option<&Vote> {
        self.votes.get(id as usize)
    }

    pub fn get_mut(&mut self, id: VoteId) -> Option<&mut Vote> {
        self.votes.get_mut(id as usize)
    }

    pub fn len(&self) -> u64 {
        self.votes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vote> {
        self.votes.iter()
    }
}
