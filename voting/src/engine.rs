//! The voting engine — creation, casting, outcome evaluation, execution.

use crate::error::VotingError;
use crate::events::Event;
use crate::executor::ExecutionDelegate;
use crate::threshold;
use crate::vote::{Choice, Vote, VoteLog};
use agora_power::{VotingPowerSource, Whitelist};
use agora_store::{StoreError, VoteStore};
use agora_types::{Action, Address, BlockContext, Pct, Timestamp, VoteId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Meta key the serialized settings are stored under.
const SETTINGS_META_KEY: &[u8] = b"vote_settings";

/// Engine-wide voting parameters, frozen into each vote at creation.
///
/// Changing the settings later only affects votes created afterwards — an
/// open vote keeps deciding against the percentages it was created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSettings {
    /// Fraction of the support denominator that yea must strictly exceed.
    pub support_required: Pct,
    /// Fraction of total eligible weight that cast weight must strictly
    /// exceed.
    pub participation_required: Pct,
    /// Minimum length of a vote window, in seconds.
    pub min_duration_secs: u64,
}

impl VoteSettings {
    pub fn new(support_required: Pct, participation_required: Pct, min_duration_secs: u64) -> Self {
        Self {
            support_required,
            participation_required,
            min_duration_secs,
        }
    }

    fn validate(&self) -> Result<(), VotingError> {
        if !self.support_required.is_valid_threshold() {
            return Err(VotingError::InvalidPct(self.support_required));
        }
        if !self.participation_required.is_valid_threshold() {
            return Err(VotingError::InvalidPct(self.participation_required));
        }
        if self.min_duration_secs == 0 {
            return Err(VotingError::DurationZero);
        }
        Ok(())
    }
}

/// The voting engine, generic over where voting weight comes from.
///
/// Operations take the chain position explicitly — the engine runs inside a
/// strictly serialized replicated log and never reads ambient time or
/// height. Failed operations leave no partial state behind.
pub struct VotingEngine<P: VotingPowerSource> {
    settings: Option<VoteSettings>,
    votes: VoteLog,
    power: P,
    events: Vec<Event>,
}

impl<P: VotingPowerSource> VotingEngine<P> {
    /// Create an unconfigured engine. Mutating operations fail until
    /// [`initialize`](Self::initialize) has run.
    pub fn new(power: P) -> Self {
        Self {
            settings: None,
            votes: VoteLog::new(),
            power,
            events: Vec::new(),
        }
    }

    /// One-shot configuration. A second call fails with
    /// [`VotingError::AlreadyInitialized`].
    pub fn initialize(&mut self, settings: VoteSettings) -> Result<(), VotingError> {
        if self.settings.is_some() {
            return Err(VotingError::AlreadyInitialized);
        }
        settings.validate()?;
        tracing::info!(
            support = %settings.support_required,
            participation = %settings.participation_required,
            min_duration = settings.min_duration_secs,
            "voting engine initialized"
        );
        self.settings = Some(settings);
        Ok(())
    }

    /// Replace the settings used by future votes. Votes already created keep
    /// the percentages frozen at their creation.
    pub fn change_settings(&mut self, settings: VoteSettings) -> Result<(), VotingError> {
        if self.settings.is_none() {
            return Err(VotingError::NotInitialized);
        }
        settings.validate()?;
        tracing::info!(
            support = %settings.support_required,
            participation = %settings.participation_required,
            min_duration = settings.min_duration_secs,
            "vote settings changed"
        );
        self.settings = Some(settings);
        self.events.push(Event::SettingsChanged { settings });
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.settings.is_some()
    }

    pub fn settings(&self) -> Option<&VoteSettings> {
        self.settings.as_ref()
    }

    pub fn power(&self) -> &P {
        &self.power
    }

    pub fn power_mut(&mut self) -> &mut P {
        &mut self.power
    }

    /// Create a vote over `actions`, optionally casting the creator's first
    /// choice in the same operation.
    ///
    /// A zero `start` (or one in the past) resolves to the current block
    /// time; a zero `end` resolves to `start + min_duration`. The resolved
    /// window must span at least the minimum duration. Voting weight is
    /// snapshotted one block before `ctx.number`.
    #[allow(clippy::too_many_arguments)]
    pub fn create_vote(
        &mut self,
        creator: &Address,
        metadata: Vec<u8>,
        actions: Vec<Action>,
        start: Timestamp,
        end: Timestamp,
        execute_if_decided: bool,
        choice: Choice,
        ctx: BlockContext,
        delegate: &mut dyn ExecutionDelegate,
    ) -> Result<VoteId, VotingError> {
        let settings = self.settings.ok_or(VotingError::NotInitialized)?;
        let snapshot_block = ctx.snapshot();

        if !self.power.may_create(creator, snapshot_block) {
            return Err(VotingError::Unauthorized(creator.clone()));
        }
        let voting_power = self.power.total_power_at(snapshot_block);
        if voting_power == 0 {
            return Err(VotingError::ZeroVotingPower(snapshot_block));
        }

        let start = if start.is_zero() || start < ctx.time {
            ctx.time
        } else {
            start
        };
        let end = if end.is_zero() {
            start.saturating_add_secs(settings.min_duration_secs)
        } else {
            end
        };
        if end < start.saturating_add_secs(settings.min_duration_secs) {
            return Err(VotingError::InvalidDuration {
                now: ctx.time,
                start,
                end,
                min_duration: settings.min_duration_secs,
            });
        }

        let id = self.votes.next_id();
        self.votes.push(Vote {
            id,
            executed: false,
            start,
            end,
            snapshot_block,
            support_required: settings.support_required,
            participation_required: settings.participation_required,
            voting_power,
            yea: 0,
            nay: 0,
            abstain: 0,
            voters: HashMap::new(),
            actions,
        });
        tracing::info!(
            vote = id,
            creator = %creator,
            snapshot = %snapshot_block,
            power = voting_power,
            "vote created"
        );
        self.events.push(Event::VoteStarted {
            id,
            creator: creator.clone(),
            metadata,
        });

        if choice != Choice::None {
            if let Err(err) = self.vote(creator, id, choice, execute_if_decided, ctx, delegate) {
                // The cast (and its execution shortcut) is part of this
                // operation — unwind the creation so the failure leaves no
                // trace. The inner call has already undone its own effects.
                self.votes.pop_last();
                self.events.pop();
                return Err(err);
            }
        }
        Ok(id)
    }

    /// Cast `voter`'s choice on an open vote.
    ///
    /// Any earlier choice is reversed before the new one is applied, so a
    /// voter's weight lands in at most one tally bucket; re-casting the same
    /// choice is idempotent and casting [`Choice::None`] retracts. With
    /// `execute_if_decided`, a vote whose outcome is already decided is
    /// executed within the same operation.
    pub fn vote(
        &mut self,
        voter: &Address,
        id: VoteId,
        choice: Choice,
        execute_if_decided: bool,
        ctx: BlockContext,
        delegate: &mut dyn ExecutionDelegate,
    ) -> Result<(), VotingError> {
        let snapshot_block = {
            let vote = self.votes.get(id).ok_or(VotingError::VoteNotFound(id))?;
            if !vote.is_open(ctx.time) {
                return Err(VotingError::VoteNotOpen(id));
            }
            vote.snapshot_block
        };
        let weight = self.power.power_at(voter, snapshot_block);
        if weight == 0 {
            return Err(VotingError::ZeroWeight {
                id,
                voter: voter.clone(),
            });
        }

        let vote = self
            .votes
            .get_mut(id)
            .ok_or(VotingError::VoteNotFound(id))?;
        let previous = vote.record_choice(voter, choice, weight);
        tracing::debug!(vote = id, voter = %voter, ?choice, weight, "choice recorded");
        self.events.push(Event::VoteCast {
            id,
            voter: voter.clone(),
            choice,
            weight,
        });

        if execute_if_decided && self.can_execute(id, ctx.time) {
            if let Err(err) = self.dispatch(id, delegate) {
                // A failed batch voids the whole operation: restore the
                // previous choice and drop the cast event.
                if let Some(vote) = self.votes.get_mut(id) {
                    vote.record_choice(voter, previous, weight);
                }
                self.events.pop();
                return Err(err);
            }
        }
        Ok(())
    }

    /// Whether `voter` could currently cast a choice on `id`.
    pub fn can_vote(&self, id: VoteId, voter: &Address, now: Timestamp) -> bool {
        match self.votes.get(id) {
            Some(vote) => vote.is_open(now) && self.power.power_at(voter, vote.snapshot_block) > 0,
            None => false,
        }
    }

    /// Whether `id` can execute right now.
    ///
    /// Two routes, both requiring the participation threshold:
    /// - *early*: yea alone strictly exceeds the required fraction of all
    ///   eligible weight — no further voting can change the outcome, so the
    ///   window need not have closed;
    /// - *final*: the window has closed and yea strictly exceeds the
    ///   required fraction of the weight actually cast.
    pub fn can_execute(&self, id: VoteId, now: Timestamp) -> bool {
        let Some(vote) = self.votes.get(id) else {
            return false;
        };
        if vote.executed {
            return false;
        }
        if !threshold::participation_passes(
            vote.yea,
            vote.nay,
            vote.abstain,
            vote.voting_power,
            vote.participation_required,
        ) {
            return false;
        }
        if threshold::support_passes(vote.yea, vote.voting_power, vote.support_required) {
            return true;
        }
        now >= vote.end
            && threshold::support_passes(vote.yea, vote.cast_total(), vote.support_required)
    }

    /// Execute `id`'s action batch. Fails with
    /// [`VotingError::NotExecutable`] unless [`can_execute`](Self::can_execute)
    /// holds at this moment.
    pub fn execute(
        &mut self,
        id: VoteId,
        now: Timestamp,
        delegate: &mut dyn ExecutionDelegate,
    ) -> Result<(), VotingError> {
        if !self.can_execute(id, now) {
            return Err(VotingError::NotExecutable(id));
        }
        self.dispatch(id, delegate)
    }

    /// Mark the vote executed and dispatch its batch.
    ///
    /// The flag flips *before* the delegate runs, so anything observing the
    /// engine during dispatch sees the vote closed; a delegate failure rolls
    /// the flag back and the operation fails as a whole.
    fn dispatch(
        &mut self,
        id: VoteId,
        delegate: &mut dyn ExecutionDelegate,
    ) -> Result<(), VotingError> {
        let actions = {
            let vote = self
                .votes
                .get_mut(id)
                .ok_or(VotingError::VoteNotFound(id))?;
            vote.executed = true;
            vote.actions.clone()
        };
        match delegate.execute_batch(id, &actions) {
            Ok(results) => {
                tracing::info!(vote = id, actions = actions.len(), "vote executed");
                self.events.push(Event::VoteExecuted {
                    id,
                    actions,
                    results,
                });
                Ok(())
            }
            Err(e) => {
                if let Some(vote) = self.votes.get_mut(id) {
                    vote.executed = false;
                }
                tracing::warn!(vote = id, error = %e, "action batch failed, vote rolled back");
                Err(VotingError::ExecutionFailed {
                    id,
                    reason: e.to_string(),
                })
            }
        }
    }

    pub fn get_vote(&self, id: VoteId) -> Option<&Vote> {
        self.votes.get(id)
    }

    pub fn votes_len(&self) -> u64 {
        self.votes.len()
    }

    /// Events emitted so far, in operation order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drain the event log (e.g. after an indexer has consumed it).
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Persist settings and votes to a store.
    ///
    /// The power source maintains its own history and is not persisted here;
    /// the event log is a projection buffer and is not persisted either.
    pub fn save_to_store(&self, store: &dyn VoteStore) -> Result<(), VotingError> {
        if let Some(settings) = &self.settings {
            let bytes = bincode::serialize(settings)
                .map_err(|e| VotingError::Serialization(e.to_string()))?;
            store.put_meta(SETTINGS_META_KEY, &bytes)?;
        }
        for vote in self.votes.iter() {
            let bytes =
                bincode::serialize(vote).map_err(|e| VotingError::Serialization(e.to_string()))?;
            store.put_vote(vote.id, &bytes)?;
        }
        Ok(())
    }

    /// Restore an engine from a store, attaching the given power source.
    pub fn load_from_store(power: P, store: &dyn VoteStore) -> Result<Self, VotingError> {
        let settings = match store.get_meta(SETTINGS_META_KEY)? {
            Some(bytes) => Some(
                bincode::deserialize(&bytes)
                    .map_err(|e| VotingError::Serialization(e.to_string()))?,
            ),
            None => None,
        };

        let mut entries = store.iter_votes()?;
        entries.sort_by_key(|(id, _)| *id);
        let mut votes = VoteLog::new();
        for (id, bytes) in entries {
            let vote: Vote = bincode::deserialize(&bytes)
                .map_err(|e| VotingError::Serialization(e.to_string()))?;
            if vote.id != id || id != votes.next_id() {
                return Err(VotingError::Store(StoreError::Corruption(format!(
                    "vote log gap at id {id}"
                ))));
            }
            votes.push(vote);
        }

        Ok(Self {
            settings,
            votes,
            power,
            events: Vec::new(),
        })
    }
}

impl VotingEngine<Whitelist> {
    /// Whitelist `voters` as of `ctx`, emitting the change. Already-listed
    /// addresses are skipped.
    pub fn add_voters(
        &mut self,
        voters: &[Address],
        ctx: BlockContext,
    ) -> Result<(), VotingError> {
        if self.settings.is_none() {
            return Err(VotingError::NotInitialized);
        }
        let added = self.power.add(voters, ctx.number)?;
        if !added.is_empty() {
            tracing::info!(count = added.len(), block = %ctx.number, "voters whitelisted");
            self.events.push(Event::WhitelistChanged {
                voters: added,
                added: true,
            });
        }
        Ok(())
    }

    /// Delist `voters` as of `ctx`, emitting the change. Votes snapshotted
    /// before `ctx` still count the removed members.
    pub fn remove_voters(
        &mut self,
        voters: &[Address],
        ctx: BlockContext,
    ) -> Result<(), VotingError> {
        if self.settings.is_none() {
            return Err(VotingError::NotInitialized);
        }
        let removed = self.power.remove(voters, ctx.number)?;
        if !removed.is_empty() {
            tracing::info!(count = removed.len(), block = %ctx.number, "voters delisted");
            self.events.push(Event::WhitelistChanged {
                voters: removed,
                added: false,
            });
        }
        Ok(())
    }
}
