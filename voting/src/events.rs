//! Engine event log — the projection surface for external indexers.

use crate::engine::VoteSettings;
use crate::vote::Choice;
use agora_types::{Action, ActionResult, Address, VoteId};
use serde::{Deserialize, Serialize};

/// An observable state transition, appended in operation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A vote was created.
    VoteStarted {
        id: VoteId,
        creator: Address,
        metadata: Vec<u8>,
    },
    /// A voter cast, changed, or retracted a choice.
    VoteCast {
        id: VoteId,
        voter: Address,
        choice: Choice,
        weight: u128,
    },
    /// A vote passed and its action batch ran.
    VoteExecuted {
        id: VoteId,
        actions: Vec<Action>,
        results: Vec<ActionResult>,
    },
    /// Whitelist membership changed (whitelist variant only).
    WhitelistChanged { voters: Vec<Address>, added: bool },
    /// Engine settings changed for future votes.
    SettingsChanged { settings: VoteSettings },
}
