//! Execution delegate — the component that performs a passed vote's actions.

use agora_types::{Action, ActionResult, VoteId};
use thiserror::Error;

/// Raised by a delegate when an action batch cannot be completed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("action {index} failed: {reason}")]
    ActionFailed { index: usize, reason: String },

    #[error("batch rejected: {0}")]
    Rejected(String),
}

/// Executes approved action batches on behalf of the engine.
///
/// The delegate must be atomic: either every action in the batch ran, or
/// none did and an error comes back. The engine rolls the vote back to
/// unexecuted on error, so a failed batch can be retried by a later call.
pub trait ExecutionDelegate {
    /// Run `actions` as one batch for vote `call_id`, returning per-action
    /// results in order.
    fn execute_batch(
        &mut self,
        call_id: VoteId,
        actions: &[Action],
    ) -> Result<Vec<ActionResult>, ExecutionError>;
}
