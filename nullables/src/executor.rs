//! Nullable execution delegate — records batches, scriptable failure.

use agora_types::{Action, ActionResult, VoteId};
use agora_voting::{ExecutionDelegate, ExecutionError};

/// A recorded batch dispatch.
#[derive(Clone, Debug)]
pub struct DispatchedBatch {
    pub call_id: VoteId,
    pub actions: Vec<Action>,
}

/// An execution delegate for testing.
///
/// Records every dispatched batch and returns empty per-action results.
/// Can be scripted to reject the next dispatch.
pub struct NullDelegate {
    pub dispatched: Vec<DispatchedBatch>,
    fail_next: Option<String>,
}

impl NullDelegate {
    pub fn new() -> Self {
        Self {
            dispatched: Vec::new(),
            fail_next: None,
        }
    }

    /// Make the next dispatch fail with `reason`.
    pub fn fail_next(&mut self, reason: impl Into<String>) {
        self.fail_next = Some(reason.into());
    }

    /// How many batches have been dispatched so far.
    pub fn dispatch_count(&self) -> usize {
        self.dispatched.len()
    }
}

impl Default for NullDelegate {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionDelegate for NullDelegate {
    fn execute_batch(
        &mut self,
        call_id: VoteId,
        actions: &[Action],
    ) -> Result<Vec<ActionResult>, ExecutionError> {
        if let Some(reason) = self.fail_next.take() {
            return Err(ExecutionError::Rejected(reason));
        }
        self.dispatched.push(DispatchedBatch {
            call_id,
            actions: actions.to_vec(),
        });
        Ok(vec![Vec::new(); actions.len()])
    }
}
