//! Executable actions — the payload a passed vote dispatches.

use crate::address::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single call performed when a vote passes: a target, attached value,
/// and an opaque call payload interpreted by the execution layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub target: Address,
    pub value: u128,
    pub payload: Vec<u8>,
}

impl Action {
    pub fn new(target: Address, value: u128, payload: Vec<u8>) -> Self {
        Self {
            target,
            value,
            payload,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} value={} payload=0x{}",
            self.target,
            self.value,
            hex::encode(&self.payload)
        )
    }
}

/// The opaque result returned by the execution layer for one action.
pub type ActionResult = Vec<u8>;
