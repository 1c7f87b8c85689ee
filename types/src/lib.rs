//! Fundamental types for the agora voting engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: addresses, block references, timestamps, fixed-point
//! percentages, and executable actions.

pub mod action;
pub mod address;
pub mod block;
pub mod pct;
pub mod time;

pub use action::{Action, ActionResult};
pub use address::Address;
pub use block::{BlockContext, BlockNumber};
pub use pct::{Pct, PCT_BASE};
pub use time::Timestamp;

/// Sequential identifier assigned to each vote at creation. Never reused.
pub type VoteId = u64;
