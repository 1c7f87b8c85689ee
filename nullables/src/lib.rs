//! Nullable infrastructure for deterministic testing.
//!
//! Test doubles that make time, block height, and action execution fully
//! controllable from a test body — nothing here touches the real world.

pub mod clock;
pub mod executor;

pub use clock::NullClock;
pub use executor::{DispatchedBatch, NullDelegate};
