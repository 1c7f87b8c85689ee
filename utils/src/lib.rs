//! Shared utilities for the agora workspace.

pub mod logging;

pub use logging::init_tracing;
