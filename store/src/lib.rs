//! Abstract storage traits for the agora workspace.
//!
//! Storage backends implement these traits; the rest of the workspace
//! depends only on the traits. Stores are byte-oriented — the voting engine
//! serializes its own types, so no backend depends on the voting crate.

pub mod error;
pub mod memory;
pub mod votes;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use votes::VoteStore;
