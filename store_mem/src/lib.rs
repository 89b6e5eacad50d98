//! Thread-safe in-memory backend implementing every `agora-store` trait.
//!
//! All vote-adjacent tables (records, tallies, allocations, credits, the
//! audit log) live behind one mutex so a conditional commit's checks and
//! mutations are a single atomic step. Everything else gets its own lock.
//! Suitable as the single-process production backend and as the test
//! double for every crate above the store traits.

mod store;

pub use store::MemStore;
