//! Last-published notification state, keyed by (ecosystem, user).
//!
//! The cache is what makes delta publishing possible: a cycle compares the
//! freshly fetched counts against the entry stored here and only publishes
//! (and only writes back) when they differ.
//!
//! Entries exist only for users whose last known state was non-empty.

mod state_cache;

pub use state_cache::StateCache;
