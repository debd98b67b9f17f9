//! Runtime wrappers around static encounter content.
//!
//! These implementations expose `encounter-core` lookup traits over data
//! loaded by `encounter-content`. The data is immutable at runtime.
mod roster;

pub use roster::RosterPoolImpl;
