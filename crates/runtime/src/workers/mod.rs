//! Worker tasks that back the runtime orchestration.
//!
//! The encounter worker is the only owner of the encounter state; everything
//! else reaches it through [`Command`]s.

mod encounter;

pub use encounter::{Command, EncounterWorker};
