//! Encounter state: combatants, roster, log and outcome.
//!
//! The roster is created once by the initializer and mutated only through
//! [`crate::engine::Encounter`]; nothing here knows about time.
mod combatant;
mod log;
mod outcome;
mod roster;

pub use combatant::{Combatant, CombatantId, EntityKind, Faction, StatusEffect};
pub use log::{CombatLog, CombatLogEntry, SpeakerClass};
pub use outcome::{CombatOutcome, Epoch};
pub use roster::Roster;
