//! Read-only views of the surrounding game state.
//!
//! The encounter only ever reads the outer world: a snapshot handed over at
//! initialization ([`EncounterRequest`]) and a [`RosterPool`] used to resolve
//! companion and opponent references. Concrete pools live in the runtime.
mod pool;
mod rng;
mod snapshot;

pub use pool::{PoolCategory, RosterPool};
pub use rng::{Dice, RngDice};
pub use snapshot::{CharacterRecord, EncounterRequest, InventoryItem, ProtagonistSheet};
