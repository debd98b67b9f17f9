//! Encounter content: the external character pool and file loaders.
//!
//! - [`PoolSpec`]: character records grouped by pool category
//! - Encounter snapshots (request + pool) from RON files
//! - Engine tuning ([`encounter_core::EncounterConfig`]) from TOML files
//!
//! Content is consumed by the runtime's pool oracle and never mutated by an
//! encounter.

pub mod pool;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use pool::PoolSpec;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, EncounterFile, EncounterLoader, LoadResult};
