//! Encounter snapshot loader.
//!
//! An encounter file bundles what the narrative system would hand over at the
//! start of a fight: the request and the character pool it resolves against.
//!
//! ```ron
//! (
//!     request: (
//!         protagonist: (id: "hero", name: "Lin", hp: 100, max_hp: 100, ...),
//!         companion_ids: ["mei"],
//!         opponent_refs: ["Grey Wolf"],
//!         inventory: [],
//!     ),
//!     pool: (
//!         companions: [(id: "mei", name: "Mei", max_hp: 60, ...)],
//!         enemies: [(id: "wolf", name: "Grey Wolf", max_hp: 40, ...)],
//!     ),
//! )
//! ```

use std::path::Path;

use encounter_core::EncounterRequest;

use crate::loaders::{LoadResult, read_file};
use crate::pool::PoolSpec;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EncounterFile {
    pub request: EncounterRequest,
    #[serde(default)]
    pub pool: PoolSpec,
}

/// Loader for encounter snapshots from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterFile> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load encounter {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<EncounterFile> {
        let file: EncounterFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;

        if file.request.protagonist.id.trim().is_empty() {
            anyhow::bail!("protagonist id must not be empty");
        }
        if file.request.opponent_refs.is_empty() {
            anyhow::bail!("encounter lists no opponents");
        }

        Ok(file)
    }
}
