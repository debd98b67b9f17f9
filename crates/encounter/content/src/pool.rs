//! The narrative system's character pool, grouped by category.

use encounter_core::{CharacterRecord, PoolCategory};

/// Character records by pool category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolSpec {
    pub npcs: Vec<CharacterRecord>,
    pub companions: Vec<CharacterRecord>,
    pub spouses: Vec<CharacterRecord>,
    pub bonded: Vec<CharacterRecord>,
    pub enemies: Vec<CharacterRecord>,
}

impl PoolSpec {
    pub fn category(&self, category: PoolCategory) -> &[CharacterRecord] {
        match category {
            PoolCategory::Npcs => &self.npcs,
            PoolCategory::Companions => &self.companions,
            PoolCategory::Spouses => &self.spouses,
            PoolCategory::Bonded => &self.bonded,
            PoolCategory::Enemies => &self.enemies,
        }
    }

    pub fn category_mut(&mut self, category: PoolCategory) -> &mut Vec<CharacterRecord> {
        match category {
            PoolCategory::Npcs => &mut self.npcs,
            PoolCategory::Companions => &mut self.companions,
            PoolCategory::Spouses => &mut self.spouses,
            PoolCategory::Bonded => &mut self.bonded,
            PoolCategory::Enemies => &mut self.enemies,
        }
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
            + self.companions.len()
            + self.spouses.len()
            + self.bonded.len()
            + self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
