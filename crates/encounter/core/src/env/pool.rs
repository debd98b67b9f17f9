use super::CharacterRecord;

/// Buckets of the external character pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum PoolCategory {
    Npcs,
    Companions,
    Spouses,
    Bonded,
    Enemies,
}

impl PoolCategory {
    /// Categories a companion id may be resolved from.
    pub const COMPANION_SOURCES: [PoolCategory; 4] = [
        PoolCategory::Npcs,
        PoolCategory::Companions,
        PoolCategory::Spouses,
        PoolCategory::Bonded,
    ];

    /// Categories an opponent reference may be resolved from.
    pub const OPPONENT_SOURCES: [PoolCategory; 5] = [
        PoolCategory::Enemies,
        PoolCategory::Npcs,
        PoolCategory::Companions,
        PoolCategory::Spouses,
        PoolCategory::Bonded,
    ];
}

/// Lookup interface over the narrative system's character records.
///
/// Implementations only answer two primitive queries; the resolution rules
/// for companions and opponents are provided here so every pool follows them.
pub trait RosterPool: Send + Sync {
    /// Record with exactly this id in `category`.
    fn by_id(&self, category: PoolCategory, id: &str) -> Option<CharacterRecord>;

    /// Record with exactly this display name in `category`.
    fn by_name(&self, category: PoolCategory, name: &str) -> Option<CharacterRecord>;

    /// Resolves a companion by id only.
    fn companion(&self, id: &str) -> Option<CharacterRecord> {
        PoolCategory::COMPANION_SOURCES
            .iter()
            .find_map(|&category| self.by_id(category, id))
    }

    /// Resolves an opponent by id first, then by name, across every category.
    fn opponent(&self, id_or_name: &str) -> Option<CharacterRecord> {
        PoolCategory::OPPONENT_SOURCES
            .iter()
            .find_map(|&category| self.by_id(category, id_or_name))
            .or_else(|| {
                PoolCategory::OPPONENT_SOURCES
                    .iter()
                    .find_map(|&category| self.by_name(category, id_or_name))
            })
    }
}
