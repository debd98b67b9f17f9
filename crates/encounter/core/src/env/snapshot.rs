use crate::state::StatusEffect;

/// Stat block of the protagonist as seen by the narrative system.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtagonistSheet {
    pub id: String,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status_effects: Vec<StatusEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub realm: Option<String>,
}

/// A character known to the outer world (NPC, companion, enemy, ...).
///
/// `hp`/`mp` are optional because upstream data is frequently incomplete.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterRecord {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<u32>,
    pub max_hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub realm: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub affinity: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status_effects: Vec<StatusEffect>,
}

/// Inventory line carried through the encounter unmodified.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
}

/// Everything the narrative system hands over to start an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterRequest {
    pub protagonist: ProtagonistSheet,
    #[cfg_attr(feature = "serde", serde(default))]
    pub companion_ids: Vec<String>,
    /// Opponent ids or display names.
    pub opponent_refs: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Vec<InventoryItem>,
}
