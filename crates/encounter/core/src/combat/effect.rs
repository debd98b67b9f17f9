use crate::state::{CombatantId, Faction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    DamageHp,
    HealHp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Targeting {
    SingleEnemy,
    SingleAlly,
}

impl Targeting {
    /// Whether a `source` combatant may aim this effect at a `target`.
    pub fn accepts(self, source: Faction, target: Faction) -> bool {
        match self {
            Self::SingleEnemy => target == source.opposing(),
            Self::SingleAlly => target == source,
        }
    }
}

/// Numeric consequence of one resolved action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    pub base_power: Option<u32>,
    pub flat_value: Option<u32>,
    pub targeting: Targeting,
}

impl Effect {
    /// Single-target damage sized by `power`.
    pub const fn basic_attack(power: u32) -> Self {
        Self {
            kind: EffectKind::DamageHp,
            base_power: Some(power),
            flat_value: None,
            targeting: Targeting::SingleEnemy,
        }
    }

    /// Single-ally heal. `None` falls back to the configured default.
    pub const fn heal(amount: Option<u32>) -> Self {
        Self {
            kind: EffectKind::HealHp,
            base_power: None,
            flat_value: amount,
            targeting: Targeting::SingleAlly,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum VisualKind {
    Damage,
    Heal,
}

/// Floating text anchored to a combatant. Presentation decides how to draw it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualCue {
    pub target: CombatantId,
    pub text: String,
    pub kind: VisualKind,
}
