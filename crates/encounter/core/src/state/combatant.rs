use core::fmt;

use crate::env::{CharacterRecord, ProtagonistSheet};

/// Stable identifier of a combatant, unique within one encounter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CombatantId(String);

impl CombatantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CombatantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CombatantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Side of the fight. Assigned once at initialization, never changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum Faction {
    PlayerSide,
    OpponentSide,
}

impl Faction {
    pub const fn opposing(self) -> Self {
        match self {
            Self::PlayerSide => Self::OpponentSide,
            Self::OpponentSide => Self::PlayerSide,
        }
    }
}

/// Display classification of a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    Player,
    Ally,
    Enemy,
}

/// Status effect carried through the encounter untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: String,
    pub remaining_turns: Option<u32>,
}

/// One participant for the duration of one encounter.
///
/// `current_hp` stays within `[0, max_hp]` and `gauge` within
/// `[0, gauge_max]`; both are only written through clamping setters, and
/// `max_hp` is fixed at construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    id: CombatantId,
    faction: Faction,
    pub name: String,
    pub kind: EntityKind,
    current_hp: u32,
    max_hp: u32,
    pub current_mp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    gauge: f64,
    pub status_effects: Vec<StatusEffect>,
    pub realm: Option<String>,
    pub affinity: Option<i32>,
}

impl Combatant {
    /// Creates a combatant at full health with an empty gauge.
    pub fn new(
        id: impl Into<CombatantId>,
        name: impl Into<String>,
        kind: EntityKind,
        faction: Faction,
        max_hp: u32,
    ) -> Self {
        Self {
            id: id.into(),
            faction,
            name: name.into(),
            kind,
            current_hp: max_hp,
            max_hp,
            current_mp: 0,
            max_mp: 0,
            attack: 0,
            defense: 0,
            speed: 0,
            gauge: 0.0,
            status_effects: Vec::new(),
            realm: None,
            affinity: None,
        }
    }

    #[must_use]
    pub fn with_stats(mut self, attack: u32, defense: u32, speed: u32) -> Self {
        self.attack = attack;
        self.defense = defense;
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.set_hp(hp);
        self
    }

    #[must_use]
    pub fn with_mp(mut self, mp: u32, max_mp: u32) -> Self {
        self.max_mp = max_mp;
        self.current_mp = mp.min(max_mp);
        self
    }

    /// The protagonist, always `player-side`.
    pub fn from_protagonist(sheet: &ProtagonistSheet) -> Self {
        let mut combatant = Self::new(
            sheet.id.as_str(),
            sheet.name.as_str(),
            EntityKind::Player,
            Faction::PlayerSide,
            sheet.max_hp,
        )
        .with_hp(sheet.hp)
        .with_mp(sheet.mp, sheet.max_mp)
        .with_stats(sheet.attack, sheet.defense, sheet.speed);
        combatant.status_effects = sheet.status_effects.clone();
        combatant.realm = sheet.realm.clone();
        combatant
    }

    /// A companion resolved from the external pool. Missing HP means full HP.
    pub fn companion(record: &CharacterRecord) -> Self {
        let hp = record.hp.unwrap_or(record.max_hp);
        Self::from_record(record, EntityKind::Ally, Faction::PlayerSide).with_hp(hp)
    }

    /// An opponent resolved from the external pool.
    ///
    /// Zero or missing HP is treated as stale data and replaced with `max_hp`,
    /// so an encounter never starts already won.
    pub fn opponent(record: &CharacterRecord) -> Self {
        let hp = match record.hp {
            Some(hp) if hp > 0 => hp,
            _ => record.max_hp,
        };
        Self::from_record(record, EntityKind::Enemy, Faction::OpponentSide).with_hp(hp)
    }

    fn from_record(record: &CharacterRecord, kind: EntityKind, faction: Faction) -> Self {
        let mut combatant = Self::new(
            record.id.as_str(),
            record.name.as_str(),
            kind,
            faction,
            record.max_hp,
        )
        .with_mp(record.mp.unwrap_or(record.max_mp), record.max_mp)
        .with_stats(record.attack, record.defense, record.speed);
        combatant.status_effects = record.status_effects.clone();
        combatant.realm = record.realm.clone();
        combatant.affinity = record.affinity;
        combatant
    }

    /// Projects the protagonist into an opponent with identical combat stats.
    ///
    /// This is the only place a recovered opponent is built; HP, attack,
    /// defense and speed are copied from `protagonist` as they are right now.
    pub fn mirror_from(protagonist: &Combatant, id: impl Into<CombatantId>, affinity: i32) -> Self {
        let hp = if protagonist.current_hp > 0 {
            protagonist.current_hp
        } else {
            protagonist.max_hp
        };
        let mut ghost = Self::new(
            id,
            format!("Shadow of {}", protagonist.name),
            EntityKind::Enemy,
            Faction::OpponentSide,
            protagonist.max_hp,
        )
        .with_hp(hp)
        .with_mp(protagonist.current_mp, protagonist.max_mp)
        .with_stats(protagonist.attack, protagonist.defense, protagonist.speed);
        ghost.realm = protagonist.realm.clone();
        ghost.affinity = Some(affinity);
        ghost
    }

    pub fn id(&self) -> &CombatantId {
        &self.id
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn gauge(&self) -> f64 {
        self.gauge
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn is_protagonist(&self) -> bool {
        self.kind == EntityKind::Player
    }

    /// Sets HP, clamped to `[0, max_hp]`. A combatant at 0 HP loses its gauge.
    pub fn set_hp(&mut self, hp: u32) {
        self.current_hp = hp.min(self.max_hp);
        if self.current_hp == 0 {
            self.gauge = 0.0;
        }
    }

    /// Sets the gauge, clamped to `[0, max]`.
    pub fn set_gauge(&mut self, value: f64, max: f64) {
        self.gauge = if value.is_nan() { 0.0 } else { value.clamp(0.0, max) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hp: Option<u32>) -> CharacterRecord {
        CharacterRecord {
            id: "bandit".into(),
            name: "Bandit".into(),
            hp,
            max_hp: 40,
            mp: None,
            max_mp: 10,
            attack: 15,
            defense: 5,
            speed: 10,
            realm: Some("Outer Court".into()),
            affinity: Some(0),
            status_effects: Vec::new(),
        }
    }

    #[test]
    fn opponent_with_stale_hp_starts_full() {
        assert_eq!(Combatant::opponent(&record(Some(0))).current_hp(), 40);
        assert_eq!(Combatant::opponent(&record(None)).current_hp(), 40);
        assert_eq!(Combatant::opponent(&record(Some(12))).current_hp(), 12);
    }

    #[test]
    fn companion_keeps_recorded_hp() {
        let ally = Combatant::companion(&record(Some(0)));
        assert_eq!(ally.current_hp(), 0);
        assert_eq!(ally.faction(), Faction::PlayerSide);
        assert_eq!(ally.kind, EntityKind::Ally);
    }

    #[test]
    fn hp_and_gauge_are_clamped() {
        let mut c = Combatant::new("a", "A", EntityKind::Ally, Faction::PlayerSide, 50);
        c.set_hp(80);
        assert_eq!(c.current_hp(), 50);
        assert_eq!(c.max_hp(), 50);
        assert_eq!(c.clone().with_hp(500).current_hp(), 50);

        c.set_gauge(130.0, 100.0);
        assert_eq!(c.gauge(), 100.0);
        c.set_gauge(-4.0, 100.0);
        assert_eq!(c.gauge(), 0.0);

        c.set_gauge(70.0, 100.0);
        c.set_hp(0);
        assert_eq!(c.gauge(), 0.0);
    }

    #[test]
    fn mirror_copies_combat_stats() {
        let hero = Combatant::new("hero", "Lin", EntityKind::Player, Faction::PlayerSide, 120)
            .with_hp(90)
            .with_stats(25, 5, 10);
        let ghost = Combatant::mirror_from(&hero, "ghost:x", -50);

        assert_eq!(ghost.faction(), Faction::OpponentSide);
        assert_eq!(ghost.name, "Shadow of Lin");
        assert_eq!(ghost.current_hp(), 90);
        assert_eq!(ghost.max_hp(), 120);
        assert_eq!((ghost.attack, ghost.defense, ghost.speed), (25, 5, 10));
        assert_eq!(ghost.affinity, Some(-50));
    }
}
