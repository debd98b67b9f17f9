//! Post-combat disposition negotiation and the end payload.
//!
//! On victory every defeated opponent gets a [`Disposition`] (default
//! `Release`) that an outside decision surface may override before
//! confirmation. Defeat and escape skip negotiation. Either way the encounter
//! hands off exactly one [`CombatEndPayload`].

use std::collections::BTreeMap;

use crate::engine::{Encounter, EngineError, Negotiation};
use crate::env::InventoryItem;
use crate::state::{CombatOutcome, Combatant, CombatantId, EntityKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Disposition {
    Kill,
    Capture,
    #[default]
    Release,
}

/// Projection of an opponent left at 0 HP.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefeatedEntity {
    pub id: CombatantId,
    pub name: String,
    pub kind: EntityKind,
    pub realm: Option<String>,
}

impl From<&Combatant> for DefeatedEntity {
    fn from(combatant: &Combatant) -> Self {
        Self {
            id: combatant.id().clone(),
            name: combatant.name.clone(),
            kind: combatant.kind,
            realm: combatant.realm.clone(),
        }
    }
}

/// Disposition choices keyed by defeated opponent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispositionSheet {
    defeated: Vec<DefeatedEntity>,
    choices: BTreeMap<CombatantId, Disposition>,
}

impl DispositionSheet {
    pub fn new(defeated: Vec<DefeatedEntity>) -> Self {
        let choices = defeated
            .iter()
            .map(|entity| (entity.id.clone(), Disposition::default()))
            .collect();
        Self { defeated, choices }
    }

    pub fn defeated(&self) -> &[DefeatedEntity] {
        &self.defeated
    }

    pub fn get(&self, id: &CombatantId) -> Option<Disposition> {
        self.choices.get(id).copied()
    }

    pub fn set(&mut self, id: &CombatantId, disposition: Disposition) -> Result<(), EngineError> {
        match self.choices.get_mut(id) {
            Some(choice) => {
                *choice = disposition;
                Ok(())
            }
            None => Err(EngineError::NotDefeated(id.clone())),
        }
    }

    /// The final map, provided every defeated opponent has an entry.
    pub fn finalize(&self) -> Result<BTreeMap<CombatantId, Disposition>, EngineError> {
        let missing: Vec<CombatantId> = self
            .defeated
            .iter()
            .filter(|entity| !self.choices.contains_key(&entity.id))
            .map(|entity| entity.id.clone())
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::DispositionsIncomplete { missing });
        }
        Ok(self.choices.clone())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VitalSnapshot {
    pub hp: u32,
    pub mp: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantVitals {
    pub id: CombatantId,
    pub hp: u32,
    pub mp: u32,
}

impl From<&Combatant> for CombatantVitals {
    fn from(combatant: &Combatant) -> Self {
        Self {
            id: combatant.id().clone(),
            hp: combatant.current_hp(),
            mp: combatant.current_mp,
        }
    }
}

/// The only artifact handed back to the narrative system.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEndPayload {
    pub outcome: CombatOutcome,
    /// Every log line in chronological order.
    pub summary: String,
    pub final_player_state: VitalSnapshot,
    pub dispositions: BTreeMap<CombatantId, Disposition>,
    pub opponent_ids: Vec<CombatantId>,
    pub final_inventory: Vec<InventoryItem>,
    pub final_allies_status: Vec<CombatantVitals>,
    pub final_opponents_status: Vec<CombatantVitals>,
}

impl Encounter {
    /// Opponents currently at 0 HP.
    pub fn defeated(&self) -> Vec<DefeatedEntity> {
        self.roster
            .opponents()
            .filter(|c| !c.is_alive())
            .map(DefeatedEntity::from)
            .collect()
    }

    /// Open disposition sheet, present only after victory and before hand-off.
    pub fn dispositions(&self) -> Option<&DispositionSheet> {
        match &self.negotiation {
            Negotiation::Pending(sheet) => Some(sheet),
            _ => None,
        }
    }

    pub fn set_disposition(
        &mut self,
        id: &CombatantId,
        disposition: Disposition,
    ) -> Result<(), EngineError> {
        match &mut self.negotiation {
            Negotiation::Pending(sheet) => sheet.set(id, disposition),
            Negotiation::HandedOff => Err(EngineError::AlreadyHandedOff),
            Negotiation::NotStarted if self.outcome.is_final() => {
                Err(EngineError::NoNegotiation(self.outcome))
            }
            Negotiation::NotStarted => Err(EngineError::OutcomeNotReached),
        }
    }

    /// Assembles the end payload. Succeeds once per encounter.
    ///
    /// On victory this is the confirmation step of negotiation.
    pub fn take_payload(&mut self) -> Result<CombatEndPayload, EngineError> {
        let dispositions = match (&self.negotiation, self.outcome) {
            (Negotiation::HandedOff, _) => return Err(EngineError::AlreadyHandedOff),
            (_, CombatOutcome::InProgress) => return Err(EngineError::OutcomeNotReached),
            (Negotiation::Pending(sheet), _) => sheet.finalize()?,
            (Negotiation::NotStarted, _) => BTreeMap::new(),
        };

        let protagonist = self.roster.protagonist();
        let payload = CombatEndPayload {
            outcome: self.outcome,
            summary: self.log.summary(),
            final_player_state: VitalSnapshot {
                hp: protagonist.current_hp(),
                mp: protagonist.current_mp,
            },
            dispositions,
            opponent_ids: self.opponent_ids.clone(),
            final_inventory: self.inventory.clone(),
            final_allies_status: self.roster.allies().map(CombatantVitals::from).collect(),
            final_opponents_status: self.roster.opponents().map(CombatantVitals::from).collect(),
        };

        self.negotiation = Negotiation::HandedOff;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::*;
    use crate::engine::TickResult;

    fn won() -> Encounter {
        let mut encounter = encounter(
            vec![ally("mei", 5)],
            vec![foe("wolf", 30, 5), foe("boar", 30, 5)],
        );
        encounter.roster.get_mut(&"wolf".into()).unwrap().set_hp(0);
        encounter.roster.get_mut(&"boar".into()).unwrap().set_hp(0);
        assert_eq!(
            encounter.tick(),
            TickResult::OutcomeReached(CombatOutcome::Victory)
        );
        encounter
    }

    #[test]
    fn victory_defaults_every_defeated_to_release() {
        let encounter = won();
        let sheet = encounter.dispositions().unwrap();
        assert_eq!(sheet.defeated().len(), 2);
        assert_eq!(sheet.get(&"wolf".into()), Some(Disposition::Release));
        assert_eq!(sheet.get(&"boar".into()), Some(Disposition::Release));
    }

    #[test]
    fn overrides_land_in_payload() {
        let mut encounter = won();
        encounter
            .set_disposition(&"wolf".into(), Disposition::Capture)
            .unwrap();
        assert!(matches!(
            encounter.set_disposition(&"hero".into(), Disposition::Kill),
            Err(EngineError::NotDefeated(_))
        ));

        let payload = encounter.take_payload().unwrap();
        assert_eq!(payload.outcome, CombatOutcome::Victory);
        assert_eq!(payload.dispositions[&"wolf".into()], Disposition::Capture);
        assert_eq!(payload.dispositions[&"boar".into()], Disposition::Release);
        assert_eq!(payload.final_player_state, VitalSnapshot { hp: 100, mp: 0 });
        assert_eq!(payload.final_allies_status.len(), 1);
        assert_eq!(payload.final_opponents_status.len(), 2);
        assert_eq!(payload.opponent_ids.len(), 2);
        assert!(payload.summary.contains("Victory"));
    }

    #[test]
    fn payload_is_handed_off_once() {
        let mut encounter = won();
        encounter.take_payload().unwrap();
        assert_eq!(encounter.take_payload(), Err(EngineError::AlreadyHandedOff));
        assert_eq!(
            encounter.set_disposition(&"wolf".into(), Disposition::Kill),
            Err(EngineError::AlreadyHandedOff)
        );
    }

    #[test]
    fn escape_skips_negotiation() {
        let mut encounter = encounter(vec![], vec![foe("wolf", 30, 5)]);
        assert_eq!(encounter.take_payload(), Err(EngineError::OutcomeNotReached));

        encounter.conclude(CombatOutcome::Escaped);
        assert!(encounter.dispositions().is_none());
        assert_eq!(
            encounter.set_disposition(&"wolf".into(), Disposition::Kill),
            Err(EngineError::NoNegotiation(CombatOutcome::Escaped))
        );
        let payload = encounter.take_payload().unwrap();
        assert!(payload.dispositions.is_empty());
        assert_eq!(payload.outcome, CombatOutcome::Escaped);
    }

    #[test]
    fn disposition_parses_from_lowercase() {
        assert_eq!("capture".parse::<Disposition>(), Ok(Disposition::Capture));
        assert!("spare".parse::<Disposition>().is_err());
    }
}
