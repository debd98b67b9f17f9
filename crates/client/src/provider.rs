//! Scripted player policy for unattended runs.
use async_trait::async_trait;
use encounter_core::{CombatantId, DefeatedEntity, Disposition, EncounterSnapshot, PlayerAction};
use runtime::{ActionProvider, AttackActionProvider, Result};

/// Attacks the weakest opponent, or tries to flee every turn.
pub struct ScriptedProvider {
    flee: bool,
    disposition: Disposition,
}

impl ScriptedProvider {
    pub fn new(flee: bool, disposition: Disposition) -> Self {
        Self { flee, disposition }
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_action(
        &self,
        actor: &CombatantId,
        snapshot: &EncounterSnapshot,
    ) -> Result<PlayerAction> {
        if self.flee {
            return Ok(PlayerAction::Flee);
        }
        AttackActionProvider.provide_action(actor, snapshot).await
    }

    async fn choose_disposition(&self, entity: &DefeatedEntity) -> Result<Disposition> {
        tracing::info!(
            target: "encounter::disposition",
            id = %entity.id,
            name = %entity.name,
            disposition = %self.disposition,
            "Disposition chosen"
        );
        Ok(self.disposition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_core::{
        CombatOutcome, Combatant, EntityKind, Epoch, Faction, SchedulerState, TurnPhase,
    };

    fn snapshot() -> EncounterSnapshot {
        let hero = Combatant::new("hero", "Lin", EntityKind::Player, Faction::PlayerSide, 100);
        let strong = Combatant::new("ox", "Ox", EntityKind::Enemy, Faction::OpponentSide, 90);
        let weak = Combatant::new("rat", "Rat", EntityKind::Enemy, Faction::OpponentSide, 90)
            .with_hp(12);
        EncounterSnapshot {
            roster: vec![hero, strong, weak],
            log: Vec::new(),
            outcome: CombatOutcome::InProgress,
            scheduler: SchedulerState::Paused,
            phase: TurnPhase::PlayerDecision {
                actor: "hero".into(),
            },
            acting: None,
            turn: 1,
            epoch: Epoch::default(),
        }
    }

    #[tokio::test]
    async fn attacks_weakest_opponent() {
        let provider = ScriptedProvider::new(false, Disposition::Kill);
        let action = provider
            .provide_action(&"hero".into(), &snapshot())
            .await
            .unwrap();
        assert_eq!(
            action,
            PlayerAction::Attack {
                target: Some("rat".into())
            }
        );
    }

    #[tokio::test]
    async fn flee_policy_always_flees() {
        let provider = ScriptedProvider::new(true, Disposition::Kill);
        let action = provider
            .provide_action(&"hero".into(), &snapshot())
            .await
            .unwrap();
        assert_eq!(action, PlayerAction::Flee);
    }
}
