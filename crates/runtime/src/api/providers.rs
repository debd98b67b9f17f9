//! Asynchronous abstraction for sourcing the protagonist's intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so an encounter
//! can run with human input, scripted fixtures, or simple policies.
use async_trait::async_trait;
use encounter_core::{
    CombatantId, DefeatedEntity, Disposition, EncounterSnapshot, Faction, PlayerAction,
};

use super::errors::Result;

/// Decides what the protagonist does whenever the encounter awaits input.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `actor` given a read-only snapshot.
    async fn provide_action(
        &self,
        actor: &CombatantId,
        snapshot: &EncounterSnapshot,
    ) -> Result<PlayerAction>;

    /// Disposition for a defeated opponent after victory.
    async fn choose_disposition(&self, _entity: &DefeatedEntity) -> Result<Disposition> {
        Ok(Disposition::default())
    }
}

/// Always attacks the living opponent with the least HP.
/// Useful for testing or as a fallback.
pub struct AttackActionProvider;

#[async_trait]
impl ActionProvider for AttackActionProvider {
    async fn provide_action(
        &self,
        _actor: &CombatantId,
        snapshot: &EncounterSnapshot,
    ) -> Result<PlayerAction> {
        let target = snapshot
            .roster
            .iter()
            .filter(|c| c.faction() == Faction::OpponentSide && c.is_alive())
            .min_by_key(|c| c.current_hp())
            .map(|c| c.id().clone());
        Ok(PlayerAction::Attack { target })
    }
}
