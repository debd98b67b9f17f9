//! Turn controller.
//!
//! Once the scheduler has paused on an actor, the controller either waits for
//! the protagonist's action or plans an automatic turn. Effects are applied
//! through a [`ResolutionTicket`] in two steps (`commit`, then `finish`) so
//! the driver can pace them; `finish` is the only way back to `ticking`.

use super::{Encounter, EngineError, SchedulerState, TurnPhase};
use crate::combat::{Effect, EffectApplied, resolve_effect};
use crate::env::Dice;
use crate::state::{CombatOutcome, CombatantId, Epoch, Faction, SpeakerClass};

const ATTACK_NAME: &str = "Attack";

/// Action requested by the player during `player-decision`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    /// Basic attack; `None` or an invalid target picks a living opponent.
    Attack { target: Option<CombatantId> },
    Flee,
}

/// Permission to apply one effect for one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolutionTicket {
    pub epoch: Epoch,
    pub turn: u64,
    pub source: CombatantId,
    pub target: CombatantId,
    pub effect: Effect,
    pub action_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerResolution {
    /// Apply the ticket after pacing.
    Resolve(ResolutionTicket),
    /// No living opponent to attack; the turn passed.
    Passed,
    Fled,
    FleeFailed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Accepted(PlayerResolution),
    /// Submitted outside `player-decision`; nothing happened.
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AiPlan {
    Resolve(ResolutionTicket),
    /// No living target; the turn passed with no effect.
    Skipped,
}

impl Encounter {
    /// Plans the automatic turn of the current ally or opponent.
    ///
    /// Returns `None` outside `ai-resolving`.
    pub fn plan_ai_turn(&mut self, dice: &mut (impl Dice + ?Sized)) -> Option<AiPlan> {
        let TurnPhase::AiResolving { actor } = &self.phase else {
            return None;
        };
        let actor = actor.clone();
        let faction = self.roster.get(&actor)?.faction();

        let targets: Vec<CombatantId> = self
            .roster
            .living(faction.opposing())
            .map(|c| c.id().clone())
            .collect();
        if targets.is_empty() {
            self.resume();
            return Some(AiPlan::Skipped);
        }

        let target = targets[dice.pick(targets.len())].clone();
        let effect = Effect::basic_attack(self.config.ai_attack_power);
        Some(AiPlan::Resolve(self.issue_ticket(actor, target, effect)))
    }

    /// Single entry point for player input. No-op outside `player-decision`.
    pub fn submit(&mut self, action: PlayerAction, dice: &mut (impl Dice + ?Sized)) -> Submission {
        let TurnPhase::PlayerDecision { actor } = &self.phase else {
            return Submission::Ignored;
        };
        let actor = actor.clone();

        let resolution = match action {
            PlayerAction::Attack { target } => match self.attack_target(target.as_ref()) {
                Some(target) => {
                    let effect = Effect::basic_attack(self.config.player_attack_power);
                    self.phase = TurnPhase::PlayerResolving {
                        actor: actor.clone(),
                    };
                    PlayerResolution::Resolve(self.issue_ticket(actor, target, effect))
                }
                None => {
                    self.resume();
                    PlayerResolution::Passed
                }
            },
            PlayerAction::Flee => self.flee(&actor, dice),
        };
        Submission::Accepted(resolution)
    }

    /// Applies the ticket's effect. Stale or duplicate tickets mutate nothing.
    pub fn commit(&mut self, ticket: &ResolutionTicket) -> Result<EffectApplied, EngineError> {
        self.ensure_current(ticket)?;
        if self.committed {
            return Err(self.stale(ticket));
        }

        let applied = resolve_effect(
            &mut self.roster,
            &mut self.log,
            &ticket.source,
            &ticket.target,
            &ticket.effect,
            &ticket.action_name,
            &self.config,
        )?;
        self.committed = true;
        Ok(applied)
    }

    /// Ends the ticket's turn and resumes the scheduler.
    pub fn finish(&mut self, ticket: &ResolutionTicket) -> Result<(), EngineError> {
        self.ensure_current(ticket)?;
        self.resume();
        Ok(())
    }

    fn attack_target(&self, requested: Option<&CombatantId>) -> Option<CombatantId> {
        let valid = requested.and_then(|id| self.roster.get(id)).filter(|c| {
            c.faction() == Faction::OpponentSide && c.is_alive()
        });
        valid
            .or_else(|| self.roster.living(Faction::OpponentSide).next())
            .map(|c| c.id().clone())
    }

    fn flee(&mut self, actor: &CombatantId, dice: &mut (impl Dice + ?Sized)) -> PlayerResolution {
        let name = self
            .roster
            .get(actor)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| actor.to_string());
        self.log
            .push(SpeakerClass::Player, format!("{name} attempts to flee..."));

        if self.flee_fails(dice) {
            self.log
                .push(SpeakerClass::Info, format!("{name} failed to escape!"));
            self.resume();
            PlayerResolution::FleeFailed
        } else {
            self.conclude(CombatOutcome::Escaped);
            PlayerResolution::Fled
        }
    }

    /// A unit roll at or below `1 - flee_success_chance` fails, so the
    /// standard 0.6 chance fails on rolls in `[0, 0.4]`. A chance of 1.0
    /// never fails and consumes no roll.
    fn flee_fails(&self, dice: &mut (impl Dice + ?Sized)) -> bool {
        let chance = self.config.flee_success_chance;
        chance < 1.0 && dice.roll_unit() <= 1.0 - chance
    }

    /// Marks `source` as acting and hands out the ticket for this turn.
    fn issue_ticket(
        &mut self,
        source: CombatantId,
        target: CombatantId,
        effect: Effect,
    ) -> ResolutionTicket {
        self.acting = Some(source.clone());
        self.committed = false;
        ResolutionTicket {
            epoch: self.epoch,
            turn: self.turn,
            source,
            target,
            effect,
            action_name: ATTACK_NAME.to_string(),
        }
    }

    fn ensure_current(&self, ticket: &ResolutionTicket) -> Result<(), EngineError> {
        let current = !self.outcome.is_final()
            && self.scheduler == SchedulerState::Paused
            && ticket.epoch == self.epoch
            && ticket.turn == self.turn
            && self.acting.as_ref() == Some(&ticket.source);
        if current { Ok(()) } else { Err(self.stale(ticket)) }
    }

    fn stale(&self, ticket: &ResolutionTicket) -> EngineError {
        EngineError::StaleResolution {
            ticket_epoch: ticket.epoch,
            ticket_turn: ticket.turn,
            current_epoch: self.epoch,
            current_turn: self.turn,
        }
    }

    /// `paused → ticking`, unless an outcome froze the encounter.
    fn resume(&mut self) {
        self.acting = None;
        self.committed = false;
        self.phase = TurnPhase::AwaitingActor;
        if !self.outcome.is_final() {
            self.scheduler = SchedulerState::Ticking;
        }
    }
}
