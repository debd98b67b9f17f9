//! Encounter state machine.
//!
//! [`Encounter`] owns the roster exclusively. A driver (the runtime worker or a
//! test) calls [`Encounter::tick`] on a fixed interval; when a turn starts the
//! scheduler pauses itself and only the turn controller can resume it:
//!
//! ```text
//! loading ──start──▶ ticking ──actor selected──▶ paused ──finish──▶ ticking
//!                       │                           │
//!                       └──────── outcome ──────────┴──▶ outcome-reached
//! ```
//!
//! Paced resolutions are split into `ResolutionTicket` → `commit` → `finish`
//! so the driver can wait between steps; every step re-validates the ticket
//! against the current epoch and turn.
mod errors;
mod outcome;
mod scheduler;
mod turns;

pub use errors::EngineError;
pub use scheduler::{Controller, TickResult, TurnStart};
pub use turns::{AiPlan, PlayerAction, PlayerResolution, ResolutionTicket, Submission};

use crate::config::EncounterConfig;
use crate::disposition::DispositionSheet;
use crate::env::InventoryItem;
use crate::init::RecoveryReport;
use crate::state::{CombatLog, CombatLogEntry, CombatOutcome, Combatant, CombatantId, Epoch, Roster};

/// Scheduler state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum SchedulerState {
    Loading,
    Ticking,
    Paused,
    OutcomeReached,
}

/// Turn controller state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    AwaitingActor,
    /// Waiting, without timeout, for the protagonist's action.
    PlayerDecision { actor: CombatantId },
    /// The protagonist's chosen action is being resolved.
    PlayerResolving { actor: CombatantId },
    /// An ally or opponent turn is being resolved automatically.
    AiResolving { actor: CombatantId },
}

/// Post-outcome hand-off state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Negotiation {
    NotStarted,
    Pending(DispositionSheet),
    HandedOff,
}

/// One bounded combat encounter.
#[derive(Clone, Debug)]
pub struct Encounter {
    pub(crate) config: EncounterConfig,
    pub(crate) roster: Roster,
    pub(crate) log: CombatLog,
    pub(crate) outcome: CombatOutcome,
    pub(crate) scheduler: SchedulerState,
    pub(crate) phase: TurnPhase,
    pub(crate) epoch: Epoch,
    pub(crate) turn: u64,
    pub(crate) acting: Option<CombatantId>,
    /// Whether the current turn's effect has already been applied.
    pub(crate) committed: bool,
    pub(crate) opponent_ids: Vec<CombatantId>,
    pub(crate) inventory: Vec<InventoryItem>,
    pub(crate) recovery: Option<RecoveryReport>,
    pub(crate) negotiation: Negotiation,
}

/// Read-only view handed to presentation layers and action providers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSnapshot {
    pub roster: Vec<Combatant>,
    pub log: Vec<CombatLogEntry>,
    pub outcome: CombatOutcome,
    pub scheduler: SchedulerState,
    pub phase: TurnPhase,
    pub acting: Option<CombatantId>,
    pub turn: u64,
    pub epoch: Epoch,
}

impl EncounterSnapshot {
    /// The combatant whose input is awaited, if any.
    pub fn awaiting_input(&self) -> Option<&CombatantId> {
        match &self.phase {
            TurnPhase::PlayerDecision { actor } => Some(actor),
            _ => None,
        }
    }

    pub fn combatant(&self, id: &CombatantId) -> Option<&Combatant> {
        self.roster.iter().find(|c| c.id() == id)
    }
}

impl Encounter {
    pub(crate) fn new(
        config: EncounterConfig,
        roster: Roster,
        log: CombatLog,
        opponent_ids: Vec<CombatantId>,
        inventory: Vec<InventoryItem>,
        recovery: Option<RecoveryReport>,
    ) -> Self {
        Self {
            config,
            roster,
            log,
            outcome: CombatOutcome::InProgress,
            scheduler: SchedulerState::Loading,
            phase: TurnPhase::AwaitingActor,
            epoch: Epoch::default(),
            turn: 0,
            acting: None,
            committed: false,
            opponent_ids,
            inventory,
            recovery,
            negotiation: Negotiation::NotStarted,
        }
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn outcome(&self) -> CombatOutcome {
        self.outcome
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler
    }

    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Combatant currently highlighted as acting.
    pub fn acting(&self) -> Option<&CombatantId> {
        self.acting.as_ref()
    }

    /// Opponent ids for the rest of the encounter (replaced by recovery).
    pub fn opponent_ids(&self) -> &[CombatantId] {
        &self.opponent_ids
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    /// Set when the opponents had to be synthesized at initialization.
    pub fn recovery(&self) -> Option<&RecoveryReport> {
        self.recovery.as_ref()
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler == SchedulerState::Ticking
    }

    pub fn snapshot(&self) -> EncounterSnapshot {
        EncounterSnapshot {
            roster: self.roster.to_vec(),
            log: self.log.entries().to_vec(),
            outcome: self.outcome,
            scheduler: self.scheduler,
            phase: self.phase.clone(),
            acting: self.acting.clone(),
            turn: self.turn,
            epoch: self.epoch,
        }
    }

    /// `loading → ticking`. Returns false if the encounter already started.
    pub fn start(&mut self) -> bool {
        if self.scheduler != SchedulerState::Loading {
            return false;
        }
        self.scheduler = SchedulerState::Ticking;
        true
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::env::Dice;
    use crate::state::{EntityKind, Faction};

    /// Dice returning scripted values, then repeating the last one.
    pub struct ScriptedDice {
        pub units: Vec<f64>,
        pub picks: Vec<usize>,
    }

    impl ScriptedDice {
        pub fn new(units: &[f64], picks: &[usize]) -> Self {
            Self {
                units: units.to_vec(),
                picks: picks.to_vec(),
            }
        }
    }

    impl Dice for ScriptedDice {
        fn roll_unit(&mut self) -> f64 {
            if self.units.len() > 1 {
                self.units.remove(0)
            } else {
                self.units.first().copied().unwrap_or(0.0)
            }
        }

        fn pick(&mut self, len: usize) -> usize {
            let value = if self.picks.len() > 1 {
                self.picks.remove(0)
            } else {
                self.picks.first().copied().unwrap_or(0)
            };
            value % len
        }
    }

    pub fn hero() -> Combatant {
        Combatant::new("hero", "Hero", EntityKind::Player, Faction::PlayerSide, 100)
            .with_stats(25, 5, 10)
    }

    pub fn foe(id: &str, hp: u32, speed: u32) -> Combatant {
        Combatant::new(id, id, EntityKind::Enemy, Faction::OpponentSide, hp)
            .with_stats(15, 5, speed)
    }

    pub fn ally(id: &str, speed: u32) -> Combatant {
        Combatant::new(id, id, EntityKind::Ally, Faction::PlayerSide, 60).with_stats(10, 2, speed)
    }

    pub fn encounter(allies: Vec<Combatant>, opponents: Vec<Combatant>) -> Encounter {
        let opponent_ids = opponents.iter().map(|c| c.id().clone()).collect();
        let roster = Roster::new(hero(), allies, opponents);
        let mut encounter = Encounter::new(
            EncounterConfig::default(),
            roster,
            CombatLog::new(),
            opponent_ids,
            Vec::new(),
            None,
        );
        encounter.start();
        encounter
    }

    /// Ticks until a turn starts, failing after `limit` ticks.
    pub fn tick_until_turn(encounter: &mut Encounter, limit: usize) -> TurnStart {
        for _ in 0..limit {
            if let TickResult::TurnStarted(start) = encounter.tick() {
                return start;
            }
        }
        panic!("no turn started within {limit} ticks");
    }
}
