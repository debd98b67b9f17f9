//! Action-gauge scheduler.
//!
//! Each tick, while `ticking`:
//! 1. evaluate the outcome detector; a final outcome stops scheduling
//! 2. fill every living gauge by `speed * gauge_speed_factor`, clamped
//! 3. scan the roster in order for the first living, full gauge
//! 4. reset that gauge, pause, and hand the turn to the controller

use super::{Encounter, SchedulerState, TurnPhase};
use crate::state::{CombatOutcome, CombatantId};

/// Who decides the action for a started turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    Player,
    Ai,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnStart {
    pub actor: CombatantId,
    pub turn: u64,
    pub controller: Controller,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickResult {
    /// The scheduler is not in `ticking`; nothing changed.
    Idle,
    /// Gauges advanced, nobody is ready yet.
    Advanced,
    TurnStarted(TurnStart),
    OutcomeReached(CombatOutcome),
}

impl Encounter {
    /// Runs one scheduler tick.
    pub fn tick(&mut self) -> TickResult {
        if self.scheduler != SchedulerState::Ticking {
            return TickResult::Idle;
        }

        if let Some(outcome) = self.detect_outcome() {
            self.conclude(outcome);
            return TickResult::OutcomeReached(outcome);
        }

        self.accumulate_gauges();

        match self.select_actor() {
            Some(actor) => TickResult::TurnStarted(self.begin_turn(actor)),
            None => TickResult::Advanced,
        }
    }

    /// Fills every living gauge; dead combatants are held at 0.
    fn accumulate_gauges(&mut self) {
        let max = self.config.gauge_max;
        let gains: Vec<f64> = self
            .roster
            .iter()
            .map(|c| self.config.gauge_gain(c.speed))
            .collect();

        for (combatant, gain) in self.roster.iter_mut().zip(gains) {
            if combatant.is_alive() {
                combatant.set_gauge(combatant.gauge() + gain, max);
            } else {
                combatant.set_gauge(0.0, max);
            }
        }
    }

    /// First living combatant in roster order whose gauge is full.
    fn select_actor(&self) -> Option<CombatantId> {
        let max = self.config.gauge_max;
        self.roster
            .iter()
            .find(|c| c.is_alive() && c.gauge() >= max)
            .map(|c| c.id().clone())
    }

    fn begin_turn(&mut self, actor: CombatantId) -> TurnStart {
        let max = self.config.gauge_max;
        let mut controller = Controller::Ai;
        if let Some(combatant) = self.roster.get_mut(&actor) {
            combatant.set_gauge(0.0, max);
            if combatant.is_protagonist() {
                controller = Controller::Player;
            }
        }

        self.turn += 1;
        self.scheduler = SchedulerState::Paused;
        self.phase = match controller {
            Controller::Player => TurnPhase::PlayerDecision {
                actor: actor.clone(),
            },
            Controller::Ai => TurnPhase::AiResolving {
                actor: actor.clone(),
            },
        };

        TurnStart {
            actor,
            turn: self.turn,
            controller,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn loading_encounter_does_not_tick() {
        let mut encounter = encounter(vec![], vec![foe("foe", 40, 10)]);
        encounter.scheduler = SchedulerState::Loading;
        assert_eq!(encounter.tick(), TickResult::Idle);
        assert_eq!(encounter.roster().protagonist().gauge(), 0.0);
    }

    #[test]
    fn gauges_fill_by_speed_and_stay_clamped() {
        let mut encounter = encounter(vec![], vec![foe("foe", 40, 7)]);

        for _ in 0..10 {
            encounter.tick();
        }
        // 10 ticks * 10 speed * 0.15
        let hero = encounter.roster().protagonist();
        assert!((hero.gauge() - 15.0).abs() < 1e-9);

        for _ in 0..500 {
            if let TickResult::TurnStarted(_) = encounter.tick() {
                encounter.scheduler = SchedulerState::Ticking;
            }
            for c in encounter.roster().iter() {
                assert!(c.gauge() >= 0.0 && c.gauge() <= encounter.config().gauge_max);
            }
        }
    }

    #[test]
    fn dead_combatants_never_fill() {
        let mut dead = ally("fallen", 50);
        dead.set_hp(0);
        let mut encounter = encounter(vec![dead], vec![foe("foe", 40, 1)]);

        for _ in 0..100 {
            if let TickResult::TurnStarted(start) = encounter.tick() {
                assert_ne!(start.actor.as_str(), "fallen");
                encounter.scheduler = SchedulerState::Ticking;
            }
            let fallen = encounter.roster().get(&"fallen".into()).unwrap();
            assert_eq!(fallen.gauge(), 0.0);
        }
    }

    #[test]
    fn selection_pauses_and_resets_gauge() {
        let mut encounter = encounter(vec![], vec![foe("foe", 40, 1)]);
        let start = tick_until_turn(&mut encounter, 100);

        assert_eq!(start.actor.as_str(), "hero");
        assert_eq!(start.controller, Controller::Player);
        assert_eq!(start.turn, 1);
        assert_eq!(encounter.scheduler_state(), SchedulerState::Paused);
        assert_eq!(encounter.roster().protagonist().gauge(), 0.0);
        assert!(matches!(encounter.phase(), TurnPhase::PlayerDecision { .. }));

        // Paused: further ticks change nothing.
        let foe_gauge = encounter.roster().get(&"foe".into()).unwrap().gauge();
        assert_eq!(encounter.tick(), TickResult::Idle);
        assert_eq!(
            encounter.roster().get(&"foe".into()).unwrap().gauge(),
            foe_gauge
        );
    }

    #[test]
    fn simultaneous_fill_breaks_ties_by_roster_order() {
        // Positions 2 and 5 share speed 20; everyone else is slow.
        let mut encounter = encounter(
            vec![ally("a1", 1), ally("a2", 20)],
            vec![foe("f1", 40, 1), foe("f2", 40, 1), foe("f3", 40, 20)],
        );

        let first = tick_until_turn(&mut encounter, 100);
        assert_eq!(first.actor.as_str(), "a2");
        let f3 = encounter.roster().get(&"f3".into()).unwrap().gauge();
        assert_eq!(f3, encounter.config().gauge_max);

        // Resume without resolving anything: f3 fires on the very next tick.
        encounter.scheduler = SchedulerState::Ticking;
        match encounter.tick() {
            TickResult::TurnStarted(start) => assert_eq!(start.actor.as_str(), "f3"),
            other => panic!("expected f3 to act, got {other:?}"),
        }
        assert_eq!(encounter.roster().position(&"f3".into()), Some(5));
    }
}
