//! Outcome detection.
//!
//! Evaluated at the top of every tick: a wiped player side is a defeat, a
//! wiped opponent side a victory. Escape is never detected here; the flee
//! action concludes the encounter directly.

use super::{Encounter, Negotiation, SchedulerState, TurnPhase};
use crate::disposition::DispositionSheet;
use crate::state::{CombatOutcome, Faction, SpeakerClass};

impl Encounter {
    pub(crate) fn detect_outcome(&self) -> Option<CombatOutcome> {
        if self.outcome.is_final() {
            return None;
        }
        if self.roster.is_wiped(Faction::PlayerSide) {
            Some(CombatOutcome::Defeat)
        } else if self.roster.is_wiped(Faction::OpponentSide) {
            Some(CombatOutcome::Victory)
        } else {
            None
        }
    }

    /// Freezes the encounter with `outcome`.
    ///
    /// Bumps the epoch so any in-flight resolution is discarded, and opens
    /// disposition negotiation on victory. No-op once an outcome is set.
    pub(crate) fn conclude(&mut self, outcome: CombatOutcome) {
        if self.outcome.is_final() || !outcome.is_final() {
            return;
        }

        self.outcome = outcome;
        self.epoch = self.epoch.next();
        self.scheduler = SchedulerState::OutcomeReached;
        self.phase = TurnPhase::AwaitingActor;
        self.acting = None;

        let line = match outcome {
            CombatOutcome::Victory => "Victory! All opponents have fallen.",
            CombatOutcome::Defeat => "Defeat. Your side can fight no longer.",
            CombatOutcome::Escaped => "You escaped the battle.",
            CombatOutcome::InProgress => return,
        };
        self.log.push(SpeakerClass::System, line);

        if outcome == CombatOutcome::Victory {
            self.negotiation = Negotiation::Pending(DispositionSheet::new(self.defeated()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{PlayerAction, TickResult};
    use super::*;

    #[test]
    fn wiped_opponents_mean_victory() {
        let mut encounter = encounter(vec![], vec![foe("foe", 40, 10)]);
        encounter.roster.get_mut(&"foe".into()).unwrap().set_hp(0);

        assert_eq!(
            encounter.tick(),
            TickResult::OutcomeReached(CombatOutcome::Victory)
        );
        assert_eq!(encounter.outcome(), CombatOutcome::Victory);
        assert_eq!(encounter.scheduler_state(), SchedulerState::OutcomeReached);
        assert!(matches!(encounter.negotiation, Negotiation::Pending(_)));
    }

    #[test]
    fn simultaneous_player_wipe_is_defeat_and_freezes_state() {
        let mut encounter = encounter(vec![ally("mei", 12)], vec![foe("foe", 40, 10)]);
        for _ in 0..20 {
            encounter.tick();
        }
        encounter.roster.get_mut(&"hero".into()).unwrap().set_hp(0);
        encounter.roster.get_mut(&"mei".into()).unwrap().set_hp(0);

        assert_eq!(
            encounter.tick(),
            TickResult::OutcomeReached(CombatOutcome::Defeat)
        );
        let frozen = encounter.roster().clone();
        let epoch = encounter.epoch();

        for _ in 0..50 {
            assert_eq!(encounter.tick(), TickResult::Idle);
        }
        let mut dice = ScriptedDice::new(&[0.99], &[0]);
        assert_eq!(
            encounter.submit(PlayerAction::Flee, &mut dice),
            super::super::Submission::Ignored
        );
        assert_eq!(encounter.roster(), &frozen);
        assert_eq!(encounter.epoch(), epoch);
        assert_eq!(encounter.outcome(), CombatOutcome::Defeat);
    }

    #[test]
    fn defeat_takes_priority_over_victory() {
        let mut encounter = encounter(vec![], vec![foe("foe", 40, 10)]);
        encounter.roster.get_mut(&"hero".into()).unwrap().set_hp(0);
        encounter.roster.get_mut(&"foe".into()).unwrap().set_hp(0);
        assert_eq!(
            encounter.tick(),
            TickResult::OutcomeReached(CombatOutcome::Defeat)
        );
    }

    #[test]
    fn conclude_is_monotonic() {
        let mut encounter = encounter(vec![], vec![foe("foe", 40, 10)]);
        encounter.conclude(CombatOutcome::Escaped);
        let epoch = encounter.epoch();
        encounter.conclude(CombatOutcome::Victory);
        assert_eq!(encounter.outcome(), CombatOutcome::Escaped);
        assert_eq!(encounter.epoch(), epoch);
    }
}
