//! Encounter worker that owns the authoritative [`Encounter`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives the scheduler on a
//! fixed interval, paces resolutions, and publishes events to the EventBus.
//!
//! Paced steps run as detached sleeps that report back on an internal
//! channel. The worker re-validates every step against the encounter's epoch
//! and turn, so a step that outlives its turn (or the encounter's outcome) is
//! discarded without touching the roster.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use encounter_core::{
    AiPlan, CombatEndPayload, CombatError, CombatOutcome, CombatantId, Controller, Dice,
    Disposition, Encounter, EncounterSnapshot, PlayerAction, PlayerResolution, ResolutionTicket,
    Submission, TickResult, TurnStart,
};

use crate::api::Result;
use crate::events::{Event, EventBus, OutcomeEvent, TurnEvent, VisualEvent};

/// Commands that can be sent to the encounter worker
pub enum Command {
    /// Move the scheduler from `loading` to `ticking`.
    Start { reply: oneshot::Sender<bool> },
    /// Player input for the current decision window.
    SubmitAction {
        action: PlayerAction,
        reply: oneshot::Sender<Submission>,
    },
    /// Query the current encounter (read-only).
    QuerySnapshot {
        reply: oneshot::Sender<EncounterSnapshot>,
    },
    SetDisposition {
        id: CombatantId,
        disposition: Disposition,
        reply: oneshot::Sender<Result<()>>,
    },
    ConfirmDispositions {
        reply: oneshot::Sender<Result<CombatEndPayload>>,
    },
}

/// A paced step coming back from its delay.
enum Paced {
    Commit(ResolutionTicket),
    Finish(ResolutionTicket),
}

/// Background task that runs one encounter to hand-off.
pub struct EncounterWorker {
    encounter: Encounter,
    dice: Box<dyn Dice + Send>,
    command_rx: mpsc::Receiver<Command>,
    paced_tx: mpsc::UnboundedSender<Paced>,
    paced_rx: mpsc::UnboundedReceiver<Paced>,
    event_bus: EventBus,
    payload_tx: Option<oneshot::Sender<CombatEndPayload>>,
    /// Number of log entries already published.
    published: usize,
    handed_off: bool,
}

impl EncounterWorker {
    /// Creates a new encounter worker.
    pub fn new(
        encounter: Encounter,
        dice: Box<dyn Dice + Send>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        payload_tx: oneshot::Sender<CombatEndPayload>,
    ) -> Self {
        info!(
            target: "runtime::worker",
            combatants = encounter.roster().len(),
            opponents = ?encounter.opponent_ids(),
            "EncounterWorker initialized"
        );

        let (paced_tx, paced_rx) = mpsc::unbounded_channel();
        Self {
            encounter,
            dice,
            command_rx,
            paced_tx,
            paced_rx,
            event_bus,
            payload_tx: Some(payload_tx),
            published: 0,
            handed_off: false,
        }
    }

    /// Main worker loop. Returns after the payload is handed off or every
    /// handle is dropped.
    pub async fn run(mut self) {
        let period = self.encounter.config().tick_interval().max(Duration::from_millis(1));
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !self.handed_off {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => {
                        debug!(target: "runtime::worker", "All handles dropped, stopping");
                        break;
                    }
                },
                Some(step) = self.paced_rx.recv() => self.handle_paced(step),
                _ = ticker.tick() => self.handle_tick(),
            }
        }

        debug!(
            target: "runtime::worker",
            outcome = %self.encounter.outcome(),
            "EncounterWorker stopped"
        );
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start { reply } => {
                let started = self.encounter.start();
                if started {
                    info!(target: "runtime::worker", "Encounter started");
                }
                self.flush_log();
                if reply.send(started).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::SubmitAction { action, reply } => {
                let submission = self.handle_submission(action);
                if reply.send(submission).is_err() {
                    debug!("SubmitAction reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.encounter.snapshot()).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
            Command::SetDisposition {
                id,
                disposition,
                reply,
            } => {
                let result = self
                    .encounter
                    .set_disposition(&id, disposition)
                    .map_err(Into::into);
                if reply.send(result).is_err() {
                    debug!("SetDisposition reply channel closed (caller dropped)");
                }
            }
            Command::ConfirmDispositions { reply } => {
                let result = self.hand_off();
                if reply.send(result).is_err() {
                    debug!("ConfirmDispositions reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_tick(&mut self) {
        match self.encounter.tick() {
            TickResult::Idle | TickResult::Advanced => {}
            TickResult::TurnStarted(start) => self.begin_turn(start),
            TickResult::OutcomeReached(outcome) => self.on_outcome(outcome),
        }
    }

    fn begin_turn(&mut self, start: TurnStart) {
        debug!(
            target: "runtime::worker",
            actor = %start.actor,
            turn = start.turn,
            controller = ?start.controller,
            "Actor selected"
        );
        self.event_bus.publish(Event::Turn(TurnEvent::ActorSelected {
            actor: start.actor.clone(),
            turn: start.turn,
            controller: start.controller,
        }));

        match start.controller {
            Controller::Player => {
                self.event_bus.publish(Event::Turn(TurnEvent::AwaitingInput {
                    actor: start.actor,
                    snapshot: Box::new(self.encounter.snapshot()),
                }));
            }
            Controller::Ai => match self.encounter.plan_ai_turn(self.dice.as_mut()) {
                Some(AiPlan::Resolve(ticket)) => self.pace(ticket),
                Some(AiPlan::Skipped) => {
                    debug!(
                        target: "runtime::worker",
                        actor = %start.actor,
                        "No living target, turn skipped"
                    );
                }
                None => {}
            },
        }
    }

    fn handle_submission(&mut self, action: PlayerAction) -> Submission {
        let submission = self.encounter.submit(action, self.dice.as_mut());
        match &submission {
            Submission::Ignored => {
                debug!(target: "runtime::worker", "Player action outside decision window ignored");
            }
            Submission::Accepted(PlayerResolution::Resolve(ticket)) => self.pace(ticket.clone()),
            Submission::Accepted(PlayerResolution::Passed) => {
                debug!(target: "runtime::worker", "No living opponent to attack, turn passed");
            }
            Submission::Accepted(PlayerResolution::FleeFailed) => {
                debug!(target: "runtime::worker", "Flee attempt failed");
            }
            Submission::Accepted(PlayerResolution::Fled) => {
                self.on_outcome(CombatOutcome::Escaped);
            }
        }
        self.flush_log();
        submission
    }

    /// Highlights the actor and schedules the commit after one pacing delay.
    fn pace(&mut self, ticket: ResolutionTicket) {
        self.event_bus.publish(Event::Turn(TurnEvent::ActingChanged {
            acting: Some(ticket.source.clone()),
        }));
        self.schedule(Paced::Commit(ticket));
    }

    fn schedule(&self, step: Paced) {
        let delay = self.encounter.config().pacing_delay();
        let paced_tx = self.paced_tx.clone();
        tokio::spawn(async move {
            time::sleep(delay).await;
            // The worker may already be gone; the step is moot then.
            let _ = paced_tx.send(step);
        });
    }

    fn handle_paced(&mut self, step: Paced) {
        match step {
            Paced::Commit(ticket) => match self.encounter.commit(&ticket) {
                Ok(applied) => {
                    debug!(
                        target: "runtime::worker",
                        source = %applied.source,
                        target = %applied.target,
                        kind = %applied.kind,
                        amount = applied.amount,
                        target_hp = applied.target_hp,
                        "Effect applied"
                    );
                    let lifetime = self.encounter.config().vfx_duration();
                    self.event_bus
                        .publish(Event::Visual(VisualEvent::from_cue(applied.cue, lifetime)));
                    self.flush_log();
                    self.schedule(Paced::Finish(ticket));
                }
                Err(error) => self.discard(&ticket, &error),
            },
            Paced::Finish(ticket) => match self.encounter.finish(&ticket) {
                Ok(()) => {
                    self.event_bus
                        .publish(Event::Turn(TurnEvent::ActingChanged { acting: None }));
                }
                Err(error) => self.discard(&ticket, &error),
            },
        }
    }

    /// Drops a paced step the encounter refused. Stale steps are expected
    /// after an outcome; anything else points at a broken ticket.
    fn discard(&self, ticket: &ResolutionTicket, error: &impl CombatError) {
        let severity = error.severity();
        if severity.is_discardable() {
            warn!(
                target: "runtime::worker",
                source = %ticket.source,
                turn = ticket.turn,
                epoch = ticket.epoch.0,
                code = error.error_code(),
                "Discarding stale resolution"
            );
        } else {
            error!(
                target: "runtime::worker",
                source = %ticket.source,
                target_id = %ticket.target,
                turn = ticket.turn,
                code = error.error_code(),
                severity = severity.as_str(),
                %error,
                "Resolution rejected"
            );
        }
    }

    fn on_outcome(&mut self, outcome: CombatOutcome) {
        info!(target: "runtime::worker", %outcome, "Outcome reached");
        self.flush_log();
        self.event_bus
            .publish(Event::Turn(TurnEvent::ActingChanged { acting: None }));
        self.event_bus
            .publish(Event::Outcome(OutcomeEvent::OutcomeReached { outcome }));

        if outcome == CombatOutcome::Victory {
            let defeated = self
                .encounter
                .dispositions()
                .map(|sheet| sheet.defeated().to_vec())
                .unwrap_or_default();
            self.event_bus
                .publish(Event::Outcome(OutcomeEvent::DispositionsRequested { defeated }));
        } else if let Err(error) = self.hand_off() {
            warn!(target: "runtime::worker", %error, "Hand-off failed");
        }
    }

    /// Assembles the payload, delivers it, and stops the worker.
    fn hand_off(&mut self) -> Result<CombatEndPayload> {
        let payload = self.encounter.take_payload()?;
        info!(
            target: "runtime::worker",
            outcome = %payload.outcome,
            dispositions = payload.dispositions.len(),
            "Payload handed off"
        );

        if let Some(payload_tx) = self.payload_tx.take()
            && payload_tx.send(payload.clone()).is_err()
        {
            debug!("Payload receiver dropped");
        }
        self.event_bus
            .publish(Event::Outcome(OutcomeEvent::EncounterEnded {
                payload: Box::new(payload.clone()),
            }));
        self.handed_off = true;
        Ok(payload)
    }

    /// Publishes log entries appended since the last flush.
    fn flush_log(&mut self) {
        let log = self.encounter.log();
        for entry in log.since(self.published) {
            self.event_bus.publish(Event::Log(entry.clone()));
        }
        self.published = log.len();
    }
}
