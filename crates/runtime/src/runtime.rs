//! High-level runtime orchestrator.
//!
//! The runtime owns the encounter worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive an encounter.

use std::env;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use encounter_core::{
    CombatEndPayload, Dice, EncounterConfig, EncounterRequest, RngDice, RosterPool, initialize,
};

use crate::api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, OutcomeEvent, Topic, TurnEvent};
use crate::workers::{Command, EncounterWorker};

/// Runtime configuration shared across the orchestrator and the worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub encounter: EncounterConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed for the encounter's dice. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            encounter: EncounterConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            rng_seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ENCOUNTER_EVENT_BUFFER` - Per-topic event capacity (default: 100)
    /// - `ENCOUNTER_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `ENCOUNTER_RNG_SEED` - Fixed dice seed (default: unset)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("ENCOUNTER_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("ENCOUNTER_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }
        if let Some(seed) = read_env::<u64>("ENCOUNTER_RNG_SEED") {
            config.rng_seed = Some(seed);
        }

        config
    }

    pub fn with_encounter(mut self, encounter: EncounterConfig) -> Self {
        self.encounter = encounter;
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that orchestrates one encounter
///
/// Design: Runtime owns the worker and coordinates provider-driven play.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    player_provider: Option<Box<dyn ActionProvider>>,
    payload_rx: Option<oneshot::Receiver<CombatEndPayload>>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Resolves once with the end payload, however the encounter ended.
    pub async fn wait_for_payload(&mut self) -> Result<CombatEndPayload> {
        let payload_rx = self.payload_rx.take().ok_or(RuntimeError::PayloadTaken)?;
        payload_rx.await.map_err(RuntimeError::PayloadDropped)
    }

    /// Runs the encounter to hand-off using the player provider.
    ///
    /// Starts the scheduler, answers every input request and, after victory,
    /// the disposition request.
    pub async fn run(&mut self) -> Result<CombatEndPayload> {
        let provider = self
            .player_provider
            .as_deref()
            .ok_or(RuntimeError::ProviderNotSet)?;

        let mut turns = self.handle.subscribe(Topic::Turn);
        let mut outcomes = self.handle.subscribe(Topic::Outcome);
        self.handle.start().await?;

        let payload = loop {
            tokio::select! {
                event = turns.recv() => match event {
                    Ok(Event::Turn(TurnEvent::AwaitingInput { actor, snapshot })) => {
                        let action = provider.provide_action(&actor, &snapshot).await?;
                        debug!(target: "runtime::run", %actor, ?action, "Submitting action");
                        self.handle.submit_action(action).await?;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(
                            target: "runtime::run",
                            skipped,
                            "Turn events lagged, polling snapshot"
                        );
                        let snapshot = self.handle.snapshot().await?;
                        if let Some(actor) = snapshot.awaiting_input().cloned() {
                            let action = provider.provide_action(&actor, &snapshot).await?;
                            self.handle.submit_action(action).await?;
                        }
                    }
                    Err(RecvError::Closed) => {
                        return Err(RuntimeError::EventStreamClosed(Topic::Turn));
                    }
                },
                event = outcomes.recv() => match event {
                    Ok(Event::Outcome(OutcomeEvent::DispositionsRequested { defeated })) => {
                        for entity in &defeated {
                            let disposition = provider.choose_disposition(entity).await?;
                            self.handle.set_disposition(entity.id.clone(), disposition).await?;
                        }
                        break self.handle.confirm_dispositions().await?;
                    }
                    Ok(Event::Outcome(OutcomeEvent::EncounterEnded { payload })) => break *payload,
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(target: "runtime::run", skipped, "Outcome events lagged");
                    }
                    Err(RecvError::Closed) => {
                        return Err(RuntimeError::EventStreamClosed(Topic::Outcome));
                    }
                },
            }
        };

        // The payload was delivered through the events; the oneshot copy is redundant.
        self.payload_rx = None;
        info!(target: "runtime::run", outcome = %payload.outcome, "Encounter finished");
        Ok(payload)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker, which stops on hand-off or once every handle is
    /// dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    request: Option<EncounterRequest>,
    pool: Option<Arc<dyn RosterPool>>,
    player_provider: Option<Box<dyn ActionProvider>>,
    dice: Option<Box<dyn Dice + Send>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            request: None,
            pool: None,
            player_provider: None,
            dice: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Snapshot handed over by the narrative system (required)
    pub fn request(mut self, request: EncounterRequest) -> Self {
        self.request = Some(request);
        self
    }

    /// Character pool the request resolves against (required)
    pub fn pool(mut self, pool: impl RosterPool + 'static) -> Self {
        self.pool = Some(Arc::new(pool));
        self
    }

    /// Set player action provider (optional; required by [`Runtime::run`])
    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Replace the seeded RNG with custom dice
    pub fn dice(mut self, dice: impl Dice + Send + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    /// Build the runtime
    ///
    /// Initializes the encounter and spawns its worker in `loading`; call
    /// [`RuntimeHandle::start`] (or [`Runtime::run`]) to begin ticking.
    pub async fn build(self) -> Result<Runtime> {
        let request = self.request.ok_or(RuntimeError::MissingRequest)?;
        let pool = self.pool.ok_or(RuntimeError::MissingPool)?;

        let encounter = initialize(&request, pool.as_ref(), self.config.encounter.clone())?;
        if let Some(report) = encounter.recovery() {
            warn!(
                target: "runtime::init",
                requested = ?report.requested,
                ghost = %report.ghost_id,
                "Opponents could not be resolved, projected a ghost"
            );
        }

        let dice = self.dice.unwrap_or_else(|| {
            let rng = match self.config.rng_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Box::new(RngDice(rng)) as Box<dyn Dice + Send>
        });

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (payload_tx, payload_rx) = oneshot::channel();
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = EncounterWorker::new(encounter, dice, command_rx, event_bus, payload_tx);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            player_provider: self.player_provider,
            payload_rx: Some(payload_rx),
            worker_handle,
        })
    }
}
