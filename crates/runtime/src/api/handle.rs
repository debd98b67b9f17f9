//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the encounter or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use encounter_core::{
    CombatEndPayload, CombatantId, Disposition, EncounterSnapshot, PlayerAction, Submission,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Starts the scheduler (`loading → ticking`).
    ///
    /// Returns false if the encounter was already started.
    pub async fn start(&self) -> Result<bool> {
        self.request(|reply| Command::Start { reply }).await
    }

    /// Submits the protagonist's action.
    ///
    /// Input outside the player's decision window is ignored, never an error.
    pub async fn submit_action(&self, action: PlayerAction) -> Result<Submission> {
        self.request(|reply| Command::SubmitAction { action, reply }).await
    }

    /// Read-only snapshot of the encounter.
    pub async fn snapshot(&self) -> Result<EncounterSnapshot> {
        self.request(|reply| Command::QuerySnapshot { reply }).await
    }

    /// Overrides the disposition of one defeated opponent (victory only).
    pub async fn set_disposition(&self, id: CombatantId, disposition: Disposition) -> Result<()> {
        self.request(|reply| Command::SetDisposition {
            id,
            disposition,
            reply,
        })
        .await?
    }

    /// Confirms the dispositions and receives the end payload.
    pub async fn confirm_dispositions(&self) -> Result<CombatEndPayload> {
        self.request(|reply| Command::ConfirmDispositions { reply }).await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Log` - Combat log entries as they are appended
    /// - `Topic::Visual` - Floating damage/heal text
    /// - `Topic::Turn` - Actor selection, input requests, acting highlight
    /// - `Topic::Outcome` - Outcome, disposition request, payload hand-off
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
