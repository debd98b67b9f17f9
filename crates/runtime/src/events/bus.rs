//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use encounter_core::CombatLogEntry;

use super::types::{OutcomeEvent, TurnEvent, VisualEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Combat log entries
    Log,
    /// Floating text cues
    Visual,
    /// Turn management events
    Turn,
    /// Outcome and hand-off events
    Outcome,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Log(CombatLogEntry),
    Visual(VisualEvent),
    Turn(TurnEvent),
    Outcome(OutcomeEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Log(_) => Topic::Log,
            Event::Visual(_) => Topic::Visual,
            Event::Turn(_) => Topic::Turn,
            Event::Outcome(_) => Topic::Outcome,
        }
    }
}

struct Channels {
    log: broadcast::Sender<Event>,
    visual: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
    outcome: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Log => &self.log,
            Topic::Visual => &self.visual,
            Topic::Turn => &self.turn,
            Topic::Outcome => &self.outcome,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                log: broadcast::channel(capacity).0,
                visual: broadcast::channel(capacity).0,
                turn: broadcast::channel(capacity).0,
                outcome: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_core::{CombatantId, SpeakerClass};

    fn entry(id: u64) -> Event {
        Event::Log(CombatLogEntry {
            id,
            text: format!("line {id}"),
            speaker: SpeakerClass::Info,
        })
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::with_capacity(4);
        bus.publish(entry(0));
    }

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut log_rx = bus.subscribe(Topic::Log);
        let mut turn_rx = bus.subscribe(Topic::Turn);

        bus.publish(Event::Turn(TurnEvent::ActingChanged {
            acting: Some(CombatantId::from("hero")),
        }));
        bus.publish(entry(7));

        match log_rx.recv().await.unwrap() {
            Event::Log(entry) => assert_eq!(entry.id, 7),
            other => panic!("unexpected event {other:?}"),
        }
        assert!(matches!(
            turn_rx.recv().await.unwrap(),
            Event::Turn(TurnEvent::ActingChanged { .. })
        ));
        assert!(log_rx.try_recv().is_err());
    }
}
