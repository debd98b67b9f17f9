//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. Publishing never blocks and never fails; an event
//! with no subscriber is dropped.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{OutcomeEvent, TurnEvent, VisualEvent};
