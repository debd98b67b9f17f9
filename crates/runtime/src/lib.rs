//! Runtime orchestration for action-gauge combat encounters.
//!
//! This crate wires the pure rules of `encounter-core` to a clock: one worker
//! task owns the [`encounter_core::Encounter`], drives the scheduler tick,
//! paces resolutions, and hands off the end payload exactly once. Consumers
//! embed [`Runtime`] and interact through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus for presentation layers
//! - [`oracle`] adapts static content to the core's lookup traits
//! - `workers` keeps the encounter task internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;

mod workers;

pub use api::{ActionProvider, AttackActionProvider, Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, OutcomeEvent, Topic, TurnEvent, VisualEvent};
pub use oracle::RosterPoolImpl;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
