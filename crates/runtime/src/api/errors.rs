//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, initialization and the engine so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use encounter_core::{EngineError, InitializationError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("player action provider not set")]
    ProviderNotSet,

    #[error("encounter worker command channel closed")]
    CommandChannelClosed,

    #[error("encounter worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("encounter worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires an encounter request before building")]
    MissingRequest,

    #[error("runtime requires a roster pool before building")]
    MissingPool,

    #[error("failed to initialize encounter")]
    Initialization(#[from] InitializationError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("event stream for {0:?} closed before the encounter ended")]
    EventStreamClosed(crate::events::Topic),

    #[error("end payload was already taken from this runtime")]
    PayloadTaken,

    #[error("encounter worker stopped without handing off a payload")]
    PayloadDropped(#[source] oneshot::error::RecvError),
}
