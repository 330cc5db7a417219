//! Unified error types surfaced by the runtime API.
//!
//! Wraps scheduler, combat and provider failures so clients can bubble them
//! up with consistent context.
use ironclad_core::{CombatError, EntityId, Position, SchedulerError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("actor {0} does not exist")]
    ActorNotFound(EntityId),

    #[error("actor {0} is already in the world")]
    DuplicateActor(EntityId),

    #[error("cannot place an actor at {position}")]
    SpawnBlocked { position: Position },

    #[error("no active actors available for turn scheduling")]
    NoActiveActors,

    #[error("player action provider not set")]
    ProviderNotSet,

    #[error("player input channel closed")]
    PlayerInputClosed,

    #[error("invalid action for {actor}: {reason}")]
    InvalidAction { actor: EntityId, reason: String },

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Combat(#[from] CombatError),
}

impl RuntimeError {
    pub fn invalid(actor: EntityId, reason: impl Into<String>) -> Self {
        RuntimeError::InvalidAction {
            actor,
            reason: reason.into(),
        }
    }
}
