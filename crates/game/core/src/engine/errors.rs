use crate::state::EntityId;

/// Errors that can occur during turn operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("actor {0} is not registered with the scheduler")]
    UnknownActor(EntityId),

    #[error("no actors are currently registered")]
    NoActiveActors,

    #[error("actor {0} is already registered")]
    AlreadyRegistered(EntityId),
}
