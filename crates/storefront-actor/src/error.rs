//! # Framework Errors
//!
//! Failures of the actor plumbing itself, as opposed to failures inside a state's
//! command handler (which travel as [`FrameworkError::StateError`]).

/// Errors that can occur while talking to a [`StateActor`](crate::StateActor).
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("State error: {0}")]
    StateError(Box<dyn std::error::Error + Send + Sync>),
}
