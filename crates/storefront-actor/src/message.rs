//! # Messages
//!
//! What travels over the actor channel: a command plus the one-shot sender the actor
//! answers on.

use crate::error::FrameworkError;
use crate::state::ActorState;
use tokio::sync::oneshot;

/// One-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A command addressed to a [`StateActor`](crate::StateActor), with its reply slot.
#[derive(Debug)]
pub struct Envelope<T: ActorState> {
    pub command: T::Command,
    pub respond_to: Response<T::Reply>,
}
