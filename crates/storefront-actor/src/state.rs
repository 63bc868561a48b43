//! # ActorState Trait
//!
//! The contract for anything owned by a [`StateActor`](crate::StateActor).
//!
//! A state declares the commands it accepts, the reply every command produces, the
//! context injected when the actor starts, and its error type. The runtime guarantees
//! that `handle` is never called concurrently, so implementations mutate `self` freely.

use async_trait::async_trait;
use std::fmt::Debug;

/// State that can be owned and driven by a [`StateActor`](crate::StateActor).
///
/// # Context
/// Dependencies (a storage backend, another client) are passed to
/// [`StateActor::run`](crate::StateActor::run) rather than to the constructor, and
/// handed to every hook by reference.
///
/// # Hooks
/// [`ActorState::on_start`] and [`ActorState::on_stop`] have empty defaults.
#[async_trait]
pub trait ActorState: Send + 'static {
    /// The requests this state understands.
    type Command: Send + Debug;

    /// What every command answers with.
    type Reply: Send + Debug;

    /// Runtime dependencies injected into every hook. Use `()` for none.
    type Context: Send + Sync;

    /// Failure type for command handling.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called once before the first command is processed.
    ///
    /// A failure is logged and the actor keeps running with whatever state it has.
    async fn on_start(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle one command.
    async fn handle(
        &mut self,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<Self::Reply, Self::Error>;

    /// Called after the last client is dropped, before the task exits.
    async fn on_stop(&mut self, _ctx: &Self::Context) {}
}
