//! # State Actor
//!
//! The receiving half: a task that owns one [`ActorState`] and processes commands one
//! at a time, so the state needs no locks.

use crate::client::StateClient;
use crate::error::FrameworkError;
use crate::message::Envelope;
use crate::state::ActorState;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns a state value and the receiving end of its command channel.
///
/// # Usage Pattern
///
/// 1. **Create**: [`StateActor::new`] returns the actor and its first client.
/// 2. **Wire**: pass the state's dependencies to [`StateActor::run`].
/// 3. **Run**: spawn `run` on the Tokio runtime and keep the client.
///
/// Commands are handled strictly in arrival order. A failing command is answered
/// with [`FrameworkError::StateError`] and the loop carries on.
pub struct StateActor<T: ActorState> {
    receiver: mpsc::Receiver<Envelope<T>>,
    state: T,
}

impl<T: ActorState> StateActor<T> {
    /// Creates an actor around `state` with a channel of `buffer_size` slots.
    ///
    /// When the channel is full, senders wait for space.
    pub fn new(state: T, buffer_size: usize) -> (Self, StateClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, state };
        (actor, StateClient::new(sender))
    }

    /// Runs the receive loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        // "SearchHistory" rather than "storefront::history::state::SearchHistory"
        let actor = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");

        if let Err(e) = self.state.on_start(&context).await {
            warn!(actor, error = %e, "on_start failed");
        }
        info!(actor, "Actor started");

        while let Some(Envelope {
            command,
            respond_to,
        }) = self.receiver.recv().await
        {
            debug!(actor, ?command, "Command");
            let result = self
                .state
                .handle(command, &context)
                .await
                .map_err(|e| FrameworkError::StateError(Box::new(e)));
            match &result {
                Ok(reply) => debug!(actor, ?reply, "Command ok"),
                Err(e) => warn!(actor, error = %e, "Command failed"),
            }
            // The caller may have given up waiting; nothing to do about it here.
            let _ = respond_to.send(result);
        }

        self.state.on_stop(&context).await;
        info!(actor, "Shutdown");
    }
}
