//! # State Client
//!
//! The sending half of a [`StateActor`](crate::StateActor).

use crate::error::FrameworkError;
use crate::message::Envelope;
use crate::state::ActorState;
use tokio::sync::{mpsc, oneshot};

/// Typed handle for sending commands to a [`StateActor`](crate::StateActor).
///
/// Holds only a channel sender, so cloning is cheap and clones can be moved into
/// other tasks. The actor stops once every clone is dropped.
pub struct StateClient<T: ActorState> {
    sender: mpsc::Sender<Envelope<T>>,
}

impl<T: ActorState> Clone for StateClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorState> StateClient<T> {
    pub fn new(sender: mpsc::Sender<Envelope<T>>) -> Self {
        Self { sender }
    }

    /// Send a command and wait for the actor's reply.
    pub async fn send(&self, command: T::Command) -> Result<T::Reply, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(Envelope {
                command,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// True once the actor has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
