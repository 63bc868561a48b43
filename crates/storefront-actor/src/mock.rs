//! # Mock Clients
//!
//! Test doubles for code that holds a [`StateClient`]. No real state runs behind a
//! mock: each reply is scripted in advance, in order.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | None, scripted replies | Real state transitions |
//! | **Error injection** | `return_err` | Needs a failing dependency |
//! | **Use case** | Logic *around* the client | The state itself, or the full system |
//!
//! ## Fluent API
//!
//! ```rust
//! use storefront_actor::mock::MockClient;
//! use storefront_actor::{ActorState, FrameworkError};
//! use async_trait::async_trait;
//!
//! struct Clock;
//! #[derive(Debug, thiserror::Error)] #[error("clock error")] struct ClockError;
//!
//! #[async_trait]
//! impl ActorState for Clock {
//!     type Command = &'static str;
//!     type Reply = u64;
//!     type Context = ();
//!     type Error = ClockError;
//!     async fn handle(&mut self, _: &'static str, _: &()) -> Result<u64, ClockError> { Ok(0) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockClient::<Clock>::new();
//!     mock.expect_command().return_ok(42);
//!     mock.expect_command().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.send("now").await.unwrap(), 42);
//!     assert!(matches!(client.send("now").await, Err(FrameworkError::ActorClosed)));
//!
//!     mock.verify();
//!     assert_eq!(mock.received(), vec!["\"now\"", "\"now\""]);
//! }
//! ```
//!
//! ## Channel-Level Helpers
//!
//! [`create_mock_client`] hands out the raw receiver instead, so a test can inspect
//! each [`Envelope`] with [`expect_command`] and answer it by hand, including answering
//! late or not at all.

use crate::client::StateClient;
use crate::error::FrameworkError;
use crate::message::{Envelope, Response};
use crate::state::ActorState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

type Script<T> = Arc<Mutex<VecDeque<Result<<T as ActorState>::Reply, FrameworkError>>>>;

/// A client whose replies come from a queue of expectations.
///
/// Each incoming command pops the next expectation. A command arriving with an empty
/// queue panics the background task, which the caller sees as
/// [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorState> {
    client: StateClient<T>,
    script: Script<T>,
    received: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorState> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorState> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<Envelope<T>>(100);
        let script: Script<T> = Arc::new(Mutex::new(VecDeque::new()));
        let received = Arc::new(Mutex::new(Vec::new()));
        let script_clone = script.clone();
        let received_clone = received.clone();

        let handle = tokio::spawn(async move {
            while let Some(Envelope {
                command,
                respond_to,
            }) = receiver.recv().await
            {
                received_clone.lock().unwrap().push(format!("{:?}", command));
                let next = script_clone.lock().unwrap().pop_front();
                match next {
                    Some(reply) => {
                        let _ = respond_to.send(reply);
                    }
                    None => panic!("Unexpected command: {:?}", command),
                }
            }
        });

        Self {
            client: StateClient::new(sender),
            script,
            received,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StateClient<T> {
        self.client.clone()
    }

    /// Queues the reply for the next command.
    pub fn expect_command(&self) -> CommandExpectationBuilder<T> {
        CommandExpectationBuilder {
            script: self.script.clone(),
        }
    }

    /// `Debug` renderings of every command received so far, in order.
    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }

    /// Panics if any queued expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.script.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder returned by [`MockClient::expect_command`].
pub struct CommandExpectationBuilder<T: ActorState> {
    script: Script<T>,
}

impl<T: ActorState> CommandExpectationBuilder<T> {
    /// Answer the command with `reply`.
    pub fn return_ok(self, reply: T::Reply) {
        self.script.lock().unwrap().push_back(Ok(reply));
    }

    /// Answer the command with `error`.
    pub fn return_err(self, error: FrameworkError) {
        self.script.lock().unwrap().push_back(Err(error));
    }
}

/// Creates a client plus the receiver its commands arrive on.
pub fn create_mock_client<T: ActorState>(
    buffer_size: usize,
) -> (StateClient<T>, mpsc::Receiver<Envelope<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StateClient::new(sender), receiver)
}

/// Waits for the next command on a mock receiver.
///
/// Returns `None` once every client has been dropped.
pub async fn expect_command<T: ActorState>(
    receiver: &mut mpsc::Receiver<Envelope<T>>,
) -> Option<(T::Command, Response<T::Reply>)> {
    receiver
        .recv()
        .await
        .map(|envelope| (envelope.command, envelope.respond_to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Debug, PartialEq)]
    enum ShelfCommand {
        Stock(String),
        Count,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Shelf error")]
    struct ShelfError;

    struct Shelf {
        items: Vec<String>,
    }

    #[async_trait]
    impl ActorState for Shelf {
        type Command = ShelfCommand;
        type Reply = usize;
        type Context = ();
        type Error = ShelfError;

        async fn handle(&mut self, command: ShelfCommand, _ctx: &()) -> Result<usize, ShelfError> {
            if let ShelfCommand::Stock(item) = command {
                self.items.push(item);
            }
            Ok(self.items.len())
        }
    }

    #[tokio::test]
    async fn test_channel_level_mock() {
        let (client, mut receiver) = create_mock_client::<Shelf>(10);

        let task =
            tokio::spawn(async move { client.send(ShelfCommand::Stock("lamp".into())).await });

        let (command, responder) = expect_command(&mut receiver)
            .await
            .expect("Expected a command");
        assert_eq!(command, ShelfCommand::Stock("lamp".into()));
        responder.send(Ok(7)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_fluent_mock_replies_in_order() {
        let mock = MockClient::<Shelf>::new();
        mock.expect_command().return_ok(1);
        mock.expect_command().return_ok(1);

        let client = mock.client();
        assert_eq!(client.send(ShelfCommand::Stock("mug".into())).await.unwrap(), 1);
        assert_eq!(client.send(ShelfCommand::Count).await.unwrap(), 1);

        mock.verify();
        assert_eq!(mock.received(), vec!["Stock(\"mug\")", "Count"]);
    }

    #[tokio::test]
    async fn test_unexpected_command_surfaces_as_dropped() {
        let mock = MockClient::<Shelf>::new();
        let result = mock.client().send(ShelfCommand::Count).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }

    #[tokio::test]
    #[should_panic(expected = "1 remaining")]
    async fn test_verify_reports_unmet_expectations() {
        let mock = MockClient::<Shelf>::new();
        mock.expect_command().return_ok(0);
        mock.verify();
    }
}
