//! # Storefront Actor Runtime
//!
//! Small building blocks for giving a single piece of mutable state exactly one owner.
//!
//! The storefront keeps two kinds of state that outlive a single request: the search
//! history (backed by durable storage) and the response cache. Both are touched from
//! async code that may run concurrently, and both must stay internally consistent.
//! Instead of wrapping them in locks, each one lives inside a [`StateActor`] running in
//! its own Tokio task, and the rest of the program talks to it through a cloneable
//! [`StateClient`].
//!
//! ## Layers
//!
//! 1. **State** ([`ActorState`]) - the business logic: what commands exist, what they
//!    reply, and how they change the state.
//! 2. **Runtime** ([`StateActor`]) - the receive loop, sequential processing, tracing.
//! 3. **Interface** ([`StateClient`], [`ActorClient`]) - typed request/response over
//!    channels, and a trait that domain clients implement to map framework errors into
//!    their own error type.
//!
//! ## Example
//!
//! ```rust
//! use storefront_actor::{ActorState, StateActor};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! enum TallyCommand { Add(u32), Read }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("tally overflow")]
//! struct TallyError;
//!
//! struct Tally { total: u32 }
//!
//! #[async_trait]
//! impl ActorState for Tally {
//!     type Command = TallyCommand;
//!     type Reply = u32;
//!     type Context = ();
//!     type Error = TallyError;
//!
//!     async fn handle(&mut self, command: TallyCommand, _: &()) -> Result<u32, TallyError> {
//!         if let TallyCommand::Add(n) = command {
//!             self.total = self.total.checked_add(n).ok_or(TallyError)?;
//!         }
//!         Ok(self.total)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StateActor::new(Tally { total: 0 }, 8);
//!     tokio::spawn(actor.run(()));
//!
//!     client.send(TallyCommand::Add(3)).await.unwrap();
//!     assert_eq!(client.send(TallyCommand::Read).await.unwrap(), 3);
//! }
//! ```
//!
//! ## Shutdown
//!
//! An actor stops when every [`StateClient`] for it has been dropped: the receive loop
//! sees the channel close, calls [`ActorState::on_stop`], and the task finishes.
//!
//! ## Testing
//!
//! See the [`mock`] module for a client whose replies are scripted in advance.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;

pub use actor::StateActor;
pub use client::StateClient;
pub use client_trait::ActorClient;
pub use error::FrameworkError;
pub use message::{Envelope, Response};
pub use state::ActorState;
