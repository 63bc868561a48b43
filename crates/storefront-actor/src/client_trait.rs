//! # ActorClient Trait
//!
//! Shared plumbing for domain clients that wrap a [`StateClient`].
use crate::{ActorState, FrameworkError, StateClient};
use async_trait::async_trait;

/// Implemented by domain-specific clients around a [`StateClient`].
///
/// Implementors supply the inner client and an error mapping; [`ActorClient::call`]
/// then sends a command and returns the domain error type on failure.
///
/// # Example
///
/// ```rust
/// use storefront_actor::{ActorClient, ActorState, FrameworkError, StateClient};
/// use async_trait::async_trait;
///
/// struct Counter(u64);
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("counter error: {0}")]
/// struct CounterError(String);
///
/// #[async_trait]
/// impl ActorState for Counter {
///     type Command = ();
///     type Reply = u64;
///     type Context = ();
///     type Error = CounterError;
///     async fn handle(&mut self, _: (), _: &()) -> Result<u64, CounterError> {
///         self.0 += 1;
///         Ok(self.0)
///     }
/// }
///
/// struct CounterClient { inner: StateClient<Counter> }
///
/// #[async_trait]
/// impl ActorClient<Counter> for CounterClient {
///     type Error = CounterError;
///     fn inner(&self) -> &StateClient<Counter> { &self.inner }
///     fn map_error(e: FrameworkError) -> CounterError { CounterError(e.to_string()) }
/// }
///
/// async fn bump(client: &CounterClient) -> Result<u64, CounterError> {
///     client.call(()).await
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorState>: Send + Sync {
    /// The domain error type.
    type Error: Send;

    /// Access the inner generic client.
    fn inner(&self) -> &StateClient<T>;

    /// Map framework errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Send a command and map any failure.
    #[tracing::instrument(skip(self))]
    async fn call(&self, command: T::Command) -> Result<T::Reply, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().send(command).await.map_err(Self::map_error)
    }
}
