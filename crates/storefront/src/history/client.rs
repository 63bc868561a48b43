//! # History Client
//!
//! Typed access to the [`SearchHistory`] actor.

use async_trait::async_trait;
use storefront_actor::{ActorClient, FrameworkError, StateClient};
use tracing::instrument;

use super::{HistoryCommand, HistoryError, SearchHistory};

#[derive(Clone)]
pub struct HistoryClient {
    inner: StateClient<SearchHistory>,
}

impl HistoryClient {
    pub fn new(inner: StateClient<SearchHistory>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<SearchHistory> for HistoryClient {
    type Error = HistoryError;

    fn inner(&self) -> &StateClient<SearchHistory> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        HistoryError::ActorCommunicationError(e.to_string())
    }
}

impl HistoryClient {
    /// The persisted history, most recent first.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Vec<String>, HistoryError> {
        self.call(HistoryCommand::Load).await
    }

    /// Records `term` and returns the updated history.
    #[instrument(skip(self))]
    pub async fn record(&self, term: &str) -> Result<Vec<String>, HistoryError> {
        self.call(HistoryCommand::Record(term.to_string())).await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), HistoryError> {
        self.call(HistoryCommand::Clear).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_actor::mock::{create_mock_client, expect_command, MockClient};

    #[tokio::test]
    async fn test_record_sends_term_and_returns_reply() {
        let (client, mut receiver) = create_mock_client::<SearchHistory>(10);
        let history = HistoryClient::new(client);

        let task = tokio::spawn(async move { history.record("gold ring").await });

        let (command, responder) = expect_command(&mut receiver)
            .await
            .expect("Expected Record command");
        assert_eq!(command, HistoryCommand::Record("gold ring".to_string()));
        responder
            .send(Ok(vec!["gold ring".to_string(), "bag".to_string()]))
            .unwrap();

        let entries = task.await.unwrap().unwrap();
        assert_eq!(entries, vec!["gold ring", "bag"]);
    }

    #[tokio::test]
    async fn test_clear_discards_reply() {
        let mock = MockClient::<SearchHistory>::new();
        mock.expect_command().return_ok(Vec::new());

        HistoryClient::new(mock.client()).clear().await.unwrap();

        mock.verify();
        assert_eq!(mock.received(), vec!["Clear"]);
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_communication_error() {
        let mock = MockClient::<SearchHistory>::new();
        mock.expect_command().return_err(FrameworkError::ActorClosed);

        let err = HistoryClient::new(mock.client()).load().await.unwrap_err();
        assert!(matches!(err, HistoryError::ActorCommunicationError(msg) if msg == "Actor closed"));
    }
}
