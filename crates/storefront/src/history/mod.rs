//! # Search History
//!
//! Past search terms, persisted across runs. The [`SearchHistory`] state lives in its
//! own actor so that records and clears are applied one at a time.

pub mod client;
pub mod error;
pub mod state;
pub mod store;

pub use client::HistoryClient;
pub use error::HistoryError;
pub use state::{HistoryCommand, SearchHistory};
pub use store::{FileStore, KeyValueStore, MemoryStore, StorageError};

use std::sync::Arc;

use storefront_actor::StateActor;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::config::HistoryConfig;

/// Spawns the history actor over `store`. It loads the persisted list before taking
/// its first command.
pub fn spawn(
    store: Arc<dyn KeyValueStore>,
    config: &HistoryConfig,
) -> (HistoryClient, JoinHandle<()>) {
    let state = SearchHistory::new(config.key.clone(), config.capacity);
    let (actor, client) = StateActor::new(state, config.buffer_size);
    let handle = tokio::spawn(actor.run(store));
    (HistoryClient::new(client), handle)
}

/// Spawns the actor on a [`FileStore`] in the configured directory.
///
/// If the directory cannot be opened, history is kept in memory for this run so that
/// browsing and search still work.
pub async fn spawn_with_file_store(config: &HistoryConfig) -> (HistoryClient, JoinHandle<()>) {
    let store: Arc<dyn KeyValueStore> = match FileStore::create(&config.dir).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                dir = %config.dir.display(),
                error = %e,
                "Search history directory unavailable, history will not persist"
            );
            Arc::new(MemoryStore::new())
        }
    };
    spawn(store, config)
}
