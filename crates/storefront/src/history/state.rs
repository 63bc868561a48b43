//! # Search History State
//!
//! The most-recent-first list of past search terms, owned by one actor and mirrored
//! to a [`KeyValueStore`] as a JSON array of strings.
//!
//! Storage trouble never fails a command. A failed write is logged and the in-memory
//! list stays as it was, so memory and storage agree after every command.

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use storefront_actor::ActorState;
use tracing::{debug, warn};

use super::{KeyValueStore, StorageError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryCommand {
    /// Re-read the persisted list.
    Load,
    /// Put a term at the front.
    Record(String),
    /// Forget everything.
    Clear,
}

/// Bounded, de-duplicated search history.
#[derive(Debug, Clone)]
pub struct SearchHistory {
    entries: Vec<String>,
    capacity: usize,
    key: String,
}

impl SearchHistory {
    pub fn new(key: impl Into<String>, capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            key: key.into(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The list `term` would produce, without touching `self`.
    fn with_term(&self, term: &str) -> Vec<String> {
        std::iter::once(term.to_string())
            .chain(self.entries.iter().filter(|e| e.as_str() != term).cloned())
            .take(self.capacity)
            .collect()
    }

    /// Keeps the first occurrence of each term, up to capacity.
    fn normalized(&self, stored: Vec<String>) -> Vec<String> {
        let mut entries: Vec<String> = Vec::with_capacity(self.capacity.min(stored.len()));
        for term in stored {
            if entries.len() == self.capacity {
                break;
            }
            if !entries.contains(&term) {
                entries.push(term);
            }
        }
        entries
    }

    async fn load(&mut self, store: &dyn KeyValueStore) {
        let raw = match store.get(&self.key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read search history");
                return;
            }
        };

        self.entries = match raw {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(stored) => self.normalized(stored),
                Err(e) => {
                    warn!(key = %self.key, error = %e, "Ignoring corrupt search history");
                    Vec::new()
                }
            },
        };
        debug!(key = %self.key, count = self.entries.len(), "Loaded search history");
    }

    async fn record(&mut self, term: &str, store: &dyn KeyValueStore) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }

        let updated = self.with_term(term);
        let persisted = match serde_json::to_string(&updated) {
            Ok(json) => store.set(&self.key, &json).await,
            Err(e) => Err(StorageError::Encode(e.to_string())),
        };
        match persisted {
            Ok(()) => self.entries = updated,
            Err(e) => warn!(key = %self.key, error = %e, "Failed to save search history"),
        }
    }

    async fn clear(&mut self, store: &dyn KeyValueStore) {
        match store.remove(&self.key).await {
            Ok(()) => self.entries.clear(),
            Err(e) => warn!(key = %self.key, error = %e, "Failed to clear search history"),
        }
    }
}

#[async_trait]
impl ActorState for SearchHistory {
    type Command = HistoryCommand;
    type Reply = Vec<String>;
    type Context = Arc<dyn KeyValueStore>;
    type Error = Infallible;

    async fn on_start(&mut self, store: &Self::Context) -> Result<(), Self::Error> {
        self.load(store.as_ref()).await;
        Ok(())
    }

    async fn handle(
        &mut self,
        command: HistoryCommand,
        store: &Self::Context,
    ) -> Result<Vec<String>, Self::Error> {
        match command {
            HistoryCommand::Load => self.load(store.as_ref()).await,
            HistoryCommand::Record(term) => self.record(&term, store.as_ref()).await,
            HistoryCommand::Clear => self.clear(store.as_ref()).await,
        }
        Ok(self.entries.clone())
    }
}
