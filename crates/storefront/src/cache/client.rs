//! # Cache Client
//!
//! Typed access to the [`ResponseCache`] actor.

use async_trait::async_trait;
use storefront_actor::{ActorClient, FrameworkError, StateClient};
use thiserror::Error;
use tracing::instrument;

use super::{CacheCommand, CacheReply, CachedValue, QueryKey, ResponseCache};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CacheError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Clone)]
pub struct CacheClient {
    inner: StateClient<ResponseCache>,
}

impl CacheClient {
    pub fn new(inner: StateClient<ResponseCache>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<ResponseCache> for CacheClient {
    type Error = CacheError;

    fn inner(&self) -> &StateClient<ResponseCache> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CacheError::ActorCommunicationError(e.to_string())
    }
}

impl CacheClient {
    /// The fresh value stored under `key`, if any.
    #[instrument(skip(self))]
    pub async fn lookup(&self, key: QueryKey) -> Result<Option<CachedValue>, CacheError> {
        match self.call(CacheCommand::Lookup(key)).await? {
            CacheReply::Hit(value) => Ok(Some(value)),
            CacheReply::Miss | CacheReply::Done => Ok(None),
        }
    }

    #[instrument(skip(self, value))]
    pub async fn store(&self, key: QueryKey, value: CachedValue) -> Result<(), CacheError> {
        self.call(CacheCommand::Store(key, value)).await.map(|_| ())
    }
}
