use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::{self, CachedCatalog};
use crate::catalog::{CatalogError, HttpCatalog, ProductRepository};
use crate::config::StorefrontConfig;
use crate::history::{self, HistoryClient, KeyValueStore};
use crate::query::CatalogQueryEngine;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// The running storefront: a cached repository plus the history actor.
pub struct StorefrontSystem<R = HttpCatalog> {
    catalog: CachedCatalog<R>,
    history: HistoryClient,
    /// Task handles for the cache and history actors.
    handles: Vec<JoinHandle<()>>,
}

impl StorefrontSystem<HttpCatalog> {
    /// Builds the HTTP repository and opens the on-disk history store from `config`.
    ///
    /// Only an unusable catalog URL fails startup. An unusable history directory
    /// leaves history in memory.
    pub async fn start(config: &StorefrontConfig) -> Result<Self, SystemError> {
        let repository = HttpCatalog::new(&config.catalog)?;
        let (history, history_handle) = history::spawn_with_file_store(&config.history).await;
        let (cache, cache_handle) = cache::spawn(&config.cache);

        info!(
            base_url = %repository.base_url(),
            history_dir = %config.history.dir.display(),
            "Storefront started"
        );

        Ok(Self {
            catalog: CachedCatalog::new(repository, cache),
            history,
            handles: vec![history_handle, cache_handle],
        })
    }
}

impl<R: ProductRepository + Clone> StorefrontSystem<R> {
    /// Wires an arbitrary repository and store. Must be called inside a Tokio runtime.
    pub fn assemble(
        repository: R,
        store: Arc<dyn KeyValueStore>,
        config: &StorefrontConfig,
    ) -> Self {
        let (history, history_handle) = history::spawn(store, &config.history);
        let (cache, cache_handle) = cache::spawn(&config.cache);
        Self {
            catalog: CachedCatalog::new(repository, cache),
            history,
            handles: vec![history_handle, cache_handle],
        }
    }

    pub fn catalog(&self) -> &CachedCatalog<R> {
        &self.catalog
    }

    pub fn history(&self) -> &HistoryClient {
        &self.history
    }

    /// A fresh engine sharing this system's cache and history.
    pub fn query_engine(&self) -> CatalogQueryEngine<CachedCatalog<R>> {
        CatalogQueryEngine::new(self.catalog.clone(), self.history.clone())
    }

    /// Drops the system's clients and waits for both actors to finish.
    ///
    /// Engines from [`StorefrontSystem::query_engine`] hold clients too; drop them
    /// first or this waits for them.
    pub async fn shutdown(self) {
        drop(self.catalog);
        drop(self.history);

        for handle in self.handles {
            let _ = handle.await;
        }
        info!("Storefront stopped");
    }
}
