//! # Response Cache State
//!
//! Fetched catalog responses keyed by the request that produced them. Entries are fresh
//! for a fixed time to live. When full, storing a new key evicts the oldest entry.

use std::collections::HashMap;
use std::convert::Infallible;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use storefront_actor::ActorState;
use tracing::debug;

use crate::model::{Category, Product, ProductId, ProductList};

/// Identifies one repository request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Products { limit: Option<u32> },
    CategoryProducts {
        category: Category,
        limit: Option<u32>,
    },
    Product(ProductId),
    Categories,
}

impl QueryKey {
    /// A zero limit requests the same thing as no limit, so both share one entry.
    pub fn products(limit: Option<u32>) -> Self {
        QueryKey::Products {
            limit: limit.filter(|n| *n > 0),
        }
    }

    pub fn category_products(category: Category, limit: Option<u32>) -> Self {
        QueryKey::CategoryProducts {
            category,
            limit: limit.filter(|n| *n > 0),
        }
    }
}

/// A successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Products(ProductList),
    Product(Product),
    Categories(Vec<Category>),
}

#[derive(Debug)]
pub enum CacheCommand {
    Lookup(QueryKey),
    Store(QueryKey, CachedValue),
}

#[derive(Debug, PartialEq)]
pub enum CacheReply {
    Hit(CachedValue),
    Miss,
    Done,
}

#[derive(Debug)]
struct Entry {
    value: CachedValue,
    stored_at: Instant,
    /// Insertion order. `Instant`s taken back to back can compare equal.
    seq: u64,
}

#[derive(Debug)]
pub struct ResponseCache {
    entries: HashMap<QueryKey, Entry>,
    ttl: Duration,
    max_entries: usize,
    next_seq: u64,
}

impl ResponseCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            max_entries,
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&mut self, key: &QueryKey) -> Option<CachedValue> {
        let fresh = self
            .entries
            .get(key)
            .map(|entry| entry.stored_at.elapsed() < self.ttl)?;
        if !fresh {
            self.entries.remove(key);
            debug!(?key, "Expired");
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    fn store(&mut self, key: QueryKey, value: CachedValue) {
        if self.max_entries == 0 {
            return;
        }
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.seq)
                .map(|(key, _)| *key);
            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
                debug!(key = ?oldest, "Evicted");
            }
        }
        self.next_seq += 1;
        self.entries.insert(
            key,
            Entry {
                value,
                stored_at: Instant::now(),
                seq: self.next_seq,
            },
        );
    }
}

#[async_trait]
impl ActorState for ResponseCache {
    type Command = CacheCommand;
    type Reply = CacheReply;
    type Context = ();
    type Error = Infallible;

    async fn handle(&mut self, command: CacheCommand, _ctx: &()) -> Result<CacheReply, Infallible> {
        let reply = match command {
            CacheCommand::Lookup(key) => match self.lookup(&key) {
                Some(value) => CacheReply::Hit(value),
                None => CacheReply::Miss,
            },
            CacheCommand::Store(key, value) => {
                self.store(key, value);
                CacheReply::Done
            }
        };
        Ok(reply)
    }

    async fn on_stop(&mut self, _ctx: &()) {
        debug!(entries = self.entries.len(), "Dropping cached responses");
    }
}
