//! In-memory store backend

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::traits::{EntityStore, Keyed, StoreResult};

/// In-memory table keyed by integer id
///
/// Rows live in a `BTreeMap` so `list` returns key order, matching the
/// natural order a relational store would give for a clustered integer key.
/// Ids are assigned monotonically and never reused within a process.
#[derive(Debug)]
pub struct MemTable<E> {
    inner: Arc<RwLock<Inner<E>>>,
}

#[derive(Debug)]
struct Inner<E> {
    rows: BTreeMap<i32, E>,
    next_id: i32,
}

impl<E> MemTable<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }
}

impl<E> Default for MemTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for MemTable<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> EntityStore<E> for MemTable<E>
where
    E: Keyed + Clone + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<E>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<E>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn insert(&self, mut entity: E) -> StoreResult<E> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        entity.set_id(id);
        inner.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn replace(&self, entity: E) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let id = entity.id();
        if !inner.rows.contains_key(&id) {
            return Ok(false);
        }
        inner.rows.insert(id, entity);
        Ok(true)
    }

    async fn remove(&self, id: i32) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.remove(&id).is_some())
    }

    async fn count(&self) -> StoreResult<u64> {
        let inner = self.inner.read().await;
        Ok(inner.rows.len() as u64)
    }

    async fn exists(&self, id: i32) -> StoreResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.rows.contains_key(&id))
    }
}
