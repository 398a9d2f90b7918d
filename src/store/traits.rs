//! Store trait definitions
//!
//! [`EntityStore`] uses RPITIT (Return Position Impl Trait In Traits) for
//! async methods without `async_trait`, matching the shape a database-backed
//! repository would have: all suspension points sit at the store boundary.

use std::future::Future;

use super::error::StoreError;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// An entity addressable by a unique integer key
///
/// The key is immutable once assigned; `set_id` exists only so the store can
/// stamp a fresh id on insert and the update path can target an existing row.
pub trait Keyed {
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}

/// Narrow persistence contract used by the generic resource engine
///
/// # Type Parameters
///
/// - `E`: The entity type held by this store
///
/// Implementations must make each mutating operation atomic: it either fully
/// applies or leaves the store in its prior observable state.
pub trait EntityStore<E>: Send + Sync {
    /// Fetch an entity by id; `Ok(None)` on a miss
    fn find_by_id(&self, id: i32) -> impl Future<Output = StoreResult<Option<E>>> + Send;

    /// All entities in key order
    fn list(&self) -> impl Future<Output = StoreResult<Vec<E>>> + Send;

    /// Persist a new entity, assigning it the next free id
    ///
    /// Returns the stored entity with its id populated.
    fn insert(&self, entity: E) -> impl Future<Output = StoreResult<E>> + Send;

    /// Overwrite the row matching the entity's id
    ///
    /// Returns `false` (and writes nothing) when the id is absent.
    fn replace(&self, entity: E) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Remove by id; `false` when the id was absent
    fn remove(&self, id: i32) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Number of stored entities
    fn count(&self) -> impl Future<Output = StoreResult<u64>> + Send;

    /// Cheaper than `find_by_id` when only presence matters
    fn exists(&self, id: i32) -> impl Future<Output = StoreResult<bool>> + Send;
}
