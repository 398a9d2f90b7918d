//! Generic resource operations
//!
//! [`ResourceOps`] implements the lookup/validate/mutate/project pipeline
//! once, parameterized over an entity and its DTO projections. Concrete
//! resources only declare their entity, DTOs, and the conversions between
//! them; handlers stay thin adapters from HTTP to these operations.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::patch::{self, PatchOp};
use crate::query::page::{paginate, PageMeta, PageQuery};
use crate::store::{EntityStore, Keyed};
use crate::validate::{validate, Validate};

/// An entity wired into the generic operations
///
/// `Create` doubles as the whole-resource replacement body: a full update
/// goes through the same DTO and validation as a create. `Patch` is the
/// snapshot shape partial updates are applied to.
pub trait Resource: Keyed + Clone + Send + Sync + 'static {
    /// Entity name used in not-found messages
    const NAME: &'static str;
    /// URL collection segment, e.g. `movies`
    const ROUTE: &'static str;

    type Create: Validate + Serialize + DeserializeOwned + Send;
    type Read: Serialize + Send;
    type Patch: Validate + Serialize + DeserializeOwned + Send;

    fn from_create(dto: Self::Create) -> Self;
    fn to_read(&self) -> Self::Read;
    fn to_patch(&self) -> Self::Patch;

    /// Merge a patched snapshot back into the entity
    ///
    /// Fields absent from the patch shape keep their current value.
    fn apply_patch(&mut self, dto: Self::Patch);
}

/// Create/read/update/delete pipeline over one entity store
#[derive(Debug, Clone)]
pub struct ResourceOps<E, S> {
    store: S,
    _entity: std::marker::PhantomData<fn() -> E>,
}

impl<E, S> ResourceOps<E, S>
where
    E: Resource,
    S: EntityStore<E>,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            _entity: std::marker::PhantomData,
        }
    }

    /// Validate and persist a new resource
    ///
    /// Returns the canonical location of the created resource along with its
    /// read projection.
    pub async fn create(&self, dto: E::Create) -> Result<(String, E::Read), ApiError> {
        validate(&dto)?;
        let stored = self.store.insert(E::from_create(dto)).await?;
        let location = format!("/api/{}/{}", E::ROUTE, stored.id());
        Ok((location, stored.to_read()))
    }

    /// Fetch the read projection of one resource
    pub async fn get(&self, id: i32) -> Result<E::Read, ApiError> {
        Ok(self.load(id).await?.to_read())
    }

    /// Fetch the entity itself, for operations that need more than the
    /// read projection
    pub async fn load(&self, id: i32) -> Result<E, ApiError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ApiError::not_found(E::NAME, id))
    }

    /// All resources in key order
    pub async fn list(&self) -> Result<Vec<E::Read>, ApiError> {
        let rows = self.store.list().await?;
        Ok(rows.iter().map(E::to_read).collect())
    }

    /// One page of resources plus pagination metadata
    pub async fn list_page(
        &self,
        query: &PageQuery,
    ) -> Result<(Vec<E::Read>, PageMeta), ApiError> {
        let rows = self.store.list().await?;
        let meta = PageMeta::for_query(query, rows.len() as u64);
        let page = paginate(&rows, query).iter().map(E::to_read).collect();
        Ok((page, meta))
    }

    /// Replace the whole resource with a validated full document
    ///
    /// Every field takes the value from the body; unspecified optional
    /// fields reset to their defaults. Partial intent belongs to [`patch`].
    ///
    /// [`patch`]: ResourceOps::patch
    pub async fn update(&self, id: i32, dto: E::Create) -> Result<E::Read, ApiError> {
        validate(&dto)?;
        let mut entity = E::from_create(dto);
        entity.set_id(id);
        let read = entity.to_read();
        if !self.store.replace(entity).await? {
            return Err(ApiError::not_found(E::NAME, id));
        }
        Ok(read)
    }

    /// Apply a patch document to one resource
    ///
    /// Lookup, merge and validation all happen against a snapshot; the store
    /// is only written once the whole document has been accepted.
    pub async fn patch(&self, id: i32, ops: &[PatchOp]) -> Result<E::Read, ApiError> {
        let mut entity = self.load(id).await?;
        let merged = patch::apply(&entity.to_patch(), ops).map_err(ApiError::Validation)?;
        validate(&merged)?;
        entity.apply_patch(merged);
        let read = entity.to_read();
        if !self.store.replace(entity).await? {
            return Err(ApiError::not_found(E::NAME, id));
        }
        Ok(read)
    }

    /// Delete one resource
    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        if !self.store.remove(id).await? {
            return Err(ApiError::not_found(E::NAME, id));
        }
        Ok(())
    }

    /// Guard that a resource id exists before descending into sub-resources
    pub async fn guard_exists(&self, id: i32) -> Result<(), ApiError> {
        if !self.store.exists(id).await? {
            return Err(ApiError::not_found(E::NAME, id));
        }
        Ok(())
    }
}
