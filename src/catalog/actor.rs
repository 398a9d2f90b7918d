//! Actor resource

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::{Json, Query};
use crate::patch::PatchOp;
use crate::query::page::PageQuery;
use crate::resource::Resource;
use crate::responses::{Created, NoContent, Paged};
use crate::state::AppState;
use crate::store::Keyed;
use crate::validate::{FieldRule, Validate};

pub const NAME_MAX_LEN: usize = 120;

#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: i32,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
}

/// Create, full-update, and patch body for an actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorDoc {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActorRead {
    pub id: i32,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
}

impl Validate for ActorDoc {
    fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[
            FieldRule::required("name"),
            FieldRule::max_len("name", NAME_MAX_LEN),
        ];
        RULES
    }
}

impl Keyed for Actor {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl Resource for Actor {
    const NAME: &'static str = "Actor";
    const ROUTE: &'static str = "actors";

    type Create = ActorDoc;
    type Read = ActorRead;
    type Patch = ActorDoc;

    fn from_create(dto: ActorDoc) -> Self {
        Self {
            id: 0,
            name: dto.name.unwrap_or_default(),
            birth_date: dto.birth_date,
        }
    }

    fn to_read(&self) -> ActorRead {
        ActorRead {
            id: self.id,
            name: self.name.clone(),
            birth_date: self.birth_date,
        }
    }

    fn to_patch(&self) -> ActorDoc {
        ActorDoc {
            name: Some(self.name.clone()),
            birth_date: self.birth_date,
        }
    }

    fn apply_patch(&mut self, dto: ActorDoc) {
        self.name = dto.name.unwrap_or_default();
        self.birth_date = dto.birth_date;
    }
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Paged<ActorRead>, ApiError> {
    let (data, meta) = state.actor_ops().list_page(&query).await?;
    Ok(Paged::new(data, meta))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ActorRead>, ApiError> {
    Ok(Json(state.actor_ops().get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    Json(dto): Json<ActorDoc>,
) -> Result<Created<ActorRead>, ApiError> {
    let (location, read) = state.actor_ops().create(dto).await?;
    Ok(Created::new(read).with_location(location))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(dto): Json<ActorDoc>,
) -> Result<Json<ActorRead>, ApiError> {
    Ok(Json(state.actor_ops().update(id, dto).await?))
}

async fn patch_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(ops): Json<Vec<PatchOp>>,
) -> Result<Json<ActorRead>, ApiError> {
    Ok(Json(state.actor_ops().patch(id, &ops).await?))
}

async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<NoContent, ApiError> {
    state.actor_ops().delete(id).await?;
    Ok(NoContent)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route(
            "/{id}",
            get(get_one).put(update).patch(patch_one).delete(delete_one),
        )
}
