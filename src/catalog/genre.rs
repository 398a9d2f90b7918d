//! Genre resource
//!
//! Genres have no patch endpoint; the resource is small enough that a full
//! replace covers every update.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::{Json, Query};
use crate::query::page::PageQuery;
use crate::resource::Resource;
use crate::responses::{Created, NoContent, Paged};
use crate::state::AppState;
use crate::store::Keyed;
use crate::validate::{FieldRule, Validate};

pub const NAME_MAX_LEN: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreDoc {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreRead {
    pub id: i32,
    pub name: String,
}

impl Validate for GenreDoc {
    fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[
            FieldRule::required("name"),
            FieldRule::max_len("name", NAME_MAX_LEN),
        ];
        RULES
    }
}

impl Keyed for Genre {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl Resource for Genre {
    const NAME: &'static str = "Genre";
    const ROUTE: &'static str = "genres";

    type Create = GenreDoc;
    type Read = GenreRead;
    type Patch = GenreDoc;

    fn from_create(dto: GenreDoc) -> Self {
        Self {
            id: 0,
            name: dto.name.unwrap_or_default(),
        }
    }

    fn to_read(&self) -> GenreRead {
        GenreRead {
            id: self.id,
            name: self.name.clone(),
        }
    }

    fn to_patch(&self) -> GenreDoc {
        GenreDoc {
            name: Some(self.name.clone()),
        }
    }

    fn apply_patch(&mut self, dto: GenreDoc) {
        self.name = dto.name.unwrap_or_default();
    }
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Paged<GenreRead>, ApiError> {
    let (data, meta) = state.genre_ops().list_page(&query).await?;
    Ok(Paged::new(data, meta))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GenreRead>, ApiError> {
    Ok(Json(state.genre_ops().get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    Json(dto): Json<GenreDoc>,
) -> Result<Created<GenreRead>, ApiError> {
    let (location, read) = state.genre_ops().create(dto).await?;
    Ok(Created::new(read).with_location(location))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(dto): Json<GenreDoc>,
) -> Result<Json<GenreRead>, ApiError> {
    Ok(Json(state.genre_ops().update(id, dto).await?))
}

async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<NoContent, ApiError> {
    state.genre_ops().delete(id).await?;
    Ok(NoContent)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete_one))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;

    #[test]
    fn blank_name_is_rejected() {
        assert!(validate(&GenreDoc {
            name: Some("  ".to_string())
        })
        .is_err());
        assert!(validate(&GenreDoc { name: None }).is_err());
        assert!(validate(&GenreDoc {
            name: Some("Drama".to_string())
        })
        .is_ok());
    }

    #[test]
    fn name_length_is_capped_at_forty() {
        assert!(validate(&GenreDoc {
            name: Some("g".repeat(41))
        })
        .is_err());
    }
}
