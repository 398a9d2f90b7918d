//! Movie resource
//!
//! Movies carry the richest surface in the catalog: genre links, an ordered
//! cast, the dynamic filter endpoint, and nested review routes. The
//! patchable surface is deliberately smaller than the create body; genre and
//! cast links only change through a full update.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::review;
use crate::error::ApiError;
use crate::extract::{Json, Query};
use crate::patch::PatchOp;
use crate::query::filter::MovieFilter;
use crate::query::page::{paginate, PageMeta, PageQuery};
use crate::resource::Resource;
use crate::responses::{Created, NoContent, Paged};
use crate::state::AppState;
use crate::store::{EntityStore, Keyed};
use crate::validate::{FieldRule, Validate};

pub const TITLE_MAX_LEN: usize = 300;

/// One actor in a movie's cast
///
/// `position` is assigned from the order cast entries arrive in the create
/// or update body, starting at 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastMember {
    pub actor_id: i32,
    pub character: String,
    pub position: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub showcasing: bool,
    pub premiere_date: NaiveDate,
    pub genre_ids: Vec<i32>,
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMemberDoc {
    pub actor_id: i32,
    pub character: String,
}

/// Create and full-update body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDoc {
    pub title: Option<String>,
    #[serde(default)]
    pub showcasing: bool,
    pub premiere_date: Option<NaiveDate>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
    #[serde(default)]
    pub cast: Vec<CastMemberDoc>,
}

/// Patchable surface: scheduling fields only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviePatchDoc {
    pub title: Option<String>,
    pub showcasing: Option<bool>,
    pub premiere_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRead {
    pub id: i32,
    pub title: String,
    pub showcasing: bool,
    pub premiere_date: NaiveDate,
    pub genre_ids: Vec<i32>,
    pub cast: Vec<CastMember>,
}

impl Validate for MovieDoc {
    fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[
            FieldRule::required("title"),
            FieldRule::max_len("title", TITLE_MAX_LEN),
            FieldRule::required("premiere_date"),
        ];
        RULES
    }
}

impl Validate for MoviePatchDoc {
    fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[
            FieldRule::required("title"),
            FieldRule::max_len("title", TITLE_MAX_LEN),
            FieldRule::required("premiere_date"),
        ];
        RULES
    }
}

impl Keyed for Movie {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl Resource for Movie {
    const NAME: &'static str = "Movie";
    const ROUTE: &'static str = "movies";

    type Create = MovieDoc;
    type Read = MovieRead;
    type Patch = MoviePatchDoc;

    fn from_create(dto: MovieDoc) -> Self {
        Self {
            id: 0,
            title: dto.title.unwrap_or_default(),
            showcasing: dto.showcasing,
            premiere_date: dto.premiere_date.unwrap_or_default(),
            genre_ids: dto.genre_ids,
            cast: order_cast(dto.cast),
        }
    }

    fn to_read(&self) -> MovieRead {
        MovieRead {
            id: self.id,
            title: self.title.clone(),
            showcasing: self.showcasing,
            premiere_date: self.premiere_date,
            genre_ids: self.genre_ids.clone(),
            cast: self.cast.clone(),
        }
    }

    fn to_patch(&self) -> MoviePatchDoc {
        MoviePatchDoc {
            title: Some(self.title.clone()),
            showcasing: Some(self.showcasing),
            premiere_date: Some(self.premiere_date),
        }
    }

    fn apply_patch(&mut self, dto: MoviePatchDoc) {
        self.title = dto.title.unwrap_or_default();
        self.showcasing = dto.showcasing.unwrap_or(false);
        if let Some(premiere_date) = dto.premiere_date {
            self.premiere_date = premiere_date;
        }
    }
}

/// Stamp cast positions from body order
fn order_cast(cast: Vec<CastMemberDoc>) -> Vec<CastMember> {
    cast.into_iter()
        .enumerate()
        .map(|(index, member)| CastMember {
            actor_id: member.actor_id,
            character: member.character,
            position: index as u32 + 1,
        })
        .collect()
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Paged<MovieRead>, ApiError> {
    let (data, meta) = state.movie_ops().list_page(&query).await?;
    Ok(Paged::new(data, meta))
}

async fn filter(
    State(state): State<AppState>,
    Query(filter): Query<MovieFilter>,
) -> Result<Paged<MovieRead>, ApiError> {
    let movies = state.movies.list().await?;
    let matched = filter.apply(movies, Utc::now().date_naive());

    let query = filter.page_query();
    let meta = PageMeta::for_query(&query, matched.len() as u64);
    let data = paginate(&matched, &query).iter().map(Movie::to_read).collect();
    Ok(Paged::new(data, meta))
}

async fn get_one(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
) -> Result<Json<MovieRead>, ApiError> {
    Ok(Json(state.movie_ops().get(movie_id).await?))
}

async fn create(
    State(state): State<AppState>,
    Json(dto): Json<MovieDoc>,
) -> Result<Created<MovieRead>, ApiError> {
    let (location, read) = state.movie_ops().create(dto).await?;
    Ok(Created::new(read).with_location(location))
}

async fn update(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
    Json(dto): Json<MovieDoc>,
) -> Result<Json<MovieRead>, ApiError> {
    Ok(Json(state.movie_ops().update(movie_id, dto).await?))
}

async fn patch_one(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
    Json(ops): Json<Vec<PatchOp>>,
) -> Result<Json<MovieRead>, ApiError> {
    Ok(Json(state.movie_ops().patch(movie_id, &ops).await?))
}

async fn delete_one(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
) -> Result<NoContent, ApiError> {
    state.movie_ops().delete(movie_id).await?;
    Ok(NoContent)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/filter", get(filter))
        .route(
            "/{movie_id}",
            get(get_one).put(update).patch(patch_one).delete(delete_one),
        )
        .nest("/{movie_id}/reviews", review::routes())
}
