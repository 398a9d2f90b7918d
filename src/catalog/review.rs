//! Review resource, nested under a movie
//!
//! Reviews never appear at the top level; every route is scoped to
//! `/api/movies/{movie_id}/reviews` and starts with an explicit guard that
//! the parent movie exists. Mutations require a bearer token; the token
//! subject becomes the review's author and gates later edits.

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::auth::Caller;
use crate::error::ApiError;
use crate::extract::{Json, Query};
use crate::query::page::{paginate, PageMeta, PageQuery};
use crate::responses::{NoContent, Paged};
use crate::state::AppState;
use crate::store::{EntityStore, Keyed};
use crate::validate::{validate, FieldRule, Validate};

pub const SCORE_MIN: i64 = 1;
pub const SCORE_MAX: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i32,
    pub movie_id: i32,
    pub user_id: String,
    pub score: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDoc {
    pub score: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewRead {
    pub id: i32,
    pub movie_id: i32,
    pub user_id: String,
    pub score: i32,
    pub comment: Option<String>,
}

impl Validate for ReviewDoc {
    fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[
            FieldRule::required("score"),
            FieldRule::range("score", SCORE_MIN, SCORE_MAX),
        ];
        RULES
    }
}

impl Keyed for Review {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl Review {
    fn to_read(&self) -> ReviewRead {
        ReviewRead {
            id: self.id,
            movie_id: self.movie_id,
            user_id: self.user_id.clone(),
            score: self.score,
            comment: self.comment.clone(),
        }
    }
}

/// Fetch a review and check it belongs to the movie in the path
///
/// A review reached through the wrong movie is indistinguishable from a
/// missing one.
async fn load_scoped(
    state: &AppState,
    movie_id: i32,
    review_id: i32,
) -> Result<Review, ApiError> {
    let review = state
        .reviews
        .find_by_id(review_id)
        .await?
        .filter(|r| r.movie_id == movie_id);
    review.ok_or(ApiError::not_found("Review", review_id))
}

/// Write back a previously loaded review
///
/// The review can vanish between lookup and write; a `false` from the store
/// means exactly that and maps to NotFound rather than a silent 204.
async fn store_review(state: &AppState, review: Review) -> Result<(), ApiError> {
    let review_id = review.id;
    if !state.reviews.replace(review).await? {
        return Err(ApiError::not_found("Review", review_id));
    }
    Ok(())
}

async fn discard_review(state: &AppState, review_id: i32) -> Result<(), ApiError> {
    if !state.reviews.remove(review_id).await? {
        return Err(ApiError::not_found("Review", review_id));
    }
    Ok(())
}

async fn list(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> Result<Paged<ReviewRead>, ApiError> {
    state.movie_ops().guard_exists(movie_id).await?;

    let mut reviews = state.reviews.list().await?;
    reviews.retain(|r| r.movie_id == movie_id);

    let meta = PageMeta::for_query(&query, reviews.len() as u64);
    let data = paginate(&reviews, &query).iter().map(Review::to_read).collect();
    Ok(Paged::new(data, meta))
}

async fn create(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
    caller: Caller,
    Json(dto): Json<ReviewDoc>,
) -> Result<NoContent, ApiError> {
    state.movie_ops().guard_exists(movie_id).await?;
    validate(&dto)?;

    let already_reviewed = state
        .reviews
        .list()
        .await?
        .iter()
        .any(|r| r.movie_id == movie_id && r.user_id == caller.subject);
    if already_reviewed {
        return Err(ApiError::Conflict(format!(
            "user has already reviewed movie {movie_id}"
        )));
    }

    let review = Review {
        id: 0,
        movie_id,
        user_id: caller.subject,
        score: dto.score.unwrap_or_default(),
        comment: dto.comment,
    };
    state.reviews.insert(review).await?;
    Ok(NoContent)
}

async fn update(
    State(state): State<AppState>,
    Path((movie_id, review_id)): Path<(i32, i32)>,
    caller: Caller,
    Json(dto): Json<ReviewDoc>,
) -> Result<NoContent, ApiError> {
    state.movie_ops().guard_exists(movie_id).await?;

    let mut review = load_scoped(&state, movie_id, review_id).await?;
    if review.user_id != caller.subject {
        return Err(ApiError::Forbidden);
    }
    validate(&dto)?;

    review.score = dto.score.unwrap_or_default();
    review.comment = dto.comment;
    store_review(&state, review).await?;
    Ok(NoContent)
}

async fn delete_one(
    State(state): State<AppState>,
    Path((movie_id, review_id)): Path<(i32, i32)>,
    caller: Caller,
) -> Result<NoContent, ApiError> {
    state.movie_ops().guard_exists(movie_id).await?;

    let review = load_scoped(&state, movie_id, review_id).await?;
    if review.user_id != caller.subject {
        return Err(ApiError::Forbidden);
    }
    discard_review(&state, review_id).await?;
    Ok(NoContent)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{review_id}", put(update).delete(delete_one))
}
