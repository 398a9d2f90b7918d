//! Cinema resource and proximity search

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
use crate::store::{EntityStore, Keyed};
use crate::validate::{check, FieldRule, Validate};

pub const NAME_MAX_LEN: usize = 120;

/// Default search radius in kilometers
pub const DEFAULT_DISTANCE_KM: f64 = 10.0;

/// Maximum search radius in kilometers
pub const MAX_DISTANCE_KM: f64 = 50.0;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Cinema {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CinemaDoc {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CinemaRead {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Query parameters for the proximity search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance_km: Option<f64>,
}

impl NearQuery {
    /// Effective radius in meters, defaulted and capped
    fn radius_m(&self) -> f64 {
        self.distance_km
            .unwrap_or(DEFAULT_DISTANCE_KM)
            .clamp(0.0, MAX_DISTANCE_KM)
            * 1000.0
    }
}

/// One cinema within the search radius
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearbyCinema {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the query point, rounded to whole meters
    pub distance_m: u64,
}

impl Validate for CinemaDoc {
    fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[
            FieldRule::required("name"),
            FieldRule::max_len("name", NAME_MAX_LEN),
            FieldRule::required("latitude"),
            FieldRule::range_f("latitude", -90.0, 90.0),
            FieldRule::required("longitude"),
            FieldRule::range_f("longitude", -180.0, 180.0),
        ];
        RULES
    }
}

impl Validate for NearQuery {
    fn rules() -> &'static [FieldRule] {
        const RULES: &[FieldRule] = &[
            FieldRule::required("latitude"),
            FieldRule::range_f("latitude", -90.0, 90.0),
            FieldRule::required("longitude"),
            FieldRule::range_f("longitude", -180.0, 180.0),
        ];
        RULES
    }
}

impl Keyed for Cinema {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl Resource for Cinema {
    const NAME: &'static str = "Cinema";
    const ROUTE: &'static str = "cinemas";

    type Create = CinemaDoc;
    type Read = CinemaRead;
    type Patch = CinemaDoc;

    fn from_create(dto: CinemaDoc) -> Self {
        Self {
            id: 0,
            name: dto.name.unwrap_or_default(),
            latitude: dto.latitude.unwrap_or_default(),
            longitude: dto.longitude.unwrap_or_default(),
        }
    }

    fn to_read(&self) -> CinemaRead {
        CinemaRead {
            id: self.id,
            name: self.name.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    fn to_patch(&self) -> CinemaDoc {
        CinemaDoc {
            name: Some(self.name.clone()),
            latitude: Some(self.latitude),
            longitude: Some(self.longitude),
        }
    }

    fn apply_patch(&mut self, dto: CinemaDoc) {
        self.name = dto.name.unwrap_or_default();
        self.latitude = dto.latitude.unwrap_or_default();
        self.longitude = dto.longitude.unwrap_or_default();
    }
}

/// Great-circle distance in meters between two coordinates
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Paged<CinemaRead>, ApiError> {
    let (data, meta) = state.cinema_ops().list_page(&query).await?;
    Ok(Paged::new(data, meta))
}

async fn near(
    State(state): State<AppState>,
    Query(query): Query<NearQuery>,
) -> Result<Json<Vec<NearbyCinema>>, ApiError> {
    let doc = serde_json::to_value(&query)
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;
    let violations = check(NearQuery::rules(), &doc);
    if !violations.is_empty() {
        return Err(ApiError::Validation(violations));
    }

    let latitude = query.latitude.unwrap_or_default();
    let longitude = query.longitude.unwrap_or_default();
    let radius_m = query.radius_m();

    let mut nearby: Vec<NearbyCinema> = state
        .cinemas
        .list()
        .await?
        .into_iter()
        .filter_map(|cinema| {
            let distance = haversine_m(latitude, longitude, cinema.latitude, cinema.longitude);
            (distance <= radius_m).then(|| NearbyCinema {
                id: cinema.id,
                name: cinema.name,
                latitude: cinema.latitude,
                longitude: cinema.longitude,
                distance_m: distance.round() as u64,
            })
        })
        .collect();

    nearby.sort_by_key(|c| c.distance_m);
    Ok(Json(nearby))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CinemaRead>, ApiError> {
    Ok(Json(state.cinema_ops().get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    Json(dto): Json<CinemaDoc>,
) -> Result<Created<CinemaRead>, ApiError> {
    let (location, read) = state.cinema_ops().create(dto).await?;
    Ok(Created::new(read).with_location(location))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(dto): Json<CinemaDoc>,
) -> Result<Json<CinemaRead>, ApiError> {
    Ok(Json(state.cinema_ops().update(id, dto).await?))
}

async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<NoContent, ApiError> {
    state.cinema_ops().delete(id).await?;
    Ok(NoContent)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/near", get(near))
        .route("/{id}", get(get_one).put(update).delete(delete_one))
}
