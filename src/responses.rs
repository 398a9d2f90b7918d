//! HTTP response builders with correct status codes
//!
//! Success-path counterparts to the error types in [`crate::error`]:
//! 201 Created with a `Location` header, 204 No Content, and the paginated
//! list wrapper that carries total-page metadata both in the body and in the
//! `x-total-pages` response header.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::query::page::PageMeta;

/// Header carrying the total page count alongside any paginated payload.
pub const TOTAL_PAGES_HEADER: &str = "x-total-pages";

/// HTTP 201 Created response with an optional `Location` header
#[derive(Debug)]
pub struct Created<T> {
    data: T,
    location: Option<String>,
}

impl<T> Created<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            location: None,
        }
    }

    /// Point the `Location` header at the created resource
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::CREATED, Json(&self.data)).into_response();
        if let Some(location) = self.location {
            if let Ok(value) = HeaderValue::from_str(&location) {
                response.headers_mut().insert(header::LOCATION, value);
            }
        }
        response
    }
}

/// HTTP 204 No Content response
#[derive(Debug, Clone, Copy)]
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

/// Paginated list response
///
/// Serializes as `{ "data": [...], "pagination": {...} }` and additionally
/// exposes the total page count in the `x-total-pages` header so callers can
/// read it without parsing the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> Paged<T> {
    pub fn new(data: Vec<T>, pagination: PageMeta) -> Self {
        Self { data, pagination }
    }
}

impl<T: Serialize> IntoResponse for Paged<T> {
    fn into_response(self) -> Response {
        let total_pages = self.pagination.total_pages;
        let mut response = (StatusCode::OK, Json(&self)).into_response();
        if let Ok(value) = HeaderValue::from_str(&total_pages.to_string()) {
            response.headers_mut().insert(TOTAL_PAGES_HEADER, value);
        }
        response
    }
}
