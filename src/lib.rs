//! # marquee
//!
//! Catalog-management API for movies, actors, genres, cinemas, and reviews.
//!
//! The interesting part of the crate is the generic query/mutation engine
//! shared by every resource endpoint:
//!
//! - [`query::page`] — page slicing with total-page metadata
//! - [`query::filter`] — dynamic filter/sort pipeline with safe degradation
//! - [`patch`] — partial-update documents applied to a validated DTO snapshot
//! - [`resource`] — generic create/read/update/delete operations
//!   parameterized over entity/DTO pairs
//!
//! Concrete resources live in [`catalog`] and only supply entities, DTO
//! projections, and validation rules; the engine does the rest.
//!
//! ## Example
//!
//! ```rust,no_run
//! use marquee::{config::Config, observability, routes, state::AppState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     observability::init_tracing(&config);
//!
//!     let state = AppState::new(config.clone());
//!     let app = routes::router(&config, state);
//!
//!     let listener =
//!         tokio::net::TcpListener::bind(("0.0.0.0", config.service.port)).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod observability;
pub mod patch;
pub mod query;
pub mod resource;
pub mod responses;
pub mod routes;
pub mod state;
pub mod store;
pub mod validate;
