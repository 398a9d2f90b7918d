//! Catalog resources
//!
//! Each module supplies an entity, its DTO projections, validation rules,
//! and the axum handlers wiring them to the generic resource operations.

pub mod actor;
pub mod cinema;
pub mod genre;
pub mod movie;
pub mod review;
