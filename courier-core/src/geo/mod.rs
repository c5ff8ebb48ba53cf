//! Directed edges between geo-points and the matrices that hold them.
//!
//! The [`GeoDataProvider`] trait abstracts the external routing service. Callers
//! pass the order positions followed by the shop position and receive a square
//! [`GeoMatrix`] of [`GeoEdge`] values, one per ordered pair.
//!
//! Errors are returned when inputs are invalid or the matrix is incomplete.

mod cache;
mod edge;
mod error;
mod matrix;
mod provider;

pub use cache::CachingGeoProvider;
pub use edge::GeoEdge;
pub use error::GeoDataError;
pub use matrix::GeoMatrix;
pub use provider::{GeoDataProvider, haversine_distance_m};
