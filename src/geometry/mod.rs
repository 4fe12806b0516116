//! Boundary geometry: validation, area, perimeter, and center point.
//!
//! All functions here are pure. They take validated [`Polygon`](crate::Polygon) values
//! (except [`validate`] and [`planar_area_m2`], which accept raw input) and never panic on
//! degenerate shapes.

mod area;
mod centroid;
mod validate;

pub use area::{
    DEGENERATE_AREA_M2, LocalProjection, area, area_m2, area_with, perimeter_m, planar_area_m2,
};
pub use centroid::{CentroidMethod, area_weighted_centroid, centroid, centroid_with};
pub use validate::{ClosePolicy, validate, validate_with};
