//! Data models for the boundary engine.

mod coordinate;
mod polygon;
mod unit;

pub use coordinate::Coordinate;
pub use polygon::{BoundingBox, Polygon, Ring};
pub use unit::{AreaUnit, UnitTable};
