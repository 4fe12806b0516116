//! Unit tests for boundary formats.
//!
//! These tests cover GeoJSON parsing, the persisted record shape, and KML export/import.


use crate::model::{Polygon, Ring};
use crate::validate;

/// A 0.001° square near Bengaluru.
fn sample_polygon() -> Polygon {
    validate(&Ring::from_lon_lat(&[
        (77.0000, 12.0000),
        (77.0000, 12.0010),
        (77.0010, 12.0010),
        (77.0010, 12.0000),
    ]))
    .unwrap()
}
