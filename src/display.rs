//! Unit conversion and human-readable rendering of areas and coordinates.
//!
//! Formatting is locale-free: `.` is always the decimal separator and no digit grouping is
//! applied.

use crate::constants::{DEFAULT_AREA_DECIMALS, DEFAULT_COORDINATE_DECIMALS};
use crate::model::{AreaUnit, Coordinate, UnitTable};

/// Convert an area between units using the standard unit table.
///
/// `convert(convert(x, a, b), b, a)` returns `x` within floating point tolerance.
pub fn convert(value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
    UnitTable::standard().convert(value, from, to)
}

/// Render an area with two decimals, e.g. `12.35`.
pub fn format_area(value: f64) -> String {
    format_area_with(value, DEFAULT_AREA_DECIMALS)
}

/// Render an area with `decimals` decimals.
pub fn format_area_with(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, normalize_zero(value, decimals))
}

/// Render an area followed by its unit symbol, e.g. `12.35 ha`.
pub fn format_area_labeled(value: f64, unit: AreaUnit, decimals: usize) -> String {
    format!("{} {}", format_area_with(value, decimals), unit.symbol())
}

/// Render a position as `"12.3456° N, 77.6543° E"`.
pub fn format_coordinates(lat: f64, lon: f64) -> String {
    format_coordinates_with(lat, lon, DEFAULT_COORDINATE_DECIMALS)
}

/// Render a position with `decimals` decimals per component.
///
/// Negative latitudes are south and negative longitudes are west.
pub fn format_coordinates_with(lat: f64, lon: f64, decimals: usize) -> String {
    let lat = normalize_zero(lat, decimals);
    let lon = normalize_zero(lon, decimals);
    let ns = if lat < 0.0 { 'S' } else { 'N' };
    let ew = if lon < 0.0 { 'W' } else { 'E' };
    format!(
        "{:.*}° {}, {:.*}° {}",
        decimals,
        lat.abs(),
        ns,
        decimals,
        lon.abs(),
        ew
    )
}

/// Render a [`Coordinate`] with the default precision.
pub fn format_coordinate(coord: &Coordinate) -> String {
    format_coordinates(coord.lat, coord.lon)
}

/// Map values that round to zero onto `+0.0` so they never render as `-0.00`.
fn normalize_zero(value: f64, decimals: usize) -> f64 {
    let half_step = 0.5 * 10f64.powi(-(decimals as i32));
    if value.abs() < half_step { 0.0 } else { value }
}
