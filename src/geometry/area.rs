//! Surface area and perimeter of a boundary.
//!
//! Area uses a local planar projection around the polygon: one degree of latitude is
//! [`METERS_PER_DEG_LAT`] meters and one degree of longitude is
//! [`METERS_PER_DEG_LON_EQUATOR`] scaled by the cosine of the mean latitude. The shoelace
//! formula is then applied in meters.
//!
//! The approximation is good for farm parcels from under a hectare up to a few hundred
//! hectares. It degrades for polygons that span a large range of latitude, sit close to a
//! pole, or cross the antimeridian.

use crate::constants::{METERS_PER_DEG_LAT, METERS_PER_DEG_LON_EQUATOR};
use crate::model::{AreaUnit, Coordinate, Polygon, UnitTable};

/// Areas below this many square meters are reported as exactly zero.
pub const DEGENERATE_AREA_M2: f64 = 1.0e-6;

/// Equirectangular projection anchored at a polygon's first vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalProjection {
    origin: Coordinate,
    meters_per_deg_lon: f64,
    meters_per_deg_lat: f64,
}

impl LocalProjection {
    /// Build a projection for the given vertices, or `None` if there are none.
    ///
    /// A closing duplicate is skipped when computing the mean latitude so the first vertex
    /// is not counted twice.
    pub fn for_vertices(coords: &[Coordinate]) -> Option<Self> {
        let open = open_vertices(coords);
        let origin = *open.first()?;
        let mean_lat = open.iter().map(|c| c.lat).sum::<f64>() / open.len() as f64;

        Some(Self {
            origin,
            meters_per_deg_lon: METERS_PER_DEG_LON_EQUATOR * mean_lat.to_radians().cos(),
            meters_per_deg_lat: METERS_PER_DEG_LAT,
        })
    }

    /// Meters east and north of the origin.
    pub fn project(&self, c: &Coordinate) -> (f64, f64) {
        (
            (c.lon - self.origin.lon) * self.meters_per_deg_lon,
            (c.lat - self.origin.lat) * self.meters_per_deg_lat,
        )
    }

    /// Inverse of [`project`](Self::project).
    ///
    /// At the poles the longitude scale is zero and the origin longitude is returned.
    pub fn unproject(&self, x: f64, y: f64) -> Coordinate {
        let lon = if self.meters_per_deg_lon.abs() > f64::EPSILON {
            self.origin.lon + x / self.meters_per_deg_lon
        } else {
            self.origin.lon
        };
        Coordinate::new(lon, self.origin.lat + y / self.meters_per_deg_lat)
    }
}

/// Planar area in square meters of an arbitrary vertex list.
///
/// Works on raw, unvalidated input: an empty list, or one whose vertices all coincide,
/// has area zero. A closing duplicate is optional.
pub fn planar_area_m2(coords: &[Coordinate]) -> f64 {
    let open = open_vertices(coords);
    if open.len() < 3 {
        return 0.0;
    }

    let Some(projection) = LocalProjection::for_vertices(open) else {
        return 0.0;
    };
    let projected: Vec<(f64, f64)> = open.iter().map(|c| projection.project(c)).collect();

    let twice_area = shoelace(&projected);
    let area = 0.5 * twice_area.abs();
    if area < DEGENERATE_AREA_M2 { 0.0 } else { area }
}

/// Area of a validated polygon in square meters.
pub fn area_m2(polygon: &Polygon) -> f64 {
    let area = planar_area_m2(polygon.ring());
    if area == 0.0 {
        log::warn!(
            "Boundary with {} vertices encloses no area",
            polygon.vertex_count()
        );
    }
    area
}

/// Area of a polygon in `unit`, using the standard unit table.
pub fn area(polygon: &Polygon, unit: AreaUnit) -> f64 {
    area_with(polygon, unit, &UnitTable::standard())
}

/// Area of a polygon in `unit`, using the given unit table.
pub fn area_with(polygon: &Polygon, unit: AreaUnit, table: &UnitTable) -> f64 {
    table.from_square_meters(area_m2(polygon), unit)
}

/// Length of the boundary in meters, summing great-circle edge lengths.
pub fn perimeter_m(polygon: &Polygon) -> f64 {
    polygon
        .ring()
        .windows(2)
        .map(|edge| edge[0].distance_m(&edge[1]))
        .sum()
}

/// Signed doubled area of an implicitly closed planar ring.
pub(crate) fn shoelace(points: &[(f64, f64)]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (xi, yi) = points[i];
            let (xj, yj) = points[(i + 1) % n];
            xi * yj - xj * yi
        })
        .sum()
}

/// Drop a trailing copy of the first vertex, if any.
pub(crate) fn open_vertices(coords: &[Coordinate]) -> &[Coordinate] {
    match (coords.first(), coords.last()) {
        (Some(first), Some(last)) if coords.len() > 1 && first == last => {
            &coords[..coords.len() - 1]
        }
        _ => coords,
    }
}
