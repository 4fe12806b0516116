//! Representative center point of a boundary.

use serde::{Deserialize, Serialize};

use crate::geometry::area::{LocalProjection, shoelace};
use crate::model::{Coordinate, Polygon};

/// How the center of a boundary is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CentroidMethod {
    /// Mean of the vertex coordinates.
    #[default]
    Vertex,
    /// Center of mass of the enclosed surface.
    ///
    /// Differs from [`CentroidMethod::Vertex`] for concave or unevenly sampled shapes.
    AreaWeighted,
}

/// Mean longitude and latitude of the distinct vertices.
///
/// The closing duplicate is excluded so the first vertex carries the same weight as the
/// others.
pub fn centroid(polygon: &Polygon) -> Coordinate {
    let vertices = polygon.vertices();
    let n = vertices.len() as f64;
    let (lon_sum, lat_sum) = vertices
        .iter()
        .fold((0.0, 0.0), |(lon, lat), c| (lon + c.lon, lat + c.lat));

    Coordinate::new(lon_sum / n, lat_sum / n)
}

/// Center of mass of the polygon surface in the local projection.
///
/// Falls back to the vertex centroid when the polygon encloses no area.
pub fn area_weighted_centroid(polygon: &Polygon) -> Coordinate {
    let Some(projection) = LocalProjection::for_vertices(polygon.ring()) else {
        return centroid(polygon);
    };
    let points: Vec<(f64, f64)> = polygon
        .vertices()
        .iter()
        .map(|c| projection.project(c))
        .collect();

    let twice_area = shoelace(&points);
    if twice_area.abs() < f64::EPSILON {
        log::debug!("Area-weighted centroid of degenerate boundary, using vertex mean");
        return centroid(polygon);
    }

    let n = points.len();
    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let (xi, yi) = points[i];
        let (xj, yj) = points[(i + 1) % n];
        let cross = xi * yj - xj * yi;
        cx += (xi + xj) * cross;
        cy += (yi + yj) * cross;
    }

    // 6A = 3 * (2A)
    let six_area = 3.0 * twice_area;
    projection.unproject(cx / six_area, cy / six_area)
}

/// Center of the polygon using `method`.
pub fn centroid_with(polygon: &Polygon, method: CentroidMethod) -> Coordinate {
    match method {
        CentroidMethod::Vertex => centroid(polygon),
        CentroidMethod::AreaWeighted => area_weighted_centroid(polygon),
    }
}
