//! Boundary ring and polygon types.

use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

/// An unvalidated sequence of vertices as delivered by a drawing tool.
///
/// A ring may or may not repeat its first vertex at the end. Use
/// [`validate`](crate::validate) to turn it into a [`Polygon`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ring(Vec<Coordinate>);

impl Ring {
    /// Create an empty ring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ring from `(lon, lat)` pairs.
    pub fn from_lon_lat(points: &[(f64, f64)]) -> Self {
        Self(points.iter().map(|&p| Coordinate::from(p)).collect())
    }

    /// Append a vertex.
    pub fn push(&mut self, coord: Coordinate) {
        self.0.push(coord);
    }

    /// The vertices in input order.
    pub fn coords(&self) -> &[Coordinate] {
        &self.0
    }

    /// Number of entries, including a closing duplicate if present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the ring has no vertices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First and last entries are identical and there is more than one entry.
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => self.0.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Consume the ring and return its vertices.
    pub fn into_coords(self) -> Vec<Coordinate> {
        self.0
    }
}

impl From<Vec<Coordinate>> for Ring {
    fn from(coords: Vec<Coordinate>) -> Self {
        Self(coords)
    }
}

impl FromIterator<Coordinate> for Ring {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Axis-aligned extent of a polygon in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// South-west corner.
    pub min: Coordinate,
    /// North-east corner.
    pub max: Coordinate,
}

impl BoundingBox {
    /// Check if a coordinate lies inside or on the edge of the box.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.lon >= self.min.lon
            && coord.lon <= self.max.lon
            && coord.lat >= self.min.lat
            && coord.lat <= self.max.lat
    }

    /// Middle of the box, useful for framing a map view.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min.lon + self.max.lon) / 2.0,
            (self.min.lat + self.max.lat) / 2.0,
        )
    }
}

/// A validated, closed exterior boundary.
///
/// Invariants: the ring is closed, holds at least three distinct vertices, has no two
/// consecutive identical entries, and every vertex is finite and in range. Only the
/// validator constructs polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    ring: Vec<Coordinate>,
}

impl Polygon {
    /// Wrap a ring that already satisfies every polygon invariant.
    pub(crate) fn from_closed_ring(ring: Vec<Coordinate>) -> Self {
        debug_assert!(ring.len() >= 4 && ring.first() == ring.last());
        Self { ring }
    }

    /// The closed ring, ending with a copy of the first vertex.
    pub fn ring(&self) -> &[Coordinate] {
        &self.ring
    }

    /// The vertices without the closing duplicate.
    pub fn vertices(&self) -> &[Coordinate] {
        &self.ring[..self.ring.len() - 1]
    }

    /// Number of vertices, not counting the closing duplicate.
    pub fn vertex_count(&self) -> usize {
        self.ring.len() - 1
    }

    /// Copy of the open vertex list as an unvalidated ring.
    pub fn to_open_ring(&self) -> Ring {
        Ring::from(self.vertices().to_vec())
    }

    /// Smallest box holding every vertex.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut min = Coordinate::new(f64::INFINITY, f64::INFINITY);
        let mut max = Coordinate::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for c in self.vertices() {
            min.lon = min.lon.min(c.lon);
            min.lat = min.lat.min(c.lat);
            max.lon = max.lon.max(c.lon);
            max.lat = max.lat.max(c.lat);
        }
        BoundingBox { min, max }
    }

    /// Check if a coordinate is inside the boundary.
    ///
    /// Uses ray casting in degree space, which is adequate for farm-sized parcels that do not
    /// cross the antimeridian.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        if !self.bounding_box().contains(coord) {
            return false;
        }

        let vertices = self.vertices();
        let (x, y) = (coord.lon, coord.lat);
        let mut inside = false;
        let mut j = vertices.len() - 1;
        for i in 0..vertices.len() {
            let (xi, yi) = (vertices[i].lon, vertices[i].lat);
            let (xj, yj) = (vertices[j].lon, vertices[j].lat);
            if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}
