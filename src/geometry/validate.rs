//! Boundary ring validation.

use serde::{Deserialize, Serialize};

use crate::constants::MIN_DISTINCT_VERTICES;
use crate::error::ValidationError;
use crate::model::{Coordinate, Polygon, Ring};

/// What to do with a ring whose last vertex differs from its first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClosePolicy {
    /// Append a copy of the first vertex.
    #[default]
    AutoClose,
    /// Fail with [`ValidationError::NotClosed`].
    Reject,
}

/// Validate a ring using the default [`ClosePolicy::AutoClose`] policy.
pub fn validate(ring: &Ring) -> Result<Polygon, ValidationError> {
    validate_with(ring, ClosePolicy::AutoClose)
}

/// Validate a ring and build a closed [`Polygon`] from it.
///
/// Checks, in order: every vertex is finite, every vertex is in range, at least three
/// distinct vertices remain after collapsing consecutive repeats, and the ring is closed
/// (or may be closed under `policy`).
pub fn validate_with(ring: &Ring, policy: ClosePolicy) -> Result<Polygon, ValidationError> {
    let coords = ring.coords();

    for (index, c) in coords.iter().enumerate() {
        if !c.is_finite() {
            return Err(ValidationError::NonFinite { index });
        }
        if !c.in_range() {
            return Err(ValidationError::OutOfRange {
                index,
                lon: c.lon,
                lat: c.lat,
            });
        }
    }

    let mut open: Vec<Coordinate> = Vec::with_capacity(coords.len() + 1);
    for c in coords {
        if open.last() != Some(c) {
            open.push(*c);
        }
    }

    let was_closed = open.len() > 1 && open.first() == open.last();
    if was_closed {
        open.pop();
    }

    let distinct = count_distinct(&open);
    if distinct < MIN_DISTINCT_VERTICES {
        return Err(ValidationError::TooFewVertices { distinct });
    }

    if !was_closed {
        match policy {
            ClosePolicy::AutoClose => {
                log::debug!("Auto-closing boundary ring with {} vertices", open.len());
            }
            ClosePolicy::Reject => return Err(ValidationError::NotClosed),
        }
    }

    let first = open[0];
    open.push(first);
    Ok(Polygon::from_closed_ring(open))
}

fn count_distinct(coords: &[Coordinate]) -> usize {
    let mut seen: Vec<Coordinate> = Vec::with_capacity(coords.len());
    for c in coords {
        if !seen.contains(c) {
            seen.push(*c);
        }
    }
    seen.len()
}
