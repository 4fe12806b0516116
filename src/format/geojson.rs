//! GeoJSON polygon geometry.
//!
//! Only the `Polygon` geometry type is supported. On input, a `Feature` wrapping a polygon
//! is unwrapped, altitude values are dropped, and interior rings (holes) are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{BoundaryError, Result};
use crate::geometry::{ClosePolicy, validate_with};
use crate::model::{Coordinate, Polygon, Ring};

/// A GeoJSON `Polygon` geometry with `[lon, lat]` positions.
///
/// Deserializing goes through [`from_value`](Self::from_value), so stored documents with
/// altitude or a `Feature` wrapper load the same way as [`from_json`](Self::from_json).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoJsonPolygon {
    /// Always `"Polygon"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Linear rings; the first is the exterior boundary.
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl GeoJsonPolygon {
    /// GeoJSON type name for polygons.
    pub const TYPE: &'static str = "Polygon";

    /// Geometry holding the closed exterior ring of `polygon`.
    pub fn from_polygon(polygon: &Polygon) -> Self {
        Self {
            kind: Self::TYPE.to_string(),
            coordinates: vec![polygon.ring().iter().map(|c| c.to_position()).collect()],
        }
    }

    /// The exterior ring as an unvalidated [`Ring`].
    pub fn exterior(&self) -> Result<Ring> {
        if self.kind != Self::TYPE {
            return Err(BoundaryError::invalid_format(format!(
                "Expected GeoJSON type '{}', found '{}'",
                Self::TYPE,
                self.kind
            )));
        }

        let Some(exterior) = self.coordinates.first() else {
            return Err(BoundaryError::invalid_format("Polygon has no rings"));
        };

        if self.coordinates.len() > 1 {
            log::debug!(
                "Ignoring {} interior ring(s) in GeoJSON polygon",
                self.coordinates.len() - 1
            );
        }

        Ok(exterior.iter().map(|&p| Coordinate::from(p)).collect())
    }

    /// Validate the exterior ring into a [`Polygon`].
    pub fn to_polygon(&self, policy: ClosePolicy) -> Result<Polygon> {
        Ok(validate_with(&self.exterior()?, policy)?)
    }

    /// Serialize to a compact JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a `Polygon` geometry, or a `Feature` whose geometry is a polygon.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse from an already decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let geometry = match value.get("type").and_then(Value::as_str) {
            Some("Feature") => value
                .get("geometry")
                .cloned()
                .ok_or_else(|| BoundaryError::invalid_format("Feature has no geometry"))?,
            Some(_) => value,
            None => return Err(BoundaryError::invalid_format("Missing GeoJSON 'type'")),
        };

        let kind = geometry
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if kind != Self::TYPE {
            return Err(BoundaryError::invalid_format(format!(
                "Unsupported GeoJSON geometry '{}'",
                kind
            )));
        }

        let rings = geometry
            .get("coordinates")
            .and_then(Value::as_array)
            .ok_or_else(|| BoundaryError::invalid_format("Polygon has no coordinates"))?;

        let coordinates = rings
            .iter()
            .map(parse_ring)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { kind, coordinates })
    }
}

impl<'de> Deserialize<'de> for GeoJsonPolygon {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl From<&Polygon> for GeoJsonPolygon {
    fn from(polygon: &Polygon) -> Self {
        Self::from_polygon(polygon)
    }
}

fn parse_ring(ring: &Value) -> Result<Vec<[f64; 2]>> {
    let positions = ring
        .as_array()
        .ok_or_else(|| BoundaryError::invalid_format("Ring is not an array"))?;
    positions.iter().map(parse_position).collect()
}

fn parse_position(position: &Value) -> Result<[f64; 2]> {
    let values = position
        .as_array()
        .filter(|values| values.len() >= 2)
        .ok_or_else(|| BoundaryError::invalid_format("Position needs at least two numbers"))?;

    match (values[0].as_f64(), values[1].as_f64()) {
        (Some(lon), Some(lat)) => Ok([lon, lat]),
        _ => Err(BoundaryError::invalid_format("Position values must be numbers")),
    }
}
