//! The record handed to storage when a boundary is committed.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format::geojson::GeoJsonPolygon;
use crate::geometry::ClosePolicy;
use crate::model::{AreaUnit, Coordinate, Polygon, UnitTable};

/// Persisted projection of a committed boundary.
///
/// Field names match the farm and field documents in the data store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmBoundaryRecord {
    /// Closed exterior ring.
    pub boundaries: GeoJsonPolygon,

    /// Area in `area_unit`.
    pub total_area: f64,

    /// Unit of `total_area`.
    pub area_unit: AreaUnit,

    /// Latitude of the boundary center.
    pub gps_latitude: f64,

    /// Longitude of the boundary center.
    pub gps_longitude: f64,

    /// Boundary length in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perimeter_m: Option<f64>,

    /// UTC commit time, ISO 8601.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committed_at: Option<String>,
}

impl FarmBoundaryRecord {
    /// Build a record from computed values.
    pub fn new(polygon: &Polygon, total_area: f64, area_unit: AreaUnit, center: Coordinate) -> Self {
        Self {
            boundaries: GeoJsonPolygon::from_polygon(polygon),
            total_area,
            area_unit,
            gps_latitude: center.lat,
            gps_longitude: center.lon,
            perimeter_m: None,
            committed_at: None,
        }
    }

    /// Attach the boundary length.
    pub fn with_perimeter(mut self, perimeter_m: f64) -> Self {
        self.perimeter_m = Some(perimeter_m);
        self
    }

    /// Set `committed_at` to the current time.
    pub fn stamped_now(mut self) -> Self {
        self.committed_at = Some(current_timestamp());
        self
    }

    /// The stored center point.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.gps_longitude, self.gps_latitude)
    }

    /// Area expressed in another unit.
    pub fn area_in(&self, unit: AreaUnit, table: &UnitTable) -> f64 {
        table.convert(self.total_area, self.area_unit, unit)
    }

    /// Recover the stored polygon, validating it again.
    pub fn polygon(&self, policy: ClosePolicy) -> Result<Polygon> {
        self.boundaries.to_polygon(policy)
    }

    /// Serialize the record to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a record from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SSZ`.
fn current_timestamp() -> String {
    let secs = web_time::SystemTime::now()
        .duration_since(web_time::SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format_unix_seconds(secs)
}

/// Format seconds since the Unix epoch as an ISO 8601 UTC timestamp.
pub(crate) fn format_unix_seconds(secs: u64) -> String {
    let days = (secs / 86_400) as i64;
    let secs_of_day = secs % 86_400;
    let (year, month, day) = civil_from_days(days);

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        day,
        secs_of_day / 3_600,
        (secs_of_day % 3_600) / 60,
        secs_of_day % 60
    )
}

/// Proleptic Gregorian date for a day count relative to 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
