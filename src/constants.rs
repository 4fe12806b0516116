//! Global constants for the boundary engine

/// Meters spanned by one degree of latitude in the local projection.
pub const METERS_PER_DEG_LAT: f64 = 110_574.2727;

/// Meters spanned by one degree of longitude at the equator. Scaled by `cos(mean_lat)`.
pub const METERS_PER_DEG_LON_EQUATOR: f64 = 111_319.458;

/// Mean earth radius used for great-circle edge lengths.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Conversion factors, expressed as square meters per unit.
pub mod square_meters_per {
    /// One square meter.
    pub const SQUARE_METER: f64 = 1.0;
    /// International acre.
    pub const ACRE: f64 = 4_046.856_422_4;
    /// Hectare.
    pub const HECTARE: f64 = 10_000.0;
    /// Bigha, North Indian (Punjab/Haryana/Uttar Pradesh pucca) definition.
    ///
    /// Bigha has no national standard; regional values span roughly 1000 to 2700 m².
    /// Override with [`crate::UnitTable::with_bigha`] when a different region applies.
    pub const BIGHA: f64 = 2_529.285_264;
    /// International square foot.
    pub const SQUARE_FOOT: f64 = 0.092_903_04;
}

/// Minimum number of distinct vertices for a valid boundary.
pub const MIN_DISTINCT_VERTICES: usize = 3;

/// Default number of decimals when rendering an area.
pub const DEFAULT_AREA_DECIMALS: usize = 2;

/// Default number of decimals when rendering a coordinate.
pub const DEFAULT_COORDINATE_DECIMALS: usize = 4;

/// Default number of undoable edits kept per session.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Message shown when the user tries to proceed without a usable boundary.
pub const BOUNDARY_REQUIRED_MESSAGE: &str = "Please mark farm boundaries before proceeding";
