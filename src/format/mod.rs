//! Boundary import/export formats.
//!
//! ## Supported Formats
//!
//! - **GeoJSON**: `Polygon` geometry, the shape stored in the `boundaries` field
//! - **Farm boundary record**: the JSON document handed to storage on commit
//! - **KML**: single-placemark documents for exchange with mapping tools
//!
//! ## Usage
//!
//! ```rust,ignore
//! use farm_boundary::format::{FarmBoundaryRecord, export_kml};
//!
//! let record = session.commit()?;
//! let json = record.to_json()?;
//! let kml = export_kml(&record, "North field")?;
//! ```

mod geojson;
mod kml;
mod record;

#[cfg(test)]
mod tests;

pub use geojson::GeoJsonPolygon;
pub use kml::{export_kml, import_kml};
pub use record::FarmBoundaryRecord;
