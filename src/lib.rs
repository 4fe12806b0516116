//! Farm boundary geometry engine.
//!
//! Turns a hand-drawn ring of GPS coordinates into a validated polygon, computes its area in
//! agricultural units and its center, and tracks the boundary through an explicit edit
//! session that ends in a storable [`FarmBoundaryRecord`].
//!
//! ```rust,ignore
//! use farm_boundary::{AreaUnit, BoundarySession, Coordinate, EngineConfig};
//!
//! let mut session = BoundarySession::new(&EngineConfig::default());
//! session.start_drawing()?;
//! session.add_vertex(Coordinate::new(77.000, 12.000))?;
//! session.add_vertex(Coordinate::new(77.000, 12.001))?;
//! session.add_vertex(Coordinate::new(77.001, 12.001))?;
//! session.close_ring()?;
//! session.set_unit(AreaUnit::Hectares)?;
//! let record = session.commit()?;
//! ```
//!
//! Areas use a local equirectangular projection around the boundary's mean latitude, which
//! is accurate at farm scale. Nothing in the engine panics or performs I/O; every failure is
//! a [`BoundaryError`].

pub mod config;
pub mod constants;
pub mod display;
mod error;
pub mod format;
pub mod geometry;
pub mod model;
pub mod session;

pub use config::{EngineConfig, LogLevel};
pub use display::{convert, format_area, format_coordinates};
pub use error::{BoundaryError, Result, ValidationError};
pub use format::FarmBoundaryRecord;
pub use geometry::{CentroidMethod, ClosePolicy, area, centroid, validate};
pub use model::{AreaUnit, BoundingBox, Coordinate, Polygon, Ring, UnitTable};
pub use session::{BoundarySession, BoundarySnapshot, SessionState};
