//! Error types for boundary validation, editing, and serialization.

use thiserror::Error;

use crate::constants::BOUNDARY_REQUIRED_MESSAGE;

/// Reasons a candidate ring cannot become a polygon.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Fewer than three distinct vertices after collapsing repeats
    #[error("Boundary needs at least 3 distinct vertices, found {distinct}")]
    TooFewVertices {
        /// Number of distinct vertices found
        distinct: usize,
    },

    /// A vertex holds NaN or an infinite value
    #[error("Vertex {index} has a non-finite coordinate")]
    NonFinite {
        /// Position of the offending vertex in the input ring
        index: usize,
    },

    /// A vertex lies outside longitude [-180, 180] or latitude [-90, 90]
    #[error("Vertex {index} is out of range (lon {lon}, lat {lat})")]
    OutOfRange {
        /// Position of the offending vertex in the input ring
        index: usize,
        /// Longitude of the vertex
        lon: f64,
        /// Latitude of the vertex
        lat: f64,
    },

    /// The ring is open and the close policy forbids repairing it
    #[error("Boundary ring is not closed")]
    NotClosed,
}

impl ValidationError {
    /// Text suitable for an inline message or toast.
    pub fn user_message(&self) -> &'static str {
        BOUNDARY_REQUIRED_MESSAGE
    }
}

/// Errors produced by the boundary engine.
#[derive(Error, Debug)]
pub enum BoundaryError {
    /// The polygon failed validation
    #[error("Invalid boundary: {0}")]
    Validation(#[from] ValidationError),

    /// Commit was attempted without a closed boundary
    #[error("Boundary required")]
    BoundaryRequired,

    /// The action is not available in the current session state
    #[error("Cannot {action} while session is {state}")]
    InvalidTransition {
        /// The attempted action
        action: &'static str,
        /// Name of the state the session was in
        state: &'static str,
    },

    /// A vertex index does not exist in the current polygon
    #[error("Vertex index {index} out of bounds (polygon has {len} vertices)")]
    VertexIndex {
        /// Requested index
        index: usize,
        /// Number of distinct vertices
        len: usize,
    },

    /// Area unit string could not be recognized
    #[error("Unknown area unit: {0}")]
    UnknownUnit(String),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML parsing or serialization error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid document structure or content
    #[error("Invalid format: {message}")]
    InvalidFormat {
        /// Description of the format error
        message: String,
    },

    /// Version mismatch between expected and found
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Expected version
        expected: String,
        /// Found version
        found: String,
    },
}

impl BoundaryError {
    /// Create an invalid format error with a message.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create an invalid transition error.
    pub fn invalid_transition(action: &'static str, state: &'static str) -> Self {
        Self::InvalidTransition { action, state }
    }

    /// Whether the user can recover by redrawing the boundary.
    pub fn is_recoverable_by_redraw(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::BoundaryRequired)
    }

    /// Text suitable for an inline message or toast.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.user_message().to_string(),
            Self::BoundaryRequired => BOUNDARY_REQUIRED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BoundaryError>;
