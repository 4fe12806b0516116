//! Session lifecycle states.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

/// Where a boundary session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No boundary yet
    Empty,
    /// Vertices are being placed
    Drawing,
    /// A validated polygon with cached area and center
    Closed,
    /// A vertex of the closed polygon is being dragged
    Editing,
    /// The boundary was handed to storage
    Committed,
    /// The draft was discarded
    Cancelled,
}

impl SessionState {
    /// Get the display name for this state.
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Empty => "Empty",
            SessionState::Drawing => "Drawing",
            SessionState::Closed => "Closed",
            SessionState::Editing => "Editing",
            SessionState::Committed => "Committed",
            SessionState::Cancelled => "Cancelled",
        }
    }

    /// Check if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Committed | SessionState::Cancelled)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Internal state carrying the in-progress data of each phase.
#[derive(Debug, Clone, Default)]
pub(crate) enum Phase {
    #[default]
    Empty,
    /// Vertices placed so far, in order.
    Drawing { vertices: Vec<Coordinate> },
    Closed,
    /// Working copy of the polygon's vertices while `index` is dragged.
    Editing {
        index: usize,
        vertices: Vec<Coordinate>,
    },
    Committed,
    Cancelled,
}

impl Phase {
    pub(crate) fn state(&self) -> SessionState {
        match self {
            Phase::Empty => SessionState::Empty,
            Phase::Drawing { .. } => SessionState::Drawing,
            Phase::Closed => SessionState::Closed,
            Phase::Editing { .. } => SessionState::Editing,
            Phase::Committed => SessionState::Committed,
            Phase::Cancelled => SessionState::Cancelled,
        }
    }
}
