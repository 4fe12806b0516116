//! The boundary edit session.
//!
//! A [`BoundarySession`] owns one farm boundary from the first tap to commit. It moves
//! through the states in [`SessionState`], validates every ring before it becomes the
//! polygon, and keeps the area, center, and perimeter cached so the form can read them
//! without recomputing.
//!
//! ```text
//! Empty -> Drawing -> Closed <-> Editing
//!                       |
//!                       +-> Committed
//! any non-terminal state -> Cancelled
//! ```

use serde::Serialize;

use crate::config::EngineConfig;
use crate::display::{format_area_with, format_coordinates_with};
use crate::error::{BoundaryError, Result, ValidationError};
use crate::format::FarmBoundaryRecord;
use crate::geometry::{area_with, centroid_with, perimeter_m, validate_with};
use crate::model::{AreaUnit, Coordinate, Polygon, Ring, UnitTable};
use crate::session::history::{EditCommand, EditHistory};
use crate::session::state::{Phase, SessionState};

/// Values the form layer reads, computed from the current polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundarySnapshot {
    /// Lifecycle state
    pub state: SessionState,
    /// Area in `area_unit`, 0 without a polygon
    pub area: f64,
    /// Selected unit
    pub area_unit: AreaUnit,
    /// Area formatted with the configured decimals
    pub formatted_area: String,
    /// Boundary center, if a polygon exists
    pub center: Option<Coordinate>,
    /// Center formatted as hemisphere-labelled latitude and longitude
    pub formatted_center: Option<String>,
    /// Boundary length in meters
    pub perimeter_m: f64,
    /// A validated polygon exists
    pub is_valid: bool,
    /// Vertices currently shown to the user
    pub vertex_count: usize,
}

/// Cached results for the current polygon.
#[derive(Debug, Clone, Copy, Default)]
struct Measurements {
    area: f64,
    center: Option<Coordinate>,
    perimeter_m: f64,
}

/// Draw, edit, and commit a single farm boundary.
#[derive(Debug, Clone)]
pub struct BoundarySession {
    config: EngineConfig,
    table: UnitTable,
    phase: Phase,
    polygon: Option<Polygon>,
    unit: AreaUnit,
    measurements: Measurements,
    last_error: Option<ValidationError>,
    history: EditHistory,
}

impl Default for BoundarySession {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl BoundarySession {
    /// Create an empty session using the given settings.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            config: config.clone(),
            table: config.unit_table(),
            phase: Phase::Empty,
            polygon: None,
            unit: config.default_unit,
            measurements: Measurements::default(),
            last_error: None,
            history: EditHistory::with_limit(config.history_limit),
        }
    }

    /// Reopen a stored boundary for editing.
    ///
    /// The stored ring is validated again and the area is recomputed rather than taken from
    /// the record.
    pub fn from_record(record: &FarmBoundaryRecord, config: &EngineConfig) -> Result<Self> {
        let polygon = record.polygon(config.close_policy)?;
        let mut session = Self::new(config);
        session.unit = record.area_unit;
        session.install(polygon);
        session.transition(Phase::Closed);
        Ok(session)
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Begin placing vertices.
    pub fn start_drawing(&mut self) -> Result<()> {
        self.require(SessionState::Empty, "start drawing")?;
        self.last_error = None;
        self.transition(Phase::Drawing {
            vertices: Vec::new(),
        });
        Ok(())
    }

    /// Append a vertex to the ring being drawn. Nothing is recomputed.
    pub fn add_vertex(&mut self, coord: Coordinate) -> Result<()> {
        if let Phase::Drawing { vertices } = &mut self.phase {
            vertices.push(coord);
            log::trace!("Added vertex {} ({} so far)", coord, vertices.len());
            return Ok(());
        }
        Err(self.rejected("add vertex"))
    }

    /// Close the drawn ring.
    ///
    /// On success the polygon is cached and the session is `Closed`. On failure the session
    /// stays in `Drawing` with its vertices intact and the error is kept in
    /// [`last_error`](Self::last_error).
    pub fn close_ring(&mut self) -> Result<()> {
        let Phase::Drawing { vertices } = &self.phase else {
            return Err(self.rejected("close ring"));
        };

        let ring = Ring::from(vertices.clone());
        match validate_with(&ring, self.config.close_policy) {
            Ok(polygon) => {
                self.install(polygon);
                self.transition(Phase::Closed);
                Ok(())
            }
            Err(e) => Err(self.record_failure("close ring", e)),
        }
    }

    // ------------------------------------------------------------------
    // Closed-state edits
    // ------------------------------------------------------------------

    /// Select the unit areas are reported in.
    ///
    /// With a closed polygon only the area is recomputed; the center and vertices stay as
    /// they are, and the change is recorded for undo.
    pub fn set_unit(&mut self, unit: AreaUnit) -> Result<()> {
        let state = self.state();
        if state.is_terminal() || state == SessionState::Editing {
            return Err(self.rejected("change unit"));
        }
        if unit == self.unit {
            return Ok(());
        }

        let old = self.unit;
        self.unit = unit;
        self.recompute_area();
        if state == SessionState::Closed {
            self.history.push(EditCommand::ChangeUnit { old, new: unit });
        }
        log::debug!("Area unit changed from {} to {}", old.name(), unit.name());
        Ok(())
    }

    /// Pick up vertex `index` of the closed polygon.
    pub fn begin_drag(&mut self, index: usize) -> Result<()> {
        self.require(SessionState::Closed, "drag vertex")?;
        let vertices = self.closed_vertices()?;
        check_index(index, vertices.len())?;
        self.transition(Phase::Editing { index, vertices });
        Ok(())
    }

    /// Move the dragged vertex. Nothing is recomputed until release.
    pub fn drag_to(&mut self, coord: Coordinate) -> Result<()> {
        if let Phase::Editing { index, vertices } = &mut self.phase {
            vertices[*index] = coord;
            return Ok(());
        }
        Err(self.rejected("move vertex"))
    }

    /// Drop the dragged vertex and return to `Closed`.
    ///
    /// The edited ring is validated; if it fails, the previous polygon is kept and the error
    /// is returned.
    pub fn release_drag(&mut self) -> Result<()> {
        let Phase::Editing { vertices, .. } = &self.phase else {
            return Err(self.rejected("release drag"));
        };
        let ring = closed_ring(vertices);
        self.transition(Phase::Closed);
        self.replace_with(&ring, "Move vertex", "release drag")
    }

    /// Abandon the drag and keep the polygon unchanged.
    pub fn cancel_drag(&mut self) -> Result<()> {
        self.require(SessionState::Editing, "cancel drag")?;
        self.transition(Phase::Closed);
        Ok(())
    }

    /// Insert a vertex after vertex `after`.
    pub fn insert_vertex(&mut self, after: usize, coord: Coordinate) -> Result<()> {
        self.require(SessionState::Closed, "insert vertex")?;
        let mut vertices = self.closed_vertices()?;
        check_index(after, vertices.len())?;
        vertices.insert(after + 1, coord);
        self.replace_with(&closed_ring(&vertices), "Insert vertex", "insert vertex")
    }

    /// Remove vertex `index`. Rejected if fewer than three distinct vertices would remain.
    pub fn remove_vertex(&mut self, index: usize) -> Result<()> {
        self.require(SessionState::Closed, "remove vertex")?;
        let mut vertices = self.closed_vertices()?;
        check_index(index, vertices.len())?;
        vertices.remove(index);
        self.replace_with(&closed_ring(&vertices), "Remove vertex", "remove vertex")
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Discard the boundary and start over.
    pub fn clear(&mut self) -> Result<()> {
        let state = self.state();
        if !matches!(state, SessionState::Drawing | SessionState::Closed) {
            return Err(self.rejected("clear"));
        }
        self.reset_draft();
        self.transition(Phase::Empty);
        Ok(())
    }

    /// Hand the closed boundary to storage.
    ///
    /// Without a closed polygon this fails with [`BoundaryError::BoundaryRequired`].
    pub fn commit(&mut self) -> Result<FarmBoundaryRecord> {
        match self.state() {
            SessionState::Closed => {}
            SessionState::Empty | SessionState::Drawing => {
                log::warn!("Commit rejected: no closed boundary");
                return Err(BoundaryError::BoundaryRequired);
            }
            _ => return Err(self.rejected("commit")),
        }
        let Some(polygon) = &self.polygon else {
            return Err(BoundaryError::BoundaryRequired);
        };
        let Some(center) = self.measurements.center else {
            return Err(BoundaryError::BoundaryRequired);
        };

        let record = FarmBoundaryRecord::new(polygon, self.measurements.area, self.unit, center)
            .with_perimeter(self.measurements.perimeter_m)
            .stamped_now();
        log::info!(
            "Committed boundary: {} vertices, {}, center {}",
            polygon.vertex_count(),
            self.formatted_area_labeled(),
            self.formatted_center().unwrap_or_default()
        );
        self.history.clear();
        self.transition(Phase::Committed);
        Ok(record)
    }

    /// Abandon the session and discard the draft.
    pub fn cancel(&mut self) -> Result<()> {
        if self.state().is_terminal() {
            return Err(self.rejected("cancel"));
        }
        self.reset_draft();
        self.transition(Phase::Cancelled);
        Ok(())
    }

    /// Apply a boundary produced outside the session, such as a map widget callback.
    ///
    /// `None` clears the session; `Some(ring)` validates the ring and makes it the polygon.
    pub fn apply_external(&mut self, ring: Option<Ring>) -> Result<()> {
        let state = self.state();
        if !matches!(
            state,
            SessionState::Empty | SessionState::Drawing | SessionState::Closed
        ) {
            return Err(self.rejected("apply boundary"));
        }

        let Some(ring) = ring else {
            self.reset_draft();
            self.transition(Phase::Empty);
            return Ok(());
        };

        if state == SessionState::Closed {
            return self.replace_with(&ring, "Replace boundary", "apply boundary");
        }
        match validate_with(&ring, self.config.close_policy) {
            Ok(polygon) => {
                self.install(polygon);
                self.transition(Phase::Closed);
                Ok(())
            }
            Err(e) => Err(self.record_failure("apply boundary", e)),
        }
    }

    // ------------------------------------------------------------------
    // Undo/Redo
    // ------------------------------------------------------------------

    /// Revert the most recent edit. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        self.require_history("undo")?;
        let Some(command) = self.history.pop_undo() else {
            return Ok(false);
        };
        match command {
            EditCommand::ReplacePolygon { old, .. } => self.install(old),
            EditCommand::ChangeUnit { old, .. } => {
                self.unit = old;
                self.recompute_area();
            }
        }
        Ok(true)
    }

    /// Reapply the most recently undone edit. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> Result<bool> {
        self.require_history("redo")?;
        let Some(command) = self.history.pop_redo() else {
            return Ok(false);
        };
        match command {
            EditCommand::ReplacePolygon { new, .. } => self.install(new),
            EditCommand::ChangeUnit { new, .. } => {
                self.unit = new;
                self.recompute_area();
            }
        }
        Ok(true)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.state() == SessionState::Closed && self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.state() == SessionState::Closed && self.history.can_redo()
    }

    /// Description of the edit that would be undone
    pub fn undo_description(&self) -> Option<String> {
        self.history.undo_description()
    }

    /// Description of the edit that would be redone
    pub fn redo_description(&self) -> Option<String> {
        self.history.redo_description()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.phase.state()
    }

    /// The validated polygon, if one exists.
    pub fn polygon(&self) -> Option<&Polygon> {
        self.polygon.as_ref()
    }

    /// Area in the selected unit, 0 without a polygon.
    pub fn area(&self) -> f64 {
        self.measurements.area
    }

    /// Unit areas are reported in.
    pub fn area_unit(&self) -> AreaUnit {
        self.unit
    }

    /// Area with the configured number of decimals, e.g. `2.98`.
    pub fn formatted_area(&self) -> String {
        format_area_with(self.measurements.area, self.config.area_decimals)
    }

    /// Boundary center, if a polygon exists.
    pub fn center(&self) -> Option<Coordinate> {
        self.measurements.center
    }

    /// Center as `"12.3456° N, 77.6543° E"` with the configured decimals.
    pub fn formatted_center(&self) -> Option<String> {
        self.measurements
            .center
            .map(|c| format_coordinates_with(c.lat, c.lon, self.config.coordinate_decimals))
    }

    /// Boundary length in meters, 0 without a polygon.
    pub fn perimeter_m(&self) -> f64 {
        self.measurements.perimeter_m
    }

    /// A validated polygon exists.
    pub fn is_valid(&self) -> bool {
        self.polygon.is_some()
    }

    /// The error from the last rejected close, release, or edit.
    pub fn last_error(&self) -> Option<&ValidationError> {
        self.last_error.as_ref()
    }

    /// Vertices to render: the drawn points while drawing, the working copy while dragging,
    /// otherwise the polygon's vertices.
    pub fn vertices(&self) -> &[Coordinate] {
        match (&self.phase, &self.polygon) {
            (Phase::Drawing { vertices } | Phase::Editing { vertices, .. }, _) => vertices,
            (_, Some(polygon)) => polygon.vertices(),
            (_, None) => &[],
        }
    }

    /// Settings the session was created with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only view of everything the form displays.
    pub fn snapshot(&self) -> BoundarySnapshot {
        BoundarySnapshot {
            state: self.state(),
            area: self.area(),
            area_unit: self.unit,
            formatted_area: self.formatted_area(),
            center: self.center(),
            formatted_center: self.formatted_center(),
            perimeter_m: self.perimeter_m(),
            is_valid: self.is_valid(),
            vertex_count: self.vertices().len(),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn transition(&mut self, next: Phase) {
        let from = self.phase.state();
        let to = next.state();
        if from != to {
            log::debug!("Boundary session {} -> {}", from, to);
        }
        self.phase = next;
    }

    fn require(&self, expected: SessionState, action: &'static str) -> Result<()> {
        if self.state() == expected {
            Ok(())
        } else {
            Err(self.rejected(action))
        }
    }

    /// History is readable in every state except `Editing` and the terminal ones; outside
    /// `Closed` it is always empty.
    fn require_history(&self, action: &'static str) -> Result<()> {
        let state = self.state();
        if state.is_terminal() || state == SessionState::Editing {
            Err(self.rejected(action))
        } else {
            Ok(())
        }
    }

    fn rejected(&self, action: &'static str) -> BoundaryError {
        let state = self.state().name();
        log::warn!("Rejected '{}' in state {}", action, state);
        BoundaryError::invalid_transition(action, state)
    }

    fn record_failure(&mut self, action: &str, error: ValidationError) -> BoundaryError {
        log::warn!("Rejected boundary on {}: {}", action, error);
        self.last_error = Some(error.clone());
        BoundaryError::Validation(error)
    }

    fn closed_vertices(&self) -> Result<Vec<Coordinate>> {
        self.polygon
            .as_ref()
            .map(|p| p.vertices().to_vec())
            .ok_or(BoundaryError::BoundaryRequired)
    }

    /// Validate `ring` and make it the polygon, recording the change for undo.
    /// The session must already be `Closed`.
    fn replace_with(
        &mut self,
        ring: &Ring,
        description: &'static str,
        action: &str,
    ) -> Result<()> {
        let polygon = match validate_with(ring, self.config.close_policy) {
            Ok(polygon) => polygon,
            Err(e) => return Err(self.record_failure(action, e)),
        };
        if let Some(old) = self.polygon.as_ref().filter(|old| **old != polygon) {
            self.history.push(EditCommand::ReplacePolygon {
                description,
                old: old.clone(),
                new: polygon.clone(),
            });
        }
        self.install(polygon);
        Ok(())
    }

    /// Make `polygon` current and recompute every cached value.
    fn install(&mut self, polygon: Polygon) {
        self.measurements = Measurements {
            area: area_with(&polygon, self.unit, &self.table),
            center: Some(centroid_with(&polygon, self.config.centroid_method)),
            perimeter_m: perimeter_m(&polygon),
        };
        self.polygon = Some(polygon);
        self.last_error = None;
    }

    fn recompute_area(&mut self) {
        if let Some(polygon) = &self.polygon {
            self.measurements.area = area_with(polygon, self.unit, &self.table);
        }
    }

    fn reset_draft(&mut self) {
        self.polygon = None;
        self.measurements = Measurements::default();
        self.last_error = None;
        self.history.clear();
    }

    fn formatted_area_labeled(&self) -> String {
        format!("{} {}", self.formatted_area(), self.unit.symbol())
    }
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(BoundaryError::VertexIndex { index, len })
    }
}

/// Close an open vertex list by repeating its first vertex.
fn closed_ring(vertices: &[Coordinate]) -> Ring {
    vertices
        .iter()
        .copied()
        .chain(vertices.first().copied())
        .collect()
}
