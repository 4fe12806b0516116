//! Tests for boundary session transitions and edits.

use super::*;
use crate::config::EngineConfig;
use crate::error::{BoundaryError, ValidationError};
use crate::geometry::{CentroidMethod, ClosePolicy};
use crate::model::{AreaUnit, Coordinate, Ring};

const SQUARE: [(f64, f64); 4] = [
    (77.0000, 12.0000),
    (77.0000, 12.0010),
    (77.0010, 12.0010),
    (77.0010, 12.0000),
];

fn draw(session: &mut BoundarySession, points: &[(f64, f64)]) {
    session.start_drawing().unwrap();
    for &(lon, lat) in points {
        session.add_vertex(Coordinate::new(lon, lat)).unwrap();
    }
}

fn closed_session() -> BoundarySession {
    let mut session = BoundarySession::default();
    draw(&mut session, &SQUARE);
    session.close_ring().unwrap();
    session
}

fn rel_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1.0e-9 * a.abs().max(b.abs())
}

#[test]
fn test_new_session_is_empty() {
    let session = BoundarySession::default();
    assert_eq!(session.state(), SessionState::Empty);
    assert_eq!(session.area(), 0.0);
    assert_eq!(session.area_unit(), AreaUnit::Acres);
    assert!(session.center().is_none());
    assert!(!session.is_valid());
}

#[test]
fn test_draw_and_close() {
    let mut session = BoundarySession::default();
    draw(&mut session, &SQUARE);
    assert_eq!(session.state(), SessionState::Drawing);
    assert_eq!(session.vertices().len(), 4);
    assert_eq!(session.area(), 0.0);

    session.close_ring().unwrap();
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.is_valid());
    assert!(session.area() > 2.9 && session.area() < 3.1);
    assert_eq!(session.formatted_area(), format!("{:.2}", session.area()));
    assert_eq!(
        session.formatted_center().as_deref(),
        Some("12.0005° N, 77.0005° E")
    );
    assert!(session.perimeter_m() > 400.0 && session.perimeter_m() < 480.0);
}

#[test]
fn test_close_failure_stays_drawing() {
    let mut session = BoundarySession::default();
    draw(&mut session, &[(77.0, 12.0), (77.001, 12.001)]);

    let err = session.close_ring().unwrap_err();
    assert!(matches!(
        err,
        BoundaryError::Validation(ValidationError::TooFewVertices { distinct: 2 })
    ));
    assert!(err.is_recoverable_by_redraw());
    assert_eq!(session.state(), SessionState::Drawing);
    assert_eq!(session.vertices().len(), 2);
    assert_eq!(
        session.last_error(),
        Some(&ValidationError::TooFewVertices { distinct: 2 })
    );

    // Keep drawing and close again.
    session.add_vertex(Coordinate::new(77.001, 12.0)).unwrap();
    session.close_ring().unwrap();
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.last_error().is_none());
}

#[test]
fn test_reject_policy_requires_explicit_close() {
    let config = EngineConfig::new().with_close_policy(ClosePolicy::Reject);
    let mut session = BoundarySession::new(&config);
    draw(&mut session, &SQUARE);
    assert!(matches!(
        session.close_ring(),
        Err(BoundaryError::Validation(ValidationError::NotClosed))
    ));

    session.add_vertex(Coordinate::new(77.0, 12.0)).unwrap();
    session.close_ring().unwrap();
    assert_eq!(session.polygon().map(|p| p.vertex_count()), Some(4));
}

#[test]
fn test_unit_change_keeps_center_and_vertices() {
    let mut session = closed_session();
    let acres = session.area();
    let center = session.center();
    let vertices = session.vertices().to_vec();

    session.set_unit(AreaUnit::Hectares).unwrap();

    assert_eq!(session.area_unit(), AreaUnit::Hectares);
    assert!(rel_eq(session.area() * 2.4710538147, acres));
    assert_ne!(session.area(), acres);
    assert_eq!(session.center(), center);
    assert_eq!(session.vertices(), vertices.as_slice());
    assert_eq!(session.state(), SessionState::Closed);
}

#[test]
fn test_unit_selected_before_drawing() {
    let mut session = BoundarySession::default();
    session.set_unit(AreaUnit::SquareMeters).unwrap();
    draw(&mut session, &SQUARE);
    session.close_ring().unwrap();

    assert!(session.area() > 12_000.0 && session.area() < 12_200.0);
    assert!(!session.can_undo());
}

#[test]
fn test_commit_without_polygon_requires_boundary() {
    let mut session = BoundarySession::default();
    let err = session.commit().unwrap_err();
    assert!(matches!(err, BoundaryError::BoundaryRequired));
    assert_eq!(
        err.user_message(),
        "Please mark farm boundaries before proceeding"
    );

    draw(&mut session, &SQUARE[..2]);
    assert!(matches!(
        session.commit(),
        Err(BoundaryError::BoundaryRequired)
    ));
    assert_eq!(session.state(), SessionState::Drawing);
}

#[test]
fn test_collinear_boundary_stays_valid() {
    let mut session = BoundarySession::default();
    draw(
        &mut session,
        &[(77.0, 12.0), (77.001, 12.001), (77.002, 12.002)],
    );
    session.close_ring().unwrap();

    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.is_valid());
    assert_eq!(session.area(), 0.0);
    assert!(session.last_error().is_none());

    let record = session.commit().unwrap();
    assert_eq!(record.total_area, 0.0);
    assert_eq!(session.state(), SessionState::Committed);
}

#[test]
fn test_reopen_record_with_altitude() {
    let json = r#"{
        "boundaries": {
            "type": "Polygon",
            "coordinates": [[[77.0, 12.0, 900.0], [77.0, 12.001, 900.0], [77.001, 12.001, 900.0], [77.001, 12.0, 900.0], [77.0, 12.0, 900.0]]]
        },
        "total_area": 2.98,
        "area_unit": "acres",
        "gps_latitude": 12.0005,
        "gps_longitude": 77.0005
    }"#;
    let record = crate::format::FarmBoundaryRecord::from_json(json).unwrap();
    let session = BoundarySession::from_record(&record, &EngineConfig::default()).unwrap();

    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(session.vertices().len(), 4);
    assert!(session.area() > 2.9 && session.area() < 3.1);
}

#[test]
fn test_commit_produces_record() {
    let mut session = closed_session();
    let record = session.commit().unwrap();

    assert_eq!(session.state(), SessionState::Committed);
    assert_eq!(record.area_unit, AreaUnit::Acres);
    assert_eq!(record.total_area, session.area());
    assert_eq!(Some(record.center()), session.center());
    assert_eq!(record.perimeter_m, Some(session.perimeter_m()));
    assert!(record.committed_at.is_some());
    assert_eq!(record.boundaries.coordinates[0].len(), 5);

    // Committed is terminal.
    assert!(matches!(
        session.commit(),
        Err(BoundaryError::InvalidTransition { .. })
    ));
    assert!(session.cancel().is_err());
    assert!(session.set_unit(AreaUnit::Hectares).is_err());
}

#[test]
fn test_drag_vertex() {
    let mut session = closed_session();
    let before = session.area();

    session.begin_drag(2).unwrap();
    assert_eq!(session.state(), SessionState::Editing);
    session.drag_to(Coordinate::new(77.002, 12.002)).unwrap();
    assert_eq!(session.area(), before);

    session.release_drag().unwrap();
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.area() > before);
    assert_eq!(
        session.polygon().map(|p| p.vertices()[2]),
        Some(Coordinate::new(77.002, 12.002))
    );
    assert_eq!(session.undo_description().as_deref(), Some("Move vertex"));
}

#[test]
fn test_invalid_drag_reverts() {
    let mut session = BoundarySession::default();
    draw(&mut session, &SQUARE[..3]);
    session.close_ring().unwrap();
    let polygon = session.polygon().cloned();

    session.begin_drag(1).unwrap();
    session.drag_to(Coordinate::new(77.0, 12.0)).unwrap();
    assert!(matches!(
        session.release_drag(),
        Err(BoundaryError::Validation(ValidationError::TooFewVertices { .. }))
    ));
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(session.polygon().cloned(), polygon);
    assert!(session.last_error().is_some());
    assert!(!session.can_undo());
}

#[test]
fn test_out_of_range_drag_reverts() {
    let mut session = closed_session();
    let area = session.area();
    session.begin_drag(0).unwrap();
    session.drag_to(Coordinate::new(77.0, 95.0)).unwrap();
    assert!(session.release_drag().is_err());
    assert_eq!(session.area(), area);
}

#[test]
fn test_cancel_drag_keeps_polygon() {
    let mut session = closed_session();
    let polygon = session.polygon().cloned();
    session.begin_drag(0).unwrap();
    session.drag_to(Coordinate::new(76.9, 11.9)).unwrap();
    assert_eq!(session.vertices()[0], Coordinate::new(76.9, 11.9));

    session.cancel_drag().unwrap();
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(session.polygon().cloned(), polygon);
}

#[test]
fn test_drag_index_checked() {
    let mut session = closed_session();
    assert!(matches!(
        session.begin_drag(4),
        Err(BoundaryError::VertexIndex { index: 4, len: 4 })
    ));
    assert_eq!(session.state(), SessionState::Closed);
}

#[test]
fn test_insert_and_remove_vertex() {
    let mut session = closed_session();
    let before = session.area();

    // Push the top edge out with a new vertex.
    session
        .insert_vertex(1, Coordinate::new(77.0005, 12.0015))
        .unwrap();
    assert_eq!(session.vertices().len(), 5);
    assert!(session.area() > before);

    session.remove_vertex(2).unwrap();
    assert_eq!(session.vertices().len(), 4);
    assert!(rel_eq(session.area(), before));
}

#[test]
fn test_remove_below_minimum_rejected() {
    let mut session = BoundarySession::default();
    draw(&mut session, &SQUARE[..3]);
    session.close_ring().unwrap();

    assert!(matches!(
        session.remove_vertex(0),
        Err(BoundaryError::Validation(ValidationError::TooFewVertices { distinct: 2 }))
    ));
    assert_eq!(session.vertices().len(), 3);
}

#[test]
fn test_undo_redo() {
    let mut session = closed_session();
    let original_area = session.area();

    session.set_unit(AreaUnit::Hectares).unwrap();
    session.remove_vertex(3).unwrap();
    let triangle_area = session.area();
    assert!(session.can_undo());

    assert!(session.undo().unwrap());
    assert_eq!(session.vertices().len(), 4);
    assert_eq!(session.area_unit(), AreaUnit::Hectares);

    assert!(session.undo().unwrap());
    assert_eq!(session.area_unit(), AreaUnit::Acres);
    assert!(rel_eq(session.area(), original_area));
    assert!(!session.undo().unwrap());

    assert!(session.redo().unwrap());
    assert!(session.redo().unwrap());
    assert!(rel_eq(session.area(), triangle_area));
    assert!(!session.can_redo());
}

#[test]
fn test_history_limit_from_config() {
    let config = EngineConfig::new().with_history_limit(1);
    let mut session = BoundarySession::new(&config);
    draw(&mut session, &SQUARE);
    session.close_ring().unwrap();

    session.set_unit(AreaUnit::Hectares).unwrap();
    session.set_unit(AreaUnit::Bigha).unwrap();
    assert!(session.undo().unwrap());
    assert!(!session.undo().unwrap());
    assert_eq!(session.area_unit(), AreaUnit::Hectares);
}

#[test]
fn test_clear_returns_to_empty() {
    let mut session = closed_session();
    session.set_unit(AreaUnit::Hectares).unwrap();
    session.clear().unwrap();

    assert_eq!(session.state(), SessionState::Empty);
    assert!(session.polygon().is_none());
    assert_eq!(session.area(), 0.0);
    assert!(!session.can_undo());
    // The unit selection survives a clear.
    assert_eq!(session.area_unit(), AreaUnit::Hectares);

    assert!(matches!(
        session.clear(),
        Err(BoundaryError::InvalidTransition { .. })
    ));
}

#[test]
fn test_cancel_discards_draft() {
    let mut session = BoundarySession::default();
    draw(&mut session, &SQUARE);
    session.cancel().unwrap();

    assert_eq!(session.state(), SessionState::Cancelled);
    assert!(session.vertices().is_empty());
    assert!(session.start_drawing().is_err());
    assert!(session.undo().is_err());
}

#[test]
fn test_cancel_while_editing() {
    let mut session = closed_session();
    session.begin_drag(0).unwrap();
    session.cancel().unwrap();
    assert_eq!(session.state(), SessionState::Cancelled);
    assert!(!session.is_valid());
}

#[test]
fn test_actions_rejected_in_wrong_state() {
    let mut session = BoundarySession::default();
    assert!(matches!(
        session.add_vertex(Coordinate::new(77.0, 12.0)),
        Err(BoundaryError::InvalidTransition {
            action: "add vertex",
            state: "Empty"
        })
    ));
    assert!(session.close_ring().is_err());
    assert!(session.begin_drag(0).is_err());
    assert!(session.release_drag().is_err());

    let mut session = closed_session();
    session.begin_drag(0).unwrap();
    assert!(session.set_unit(AreaUnit::Hectares).is_err());
    assert!(session.commit().is_err());
    assert!(session.undo().is_err());
}

#[test]
fn test_apply_external_boundary() {
    let mut session = BoundarySession::default();
    session
        .apply_external(Some(Ring::from_lon_lat(&SQUARE)))
        .unwrap();
    assert_eq!(session.state(), SessionState::Closed);
    assert!(!session.can_undo());

    let triangle = Ring::from_lon_lat(&SQUARE[..3]);
    session.apply_external(Some(triangle)).unwrap();
    assert_eq!(session.vertices().len(), 3);
    assert_eq!(
        session.undo_description().as_deref(),
        Some("Replace boundary")
    );

    session.apply_external(None).unwrap();
    assert_eq!(session.state(), SessionState::Empty);
    assert!(!session.is_valid());
}

#[test]
fn test_apply_external_invalid_ring() {
    let mut session = closed_session();
    let polygon = session.polygon().cloned();
    let bad = Ring::from_lon_lat(&[(77.0, 12.0), (f64::NAN, 12.0), (77.001, 12.001)]);

    assert!(matches!(
        session.apply_external(Some(bad)),
        Err(BoundaryError::Validation(ValidationError::NonFinite { index: 1 }))
    ));
    assert_eq!(session.polygon().cloned(), polygon);
}

#[test]
fn test_area_weighted_center_from_config() {
    let config = EngineConfig::new().with_centroid_method(CentroidMethod::AreaWeighted);
    let mut session = BoundarySession::new(&config);
    draw(&mut session, &SQUARE);
    session.close_ring().unwrap();

    let center = session.center().unwrap();
    assert!((center.lon - 77.0005).abs() < 1.0e-9);
    assert!((center.lat - 12.0005).abs() < 1.0e-9);
}

#[test]
fn test_reopen_from_record() {
    let mut session = closed_session();
    session.set_unit(AreaUnit::Hectares).unwrap();
    let record = session.commit().unwrap();

    let reopened = BoundarySession::from_record(&record, &EngineConfig::default()).unwrap();
    assert_eq!(reopened.state(), SessionState::Closed);
    assert_eq!(reopened.area_unit(), AreaUnit::Hectares);
    assert!(rel_eq(reopened.area(), record.total_area));
    assert_eq!(reopened.polygon(), session.polygon());
}

#[test]
fn test_snapshot() {
    let mut session = BoundarySession::default();
    draw(&mut session, &SQUARE[..2]);
    let drawing = session.snapshot();
    assert_eq!(drawing.state, SessionState::Drawing);
    assert_eq!(drawing.vertex_count, 2);
    assert!(!drawing.is_valid);
    assert_eq!(drawing.formatted_center, None);

    let session = closed_session();
    let snapshot = session.snapshot();
    assert_eq!(snapshot.state, SessionState::Closed);
    assert_eq!(snapshot.vertex_count, 4);
    assert!(snapshot.is_valid);
    assert_eq!(snapshot.formatted_area, session.formatted_area());

    let value = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(value["state"], "closed");
    assert_eq!(value["area_unit"], "acres");
}
