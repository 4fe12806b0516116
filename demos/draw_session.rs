//! Walk a boundary session from first tap to KML export, logging every transition.
//!
//! Run with `cargo run --example draw_session`. Set `RUST_LOG` to override the level from
//! the config, e.g. `RUST_LOG=trace`.

use farm_boundary::format::export_kml;
use farm_boundary::{AreaUnit, BoundarySession, Coordinate, EngineConfig, LogLevel};

fn main() -> farm_boundary::Result<()> {
    let mut config = EngineConfig::new().with_default_unit(AreaUnit::Acres);
    config.log_level = LogLevel::Debug;

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let mut session = BoundarySession::new(&config);
    session.start_drawing()?;
    for (lon, lat) in [
        (77.0000, 12.0000),
        (77.0000, 12.0010),
        (77.0010, 12.0010),
        (77.0010, 12.0000),
    ] {
        session.add_vertex(Coordinate::new(lon, lat))?;
    }
    session.close_ring()?;
    print_status(&session);

    session.set_unit(AreaUnit::Hectares)?;
    print_status(&session);

    // Pull the north-east corner out a little.
    session.begin_drag(2)?;
    session.drag_to(Coordinate::new(77.0012, 12.0012))?;
    session.release_drag()?;
    print_status(&session);

    if let Some(description) = session.undo_description() {
        println!("Undo available: {}", description);
    }

    let record = session.commit()?;
    println!("{}", record.to_json()?);
    println!("{}", export_kml(&record, "North field")?);
    Ok(())
}

fn print_status(session: &BoundarySession) {
    println!(
        "[{}] area {} {}, center {}, perimeter {:.1} m",
        session.state(),
        session.formatted_area(),
        session.area_unit().symbol(),
        session.formatted_center().unwrap_or_else(|| "-".to_string()),
        session.perimeter_m()
    );
}
