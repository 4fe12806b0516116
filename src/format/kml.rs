//! KML export and import of farm boundaries.
//!
//! Export writes a single `Placemark` holding the boundary polygon, with the area and center
//! stored as `ExtendedData`. Import reads back the first `coordinates` element of a
//! `LinearRing`, which covers files produced here and by common mapping tools.

use std::io::Write;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::display::{format_area_labeled, format_coordinate};
use crate::error::{BoundaryError, Result};
use crate::format::record::FarmBoundaryRecord;
use crate::model::{Coordinate, Ring};

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Render a committed boundary as a KML document.
pub fn export_kml(record: &FarmBoundaryRecord, name: &str) -> Result<String> {
    let ring = record.boundaries.exterior()?;
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    emit(
        &mut writer,
        Event::Start(BytesStart::new("kml").with_attributes([("xmlns", KML_NAMESPACE)])),
    )?;
    emit(&mut writer, Event::Start(BytesStart::new("Document")))?;
    emit(&mut writer, Event::Start(BytesStart::new("Placemark")))?;

    write_text_element(&mut writer, "name", name)?;
    let description = format!(
        "Area: {}; Center: {}",
        format_area_labeled(record.total_area, record.area_unit, 2),
        format_coordinate(&record.center())
    );
    write_text_element(&mut writer, "description", &description)?;

    emit(&mut writer, Event::Start(BytesStart::new("ExtendedData")))?;
    write_data(&mut writer, "total_area", &record.total_area.to_string())?;
    write_data(&mut writer, "area_unit", record.area_unit.key())?;
    write_data(&mut writer, "gps_latitude", &record.gps_latitude.to_string())?;
    write_data(&mut writer, "gps_longitude", &record.gps_longitude.to_string())?;
    if let Some(perimeter) = record.perimeter_m {
        write_data(&mut writer, "perimeter_m", &perimeter.to_string())?;
    }
    emit(&mut writer, Event::End(BytesEnd::new("ExtendedData")))?;

    emit(&mut writer, Event::Start(BytesStart::new("Polygon")))?;
    emit(&mut writer, Event::Start(BytesStart::new("outerBoundaryIs")))?;
    emit(&mut writer, Event::Start(BytesStart::new("LinearRing")))?;
    let coordinates = ring
        .coords()
        .iter()
        .map(|c| format!("{},{},0", c.lon, c.lat))
        .collect::<Vec<_>>()
        .join(" ");
    write_text_element(&mut writer, "coordinates", &coordinates)?;
    emit(&mut writer, Event::End(BytesEnd::new("LinearRing")))?;
    emit(&mut writer, Event::End(BytesEnd::new("outerBoundaryIs")))?;
    emit(&mut writer, Event::End(BytesEnd::new("Polygon")))?;

    emit(&mut writer, Event::End(BytesEnd::new("Placemark")))?;
    emit(&mut writer, Event::End(BytesEnd::new("Document")))?;
    emit(&mut writer, Event::End(BytesEnd::new("kml")))?;

    log::debug!(
        "Exported boundary '{}' with {} positions to KML",
        name,
        ring.len()
    );

    String::from_utf8(writer.into_inner())
        .map_err(|_| BoundaryError::invalid_format("Invalid UTF-8 in KML"))
}

/// Read the first `LinearRing` from a KML document.
pub fn import_kml(xml: &str) -> Result<Ring> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut in_ring = false;
    let mut in_coordinates = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"LinearRing" => in_ring = true,
                b"coordinates" if in_ring => in_coordinates = true,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"LinearRing" => in_ring = false,
                b"coordinates" => in_coordinates = false,
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_coordinates => {
                let text = e.unescape().map_err(|e| BoundaryError::Xml(e.into()))?;
                let ring = parse_coordinates(&text)?;
                log::debug!("Imported {} positions from KML", ring.len());
                return Ok(ring);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(BoundaryError::Xml(e)),
            _ => {}
        }
    }

    Err(BoundaryError::invalid_format(
        "KML document has no LinearRing coordinates",
    ))
}

/// Parse whitespace separated `lon,lat[,alt]` tuples.
fn parse_coordinates(text: &str) -> Result<Ring> {
    text.split_whitespace()
        .map(|tuple| {
            let mut parts = tuple.split(',');
            let lon = parts.next().and_then(|v| v.trim().parse::<f64>().ok());
            let lat = parts.next().and_then(|v| v.trim().parse::<f64>().ok());
            match (lon, lat) {
                (Some(lon), Some(lat)) => Ok(Coordinate::new(lon, lat)),
                _ => Err(BoundaryError::invalid_format(format!(
                    "Invalid KML coordinate tuple '{}'",
                    tuple
                ))),
            }
        })
        .collect()
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| BoundaryError::Xml(e.into()))
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, value: &str) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(value)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn write_data<W: Write>(writer: &mut Writer<W>, name: &str, value: &str) -> Result<()> {
    emit(
        writer,
        Event::Start(BytesStart::new("Data").with_attributes([("name", name)])),
    )?;
    write_text_element(writer, "value", value)?;
    emit(writer, Event::End(BytesEnd::new("Data")))
}
