use std::io::{self, Cursor};

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesText, Event},
};

use crate::path::{Path, Waypoint};

use super::{CREATOR, Error, into_string};

const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";

/// Renders the path as a GPX 1.1 track with one `<trkpt>` per waypoint, in path order.
pub fn to_track_xml(path: &Path, title: &str, description: &str) -> Result<String, Error> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer
        .create_element("gpx")
        .with_attribute(("version", "1.1"))
        .with_attribute(("creator", CREATOR))
        .with_attribute(("xmlns", GPX_NAMESPACE))
        .write_inner_content(|writer| {
            writer.create_element("trk").write_inner_content(|writer| {
                writer
                    .create_element("name")
                    .write_text_content(BytesText::new(title))?;
                writer
                    .create_element("desc")
                    .write_text_content(BytesText::new(description))?;
                writer.create_element("trkseg").write_inner_content(|writer| {
                    for waypoint in path.waypoints() {
                        write_track_point(writer, waypoint)?;
                    }
                    Ok::<(), io::Error>(())
                })?;
                Ok::<(), io::Error>(())
            })?;
            Ok::<(), io::Error>(())
        })?;
    into_string(writer.into_inner().into_inner())
}

fn write_track_point(writer: &mut Writer<Cursor<Vec<u8>>>, waypoint: &Waypoint) -> io::Result<()> {
    let latitude = waypoint.coordinate.latitude.to_string();
    let longitude = waypoint.coordinate.longitude.to_string();
    let element = writer
        .create_element("trkpt")
        .with_attribute(("lat", latitude.as_str()))
        .with_attribute(("lon", longitude.as_str()));
    match &waypoint.label {
        Some(label) => {
            element.write_inner_content(|writer| {
                writer
                    .create_element("name")
                    .write_text_content(BytesText::new(label))?;
                Ok::<(), io::Error>(())
            })?;
        }
        None => {
            element.write_empty()?;
        }
    }
    Ok(())
}
