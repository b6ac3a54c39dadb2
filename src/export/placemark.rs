use std::io::{self, Cursor};

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesText, Event},
};

use crate::path::Path;

use super::{Error, into_string};

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Renders the path as a KML document holding a single `LineString` placemark.
///
/// Coordinates are `lon,lat,0` triples separated by single spaces, in path order.
pub fn to_placemark_xml(path: &Path, title: &str, description: &str) -> Result<String, Error> {
    let coordinates = path
        .coordinates()
        .map(|coordinate| format!("{},{},0", coordinate.longitude, coordinate.latitude))
        .collect::<Vec<_>>()
        .join(" ");

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer
        .create_element("kml")
        .with_attribute(("xmlns", KML_NAMESPACE))
        .write_inner_content(|writer| {
            writer.create_element("Document").write_inner_content(|writer| {
                writer
                    .create_element("name")
                    .write_text_content(BytesText::new(title))?;
                writer
                    .create_element("description")
                    .write_text_content(BytesText::new(description))?;
                writer.create_element("Placemark").write_inner_content(|writer| {
                    writer
                        .create_element("name")
                        .write_text_content(BytesText::new(title))?;
                    writer.create_element("LineString").write_inner_content(|writer| {
                        writer
                            .create_element("coordinates")
                            .write_text_content(BytesText::new(&coordinates))?;
                        Ok::<(), io::Error>(())
                    })?;
                    Ok::<(), io::Error>(())
                })?;
                Ok::<(), io::Error>(())
            })?;
            Ok::<(), io::Error>(())
        })?;
    into_string(writer.into_inner().into_inner())
}
