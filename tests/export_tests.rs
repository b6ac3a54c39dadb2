use routesmith::{
    export,
    path::{Path, Waypoint},
    schedule::{FrequencySpec, StopTimeBaseline, expand},
    shared::Coordinate,
};

fn sample_path() -> Path {
    Path::new()
        .with(Coordinate::new(0.0, 0.0))
        .with(Coordinate::new(0.0, 1.0))
        .with(Waypoint::new(Coordinate::new(-41.2865, 174.7762)).with_label("Wellington"))
}

fn positions(haystack: &str, needles: &[&str]) -> Vec<usize> {
    needles
        .iter()
        .map(|needle| {
            haystack
                .find(needle)
                .unwrap_or_else(|| panic!("{needle} missing from\n{haystack}"))
        })
        .collect()
}

#[test]
fn delimited_shapes() {
    let path = Path::new()
        .with(Coordinate::new(0.0, 0.0))
        .with(Coordinate::new(0.0, 1.0));
    let records = path.finalize("route-1").unwrap();
    let text = export::to_delimited_shapes(&records).unwrap();
    assert_eq!(
        text,
        "shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence,shape_dist_traveled\n\
         route-1,0,0,1,0.0000\n\
         route-1,0,1,2,111.1949\n"
    );
}

#[test]
fn delimited_shapes_keep_decimal_coordinates() {
    let records = sample_path().finalize("r").unwrap();
    let text = export::to_delimited_shapes(&records).unwrap();
    let last = text.lines().last().unwrap();
    assert!(last.starts_with("r,-41.2865,174.7762,3,"), "{last}");
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn track_xml_keeps_waypoint_order() {
    let text = export::to_track_xml(&sample_path(), "Route 1", "Harbour loop").unwrap();
    assert!(text.starts_with("<?xml"));
    assert!(text.contains("<gpx version=\"1.1\""));
    assert!(text.contains("<name>Route 1</name>"));
    assert!(text.contains("<desc>Harbour loop</desc>"));

    let order = positions(
        &text,
        &[
            r#"<trkpt lat="0" lon="0"/>"#,
            r#"<trkpt lat="0" lon="1"/>"#,
            r#"<trkpt lat="-41.2865" lon="174.7762">"#,
        ],
    );
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(text.contains("<name>Wellington</name>"));
    assert_eq!(text.matches("<trkpt").count(), 3);
}

#[test]
fn track_xml_does_not_deduplicate() {
    let path = Path::new()
        .with(Coordinate::new(1.0, 1.0))
        .with(Coordinate::new(1.0, 1.0));
    let text = export::to_track_xml(&path, "t", "d").unwrap();
    assert_eq!(text.matches(r#"<trkpt lat="1" lon="1"/>"#).count(), 2);
}

#[test]
fn placemark_xml_writes_lon_lat_triples() {
    let text = export::to_placemark_xml(&sample_path(), "Route 1", "Harbour loop").unwrap();
    assert!(text.contains("xmlns=\"http://www.opengis.net/kml/2.2\""));
    assert!(text.contains("<description>Harbour loop</description>"));
    assert!(text.contains("0,0,0 1,0,0 174.7762,-41.2865,0"));
    assert_eq!(text.matches("<Placemark>").count(), 1);
}

#[test]
fn xml_text_is_escaped() {
    let path = Path::new()
        .with(Coordinate::new(0.0, 0.0))
        .with(Coordinate::new(0.0, 1.0));
    let gpx = export::to_track_xml(&path, "Bus & Rail", "<express>").unwrap();
    assert!(gpx.contains("Bus &amp; Rail"));
    assert!(gpx.contains("&lt;express&gt;"));
    let kml = export::to_placemark_xml(&path, "Bus & Rail", "").unwrap();
    assert!(kml.contains("Bus &amp; Rail"));
}

#[test]
fn delimited_stop_times() {
    let baseline = vec![
        StopTimeBaseline::from_hm("S1", "Central, North", "22:00", "22:01").unwrap(),
    ];
    let expanded = expand(&baseline, &FrequencySpec::uniform(60)).unwrap();
    let text = export::to_delimited_stop_times(&expanded).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "stop_id,stop_name,weekday,arrival_time,departure_time"
    );
    assert_eq!(lines[1], "S1,\"Central, North\",monday,22:00,22:01");
    assert_eq!(lines[2], "S1,\"Central, North\",monday,23:00,23:01");
    assert_eq!(lines[3], "S1,\"Central, North\",tuesday,22:00,22:01");
    assert_eq!(lines.len(), 1 + 2 * 7);
}
