mod common;

use flightmap_core::error::FlightMapError;
use flightmap_core::geo::GeoPoint;
use flightmap_core::kml::{KmlDocument, KmlGeometry, KmlStyle, LineStyle};

use common::{coverage_kml, flight_path_kml, write_kml, EMPTY_KML};

fn parse(input: &str) -> KmlDocument {
    input.parse().unwrap()
}

#[test]
fn test_line_string_with_shared_style() {
    let doc = parse(&flight_path_kml("Morning Flight", &[(-122.4, 37.6), (-118.4, 33.9)]));
    assert_eq!(doc.name.as_deref(), Some("Morning Flight"));
    assert_eq!(doc.placemarks.len(), 1);
    assert_eq!(doc.geometry_count(), 1);

    let pm = &doc.placemarks[0];
    assert_eq!(pm.name.as_deref(), Some("Leg 1"));
    match &pm.geometries[0] {
        KmlGeometry::LineString(ls) => {
            assert_eq!(ls.0.len(), 2);
            assert_eq!(ls.0[0].x, -122.4);
            assert_eq!(ls.0[0].y, 37.6);
        }
        other => panic!("expected line string, got {other:?}"),
    }

    let style = doc.style_for(pm).expect("style resolved");
    let line = style.line.expect("line style");
    assert_eq!(line.color, [255, 0, 0, 255]);
    assert_eq!(line.width, 4.0);
    assert!(style.poly.is_none());
}

#[test]
fn test_extent_covers_all_geometry() {
    let doc = parse(&flight_path_kml("f", &[(10.0, 50.0), (12.5, 48.0), (11.0, 52.25)]));
    let extent = doc.extent().unwrap();
    assert_eq!(extent.min, GeoPoint::new(48.0, 10.0));
    assert_eq!(extent.max, GeoPoint::new(52.25, 12.5));
}

#[test]
fn test_polygon_with_hole() {
    let input = r#"<kml><Placemark>
        <Polygon>
          <outerBoundaryIs><LinearRing><coordinates>
            0,0 10,0 10,10 0,10 0,0
          </coordinates></LinearRing></outerBoundaryIs>
          <innerBoundaryIs><LinearRing><coordinates>
            2,2 4,2 4,4 2,2
          </coordinates></LinearRing></innerBoundaryIs>
        </Polygon>
    </Placemark></kml>"#;
    let doc = parse(input);
    match &doc.placemarks[0].geometries[0] {
        KmlGeometry::Polygon(poly) => {
            assert_eq!(poly.exterior().0.len(), 5);
            assert_eq!(poly.interiors().len(), 1);
        }
        other => panic!("expected polygon, got {other:?}"),
    }
}

#[test]
fn test_coverage_fixture_parses_as_polygon() {
    let doc = parse(&coverage_kml("Area", &[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 1.0)]));
    assert_eq!(doc.geometry_count(), 1);
    assert!(matches!(doc.placemarks[0].geometries[0], KmlGeometry::Polygon(_)));
}

#[test]
fn test_multi_geometry_in_folders() {
    let input = r#"<kml><Document><Folder><Folder>
        <Placemark>
          <MultiGeometry>
            <Point><coordinates>5,5</coordinates></Point>
            <LineString><coordinates>0,0 1,1</coordinates></LineString>
          </MultiGeometry>
        </Placemark>
        <Placemark><Point><coordinates>-5,-5,12</coordinates></Point></Placemark>
    </Folder></Folder></Document></kml>"#;
    let doc = parse(input);
    assert_eq!(doc.placemarks.len(), 2);
    assert_eq!(doc.placemarks[0].geometries.len(), 2);
    assert_eq!(doc.geometry_count(), 3);
    let extent = doc.extent().unwrap();
    assert_eq!(extent.min, GeoPoint::new(-5.0, -5.0));
    assert_eq!(extent.max, GeoPoint::new(5.0, 5.0));
}

#[test]
fn test_gx_track_becomes_line_string() {
    let input = r#"<kml xmlns:gx="http://www.google.com/kml/ext/2.2"><Placemark>
        <gx:Track>
          <when>2024-01-01T00:00:00Z</when>
          <when>2024-01-01T00:01:00Z</when>
          <gx:coord>-122.1 37.4 150</gx:coord>
          <gx:coord>-122.2 37.5 300</gx:coord>
        </gx:Track>
    </Placemark></kml>"#;
    let doc = parse(input);
    match &doc.placemarks[0].geometries[0] {
        KmlGeometry::LineString(ls) => {
            assert_eq!(ls.0.len(), 2);
            assert_eq!(ls.0[1].x, -122.2);
            assert_eq!(ls.0[1].y, 37.5);
        }
        other => panic!("expected line string, got {other:?}"),
    }
}

#[test]
fn test_coordinates_accept_any_whitespace() {
    let input = "<kml><Placemark><LineString><coordinates>\n\t1,2,3\t\t4,5\r\n  6,7,8  </coordinates></LineString></Placemark></kml>";
    let doc = parse(input);
    match &doc.placemarks[0].geometries[0] {
        KmlGeometry::LineString(ls) => assert_eq!(ls.0.len(), 3),
        other => panic!("expected line string, got {other:?}"),
    }
}

#[test]
fn test_style_map_and_inline_style() {
    let input = r#"<kml><Document>
        <Style id="area"><PolyStyle><color>40ff8800</color><outline>0</outline></PolyStyle></Style>
        <StyleMap id="areaMap">
          <Pair><key>normal</key><styleUrl>#area</styleUrl></Pair>
          <Pair><key>highlight</key><styleUrl>#other</styleUrl></Pair>
        </StyleMap>
        <Placemark><styleUrl>#areaMap</styleUrl><Point><coordinates>0,0</coordinates></Point></Placemark>
        <Placemark>
          <Style><LineStyle><color>ff00ff00</color></LineStyle></Style>
          <Point><coordinates>1,1</coordinates></Point>
        </Placemark>
    </Document></kml>"#;
    let doc = parse(input);

    let mapped = doc.style_for(&doc.placemarks[0]).unwrap();
    let poly = mapped.poly.unwrap();
    assert_eq!(poly.color, [0, 136, 255, 64]);
    assert!(poly.fill);
    assert!(!poly.outline);

    let inline = doc.style_for(&doc.placemarks[1]).unwrap();
    assert_eq!(inline.line.unwrap().color, [0, 255, 0, 255]);
    // Inline styles do not leak into the shared table.
    assert_eq!(doc.styles.len(), 1);
}

#[test]
fn test_style_for_placemark_held_outside_document() {
    let doc = parse(&flight_path_kml("f", &[(0.0, 0.0), (1.0, 1.0)]));
    let shared = doc.placemarks[0].clone();
    assert_eq!(doc.style_for(&shared).and_then(|s| s.line).unwrap().width, 4.0);

    let mut inline = shared;
    inline.style_url = None;
    inline.inline_style = Some(KmlStyle {
        line: Some(LineStyle {
            color: [1, 2, 3, 4],
            width: 9.0,
        }),
        poly: None,
    });
    let style = doc.style_for(&inline).unwrap();
    assert_eq!(style.line.unwrap().width, 9.0);
}

#[test]
fn test_text_entities_and_cdata() {
    let input = r#"<kml><Document><name>Alpha &amp; Beta</name>
        <Placemark><description><![CDATA[<b>bold</b>]]></description></Placemark>
    </Document></kml>"#;
    let doc = parse(input);
    assert_eq!(doc.name.as_deref(), Some("Alpha & Beta"));
    assert_eq!(doc.placemarks[0].description.as_deref(), Some("<b>bold</b>"));
}

#[test]
fn test_bad_tuple_is_named_in_error() {
    let input = "<kml><Placemark><LineString><coordinates>1,2 3;4</coordinates></LineString></Placemark></kml>";
    match input.parse::<KmlDocument>() {
        Err(FlightMapError::InvalidKml(msg)) => assert!(msg.contains("3;4"), "{msg}"),
        other => panic!("expected InvalidKml, got {other:?}"),
    }
}

#[test]
fn test_out_of_range_latitude_rejected() {
    let input = "<kml><Placemark><Point><coordinates>10,95</coordinates></Point></Placemark></kml>";
    assert!(matches!(
        input.parse::<KmlDocument>(),
        Err(FlightMapError::InvalidKml(_))
    ));
}

#[test]
fn test_mismatched_tags_are_xml_errors() {
    let input = "<kml><Document></kml>";
    assert!(matches!(
        input.parse::<KmlDocument>(),
        Err(FlightMapError::Xml(_))
    ));
}

#[test]
fn test_empty_document() {
    let doc = parse(EMPTY_KML);
    assert_eq!(doc.name.as_deref(), Some("Nothing here"));
    assert_eq!(doc.geometry_count(), 0);
    assert!(doc.extent().is_none());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_kml(dir.path(), "route.kml", &flight_path_kml("Route", &[(0.0, 0.0), (1.0, 1.0)]));
    let doc = KmlDocument::load(&path).unwrap();
    assert_eq!(doc.name.as_deref(), Some("Route"));

    let missing = dir.path().join("missing.kml");
    assert!(matches!(KmlDocument::load(&missing), Err(FlightMapError::Io(_))));
}
