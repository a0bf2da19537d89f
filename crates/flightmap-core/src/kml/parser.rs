use geo_types::{Coord, LineString, Point, Polygon};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::style::{parse_bool, parse_color, KmlStyle, LineStyle, PolyStyle};
use super::{KmlDocument, KmlGeometry, Placemark};
use crate::error::{FlightMapError, Result};
use crate::geo::GeoPoint;

/// Parse a complete KML document.
///
/// Elements are matched by local name, so `gx:Track` and `kml:Placemark`
/// are read like their unprefixed forms. Unknown elements are skipped.
pub fn parse_document(input: &str) -> Result<KmlDocument> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut state = ParseState::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => state.start(&e)?,
            Event::Empty(e) => {
                state.start(&e)?;
                state.end()?;
            }
            Event::End(_) => state.end()?,
            Event::Text(t) => state.text.push_str(&t.unescape()?),
            Event::CData(c) => state
                .text
                .push_str(&c.decode().map_err(quick_xml::Error::from)?),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(state.doc)
}

/// Parse a `<coordinates>` body: `lon,lat[,alt]` tuples separated by whitespace.
pub fn parse_coordinates(text: &str) -> Result<Vec<Coord<f64>>> {
    text.split_whitespace().map(parse_tuple).collect()
}

fn parse_tuple(tuple: &str) -> Result<Coord<f64>> {
    let invalid = || FlightMapError::InvalidKml(format!("invalid coordinate tuple '{tuple}'"));
    let mut parts = tuple.split(',');
    let lon = parse_number(parts.next()).ok_or_else(invalid)?;
    let lat = parse_number(parts.next()).ok_or_else(invalid)?;
    // Altitude is optional and unused, but must still be a number when present.
    if let Some(alt) = parts.next() {
        if alt.trim().parse::<f64>().is_err() {
            return Err(invalid());
        }
    }
    if parts.next().is_some() {
        return Err(invalid());
    }
    checked_coord(lon, lat).ok_or_else(invalid)
}

/// Parse a `gx:coord` body: `lon lat [alt]` separated by spaces.
fn parse_track_coord(text: &str) -> Result<Coord<f64>> {
    let invalid = || FlightMapError::InvalidKml(format!("invalid track coordinate '{text}'"));
    let mut parts = text.split_whitespace();
    let lon = parse_number(parts.next()).ok_or_else(invalid)?;
    let lat = parse_number(parts.next()).ok_or_else(invalid)?;
    checked_coord(lon, lat).ok_or_else(invalid)
}

fn parse_number(part: Option<&str>) -> Option<f64> {
    part.and_then(|s| s.trim().parse::<f64>().ok())
}

fn checked_coord(lon: f64, lat: f64) -> Option<Coord<f64>> {
    GeoPoint::new(lat, lon)
        .is_valid()
        .then_some(Coord { x: lon, y: lat })
}

#[derive(Default)]
struct StyleMapBuilder {
    id: String,
    key: Option<String>,
    url: Option<String>,
    normal: Option<String>,
}

#[derive(Default)]
struct PolygonBuilder {
    exterior: Option<LineString<f64>>,
    interiors: Vec<LineString<f64>>,
}

#[derive(Default)]
struct ParseState {
    doc: KmlDocument,
    /// Local names of the open elements.
    path: Vec<String>,
    text: String,
    placemark: Option<Placemark>,
    style: Option<(Option<String>, KmlStyle)>,
    style_map: Option<StyleMapBuilder>,
    polygon: Option<PolygonBuilder>,
    track: Option<Vec<Coord<f64>>>,
}

impl ParseState {
    fn start(&mut self, e: &BytesStart) -> Result<()> {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        match name.as_str() {
            "Placemark" => self.placemark = Some(Placemark::default()),
            "Style" => self.style = Some((attribute(e, "id")?, KmlStyle::default())),
            "StyleMap" => {
                self.style_map = Some(StyleMapBuilder {
                    id: attribute(e, "id")?.unwrap_or_default(),
                    ..Default::default()
                })
            }
            "LineStyle" => {
                if let Some((_, style)) = &mut self.style {
                    style.line.get_or_insert_with(LineStyle::default);
                }
            }
            "PolyStyle" => {
                if let Some((_, style)) = &mut self.style {
                    style.poly.get_or_insert_with(PolyStyle::default);
                }
            }
            "Polygon" => self.polygon = Some(PolygonBuilder::default()),
            "Track" => self.track = Some(Vec::new()),
            _ => {}
        }
        self.path.push(name);
        self.text.clear();
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        let Some(name) = self.path.pop() else {
            return Ok(());
        };
        let text = std::mem::take(&mut self.text);
        let parent = self.path.last().cloned().unwrap_or_default();

        match (name.as_str(), parent.as_str()) {
            ("name", "Placemark") => {
                if let Some(pm) = &mut self.placemark {
                    pm.name = Some(text);
                }
            }
            ("name", "Document") if self.doc.name.is_none() => self.doc.name = Some(text),
            ("description", "Placemark") => {
                if let Some(pm) = &mut self.placemark {
                    pm.description = Some(text);
                }
            }
            ("styleUrl", "Placemark") => {
                if let Some(pm) = &mut self.placemark {
                    pm.style_url = Some(text);
                }
            }
            ("styleUrl", "Pair") => {
                if let Some(map) = &mut self.style_map {
                    map.url = Some(text);
                }
            }
            ("key", "Pair") => {
                if let Some(map) = &mut self.style_map {
                    map.key = Some(text);
                }
            }
            ("Pair", _) => {
                if let Some(map) = &mut self.style_map {
                    let key = map.key.take();
                    let url = map.url.take();
                    if key.as_deref() == Some("normal") {
                        map.normal = url;
                    }
                }
            }
            ("StyleMap", _) => {
                if let Some(map) = self.style_map.take() {
                    if let (false, Some(normal)) = (map.id.is_empty(), map.normal) {
                        let target = normal.rsplit_once('#').map_or(normal.as_str(), |(_, id)| id);
                        self.doc.style_maps.insert(map.id, target.to_string());
                    }
                }
            }
            ("color", "LineStyle") => {
                if let Some(line) = self.current_style().and_then(|s| s.line.as_mut()) {
                    line.color = parse_color(&text)?;
                }
            }
            ("width", "LineStyle") => {
                let width = text.trim().parse::<f32>().map_err(|_| {
                    FlightMapError::InvalidKml(format!("invalid line width '{text}'"))
                })?;
                if let Some(line) = self.current_style().and_then(|s| s.line.as_mut()) {
                    line.width = width;
                }
            }
            ("color", "PolyStyle") => {
                if let Some(poly) = self.current_style().and_then(|s| s.poly.as_mut()) {
                    poly.color = parse_color(&text)?;
                }
            }
            ("fill", "PolyStyle") => {
                if let Some(poly) = self.current_style().and_then(|s| s.poly.as_mut()) {
                    poly.fill = parse_bool(&text)?;
                }
            }
            ("outline", "PolyStyle") => {
                if let Some(poly) = self.current_style().and_then(|s| s.poly.as_mut()) {
                    poly.outline = parse_bool(&text)?;
                }
            }
            ("Style", _) => self.finish_style(parent == "Placemark"),
            ("coordinates", _) => self.finish_coordinates(&text)?,
            ("coord", "Track") => {
                let coord = parse_track_coord(&text)?;
                if let Some(track) = &mut self.track {
                    track.push(coord);
                }
            }
            ("Track", _) => {
                if let Some(track) = self.track.take() {
                    if !track.is_empty() {
                        self.push_geometry(KmlGeometry::LineString(LineString::new(track)));
                    }
                }
            }
            ("Polygon", _) => {
                if let Some(builder) = self.polygon.take() {
                    let exterior = builder.exterior.ok_or_else(|| {
                        FlightMapError::InvalidKml("Polygon without outerBoundaryIs".into())
                    })?;
                    self.push_geometry(KmlGeometry::Polygon(Polygon::new(
                        exterior,
                        builder.interiors,
                    )));
                }
            }
            ("Placemark", _) => {
                if let Some(pm) = self.placemark.take() {
                    self.doc.placemarks.push(pm);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn current_style(&mut self) -> Option<&mut KmlStyle> {
        self.style.as_mut().map(|(_, style)| style)
    }

    fn finish_style(&mut self, inline: bool) {
        let Some((id, style)) = self.style.take() else {
            return;
        };
        if inline {
            if let Some(pm) = &mut self.placemark {
                pm.inline_style = Some(style);
                return;
            }
        }
        if let Some(id) = id {
            self.doc.styles.insert(id, style);
        }
    }

    fn finish_coordinates(&mut self, text: &str) -> Result<()> {
        let coords = parse_coordinates(text)?;
        let depth = self.path.len();
        let parent = self.path.last().cloned().unwrap_or_default();
        let grandparent = depth
            .checked_sub(2)
            .and_then(|i| self.path.get(i))
            .cloned()
            .unwrap_or_default();

        match parent.as_str() {
            "Point" => {
                let first = coords.first().copied().ok_or_else(|| {
                    FlightMapError::InvalidKml("Point without coordinates".into())
                })?;
                self.push_geometry(KmlGeometry::Point(Point(first)));
            }
            "LineString" if !coords.is_empty() => {
                self.push_geometry(KmlGeometry::LineString(LineString::new(coords)));
            }
            "LinearRing" if !coords.is_empty() => {
                // LineString::new leaves rings open; Polygon::new closes them.
                let ring = LineString::new(coords);
                match (grandparent.as_str(), self.polygon.as_mut()) {
                    ("outerBoundaryIs", Some(poly)) => poly.exterior = Some(ring),
                    ("innerBoundaryIs", Some(poly)) => poly.interiors.push(ring),
                    _ => self.push_geometry(KmlGeometry::Polygon(Polygon::new(ring, vec![]))),
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Geometries outside a placemark have nothing to render them.
    fn push_geometry(&mut self, geometry: KmlGeometry) {
        if let Some(pm) = &mut self.placemark {
            pm.geometries.push(geometry);
        }
    }
}

fn attribute(e: &BytesStart, name: &str) -> Result<Option<String>> {
    let attr = e
        .try_get_attribute(name)
        .map_err(quick_xml::Error::from)?;
    match attr {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}
