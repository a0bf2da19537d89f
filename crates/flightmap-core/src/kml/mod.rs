//! Minimal KML reader: placemarks, their geometries and the styles they use.

pub mod parser;
pub mod style;

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use geo_types::{Coord, LineString, Point, Polygon};

use crate::error::{FlightMapError, Result};
use crate::geo::{GeoExtent, GeoPoint};

pub use style::{KmlStyle, LineStyle, PolyStyle};

#[derive(Clone, Debug, PartialEq)]
pub enum KmlGeometry {
    Point(Point<f64>),
    LineString(LineString<f64>),
    Polygon(Polygon<f64>),
}

impl KmlGeometry {
    /// Vertices of the geometry. Polygon holes lie inside the exterior, so
    /// only the exterior ring is yielded.
    pub fn coords(&self) -> Box<dyn Iterator<Item = Coord<f64>> + '_> {
        match self {
            KmlGeometry::Point(p) => Box::new(std::iter::once(p.0)),
            KmlGeometry::LineString(ls) => Box::new(ls.0.iter().copied()),
            KmlGeometry::Polygon(poly) => Box::new(poly.exterior().0.iter().copied()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Placemark {
    pub name: Option<String>,
    pub description: Option<String>,
    pub style_url: Option<String>,
    /// `<Style>` declared inside the placemark itself.
    pub inline_style: Option<KmlStyle>,
    /// A `MultiGeometry` contributes one entry per member.
    pub geometries: Vec<KmlGeometry>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct KmlDocument {
    pub name: Option<String>,
    pub placemarks: Vec<Placemark>,
    /// Shared styles by id.
    pub styles: HashMap<String, KmlStyle>,
    /// `StyleMap` id to the style id of its `normal` pair.
    pub style_maps: HashMap<String, String>,
}

impl FromStr for KmlDocument {
    type Err = FlightMapError;

    fn from_str(input: &str) -> Result<Self> {
        parser::parse_document(input)
    }
}

impl KmlDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Bounding extent of every geometry, `None` for a document without any.
    pub fn extent(&self) -> Option<GeoExtent> {
        GeoExtent::from_points(
            self.geometries()
                .flat_map(KmlGeometry::coords)
                .map(GeoPoint::from),
        )
    }

    pub fn geometries(&self) -> impl Iterator<Item = &KmlGeometry> {
        self.placemarks.iter().flat_map(|p| p.geometries.iter())
    }

    pub fn geometry_count(&self) -> usize {
        self.placemarks.iter().map(|p| p.geometries.len()).sum()
    }

    /// Style applied to a placemark: its inline style, else the shared style
    /// (or style map) its `styleUrl` points at.
    pub fn style_for<'a>(&'a self, placemark: &'a Placemark) -> Option<&'a KmlStyle> {
        if let Some(style) = &placemark.inline_style {
            return Some(style);
        }
        let url = placemark.style_url.as_deref()?;
        let id = url.rsplit_once('#').map_or(url, |(_, id)| id);
        self.styles.get(id).or_else(|| {
            self.style_maps
                .get(id)
                .and_then(|normal| self.styles.get(normal.trim_start_matches('#')))
        })
    }
}
