use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use flightmap_core::config::AppConfig;
use flightmap_core::controller::ViewController;
use flightmap_core::engine::MapEngine;
use flightmap_core::error::{FlightMapError, Result};
use flightmap_core::export::{PixelBuffer, PixelFormat};
use flightmap_core::layer::{KmlLayer, LayerId};
use flightmap_core::overlay::OverlayKind;
use flightmap_core::picker::{FilePicker, PickRequest, PickedFile};
use flightmap_core::viewpoint::Viewpoint;

/// One call made against a [`RecordingEngine`].
#[derive(Clone, Debug, PartialEq)]
pub enum EngineCall {
    SetViewpoint(Viewpoint, Duration),
    Export,
    AddLayer(LayerId),
    RemoveLayer(LayerId),
}

/// In-memory map engine that records every call and serves a fixed frame.
pub struct RecordingEngine {
    pub calls: Vec<EngineCall>,
    pub layers: Vec<Arc<KmlLayer>>,
    pub frame: PixelBuffer,
}

impl RecordingEngine {
    pub fn new() -> Self {
        // 8x6 frame of BGRA (10, 20, 30, 255), i.e. RGB (30, 20, 10).
        let frame = PixelBuffer::filled(8, 6, PixelFormat::Bgra8888, [10, 20, 30, 255])
            .expect("valid frame");
        Self {
            calls: Vec::new(),
            layers: Vec::new(),
            frame,
        }
    }

    pub fn viewpoints(&self) -> Vec<(Viewpoint, Duration)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                EngineCall::SetViewpoint(vp, d) => Some((*vp, *d)),
                _ => None,
            })
            .collect()
    }

    pub fn layers_of(&self, kind: OverlayKind) -> Vec<&Arc<KmlLayer>> {
        self.layers.iter().filter(|l| l.kind == kind).collect()
    }

    /// Attached layers, bottom to top.
    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(|l| l.id).collect()
    }
}

impl MapEngine for RecordingEngine {
    fn set_viewpoint(&mut self, viewpoint: &Viewpoint, duration: Duration) -> Result<()> {
        self.calls.push(EngineCall::SetViewpoint(*viewpoint, duration));
        Ok(())
    }

    fn export_image(&mut self) -> Result<PixelBuffer> {
        self.calls.push(EngineCall::Export);
        Ok(self.frame.clone())
    }

    fn add_layer(&mut self, layer: Arc<KmlLayer>) -> Result<()> {
        self.calls.push(EngineCall::AddLayer(layer.id));
        self.layers.push(layer);
        Ok(())
    }

    fn remove_layer(&mut self, id: LayerId) -> Result<bool> {
        self.calls.push(EngineCall::RemoveLayer(id));
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        Ok(self.layers.len() != before)
    }
}

/// Picker that answers from a queue; `None` entries (and an empty queue)
/// behave like the user cancelling.
pub struct ScriptedPicker {
    responses: VecDeque<Option<PathBuf>>,
    pub requests: Vec<PickRequest>,
}

impl ScriptedPicker {
    pub fn new(responses: Vec<Option<PathBuf>>) -> Self {
        Self {
            responses: responses.into(),
            requests: Vec::new(),
        }
    }
}

impl FilePicker for ScriptedPicker {
    fn pick_file(&mut self, request: &PickRequest) -> Result<Option<PickedFile>> {
        self.requests.push(request.clone());
        Ok(self
            .responses
            .pop_front()
            .flatten()
            .map(PickedFile::from_path))
    }
}

/// Picker whose dialog always fails.
pub struct BrokenPicker;

impl FilePicker for BrokenPicker {
    fn pick_file(&mut self, _request: &PickRequest) -> Result<Option<PickedFile>> {
        Err(FlightMapError::Io(std::io::Error::other("dialog unavailable")))
    }
}

pub type TestController = ViewController<RecordingEngine, ScriptedPicker, StdRng>;

/// Controller with a seeded RNG, default config, and cache/output paths in `dir`.
pub fn controller(dir: &Path, picks: Vec<Option<PathBuf>>) -> TestController {
    ViewController::new(
        RecordingEngine::new(),
        ScriptedPicker::new(picks),
        StdRng::seed_from_u64(7),
        AppConfig::default(),
    )
    .with_cache_dir(dir.join("cache"))
    .with_output_path(dir.join("pictures").join("MyImage.png"))
}

/// Write a KML file into `dir` and return its path.
pub fn write_kml(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write KML fixture");
    path
}

/// KML with one named line string through `coords` (lon, lat).
pub fn flight_path_kml(name: &str, coords: &[(f64, f64)]) -> String {
    let tuples: Vec<String> = coords
        .iter()
        .map(|(lon, lat)| format!("{lon},{lat},1000"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>{name}</name>
    <Style id="track">
      <LineStyle><color>ff0000ff</color><width>4</width></LineStyle>
    </Style>
    <Placemark>
      <name>Leg 1</name>
      <styleUrl>#track</styleUrl>
      <LineString>
        <coordinates>
          {}
        </coordinates>
      </LineString>
    </Placemark>
  </Document>
</kml>"#,
        tuples.join("\n          ")
    )
}

/// KML with one polygon whose outer ring is `ring` (lon, lat).
pub fn coverage_kml(name: &str, ring: &[(f64, f64)]) -> String {
    let tuples: Vec<String> = ring
        .iter()
        .map(|(lon, lat)| format!("{lon},{lat},0"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>{name}</name>
    <Placemark>
      <name>Footprint</name>
      <Polygon>
        <outerBoundaryIs>
          <LinearRing>
            <coordinates>{}</coordinates>
          </LinearRing>
        </outerBoundaryIs>
      </Polygon>
    </Placemark>
  </Document>
</kml>"#,
        tuples.join(" ")
    )
}

/// A valid KML document with no geometry.
pub const EMPTY_KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>Nothing here</name>
  </Document>
</kml>"#;
