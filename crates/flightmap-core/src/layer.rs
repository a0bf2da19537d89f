use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::error::Result;
use crate::geo::GeoExtent;
use crate::kml::KmlDocument;
use crate::overlay::OverlayKind;

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a layer attached to the map, unique for the process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    pub fn next() -> Self {
        Self(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// A parsed KML dataset wrapped for display.
#[derive(Clone, Debug)]
pub struct KmlLayer {
    pub id: LayerId,
    pub kind: OverlayKind,
    /// Document name, or the file stem when the document has none.
    pub name: String,
    /// File the layer was loaded from.
    pub source: PathBuf,
    pub document: KmlDocument,
    /// Full extent of the layer's geometry; `None` when it has none.
    pub extent: Option<GeoExtent>,
}

impl KmlLayer {
    pub fn new(kind: OverlayKind, source: PathBuf, document: KmlDocument) -> Self {
        let name = document
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| {
                source
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| kind.label().to_string());
        let extent = document.extent();
        Self {
            id: LayerId::next(),
            kind,
            name,
            source,
            document,
            extent,
        }
    }

    pub fn from_file(kind: OverlayKind, path: &Path) -> Result<Self> {
        let document = KmlDocument::load(path)?;
        let layer = Self::new(kind, path.to_path_buf(), document);
        debug!(
            id = %layer.id,
            kind = kind.label(),
            placemarks = layer.document.placemarks.len(),
            geometries = layer.document.geometry_count(),
            "Built KML layer"
        );
        Ok(layer)
    }
}
