use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::OverlayConfig;
use crate::layer::KmlLayer;

/// The two independent overlay slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlayKind {
    FlightPath,
    Coverage,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 2] = [OverlayKind::FlightPath, OverlayKind::Coverage];

    pub fn label(&self) -> &'static str {
        match self {
            OverlayKind::FlightPath => "Flight Path",
            OverlayKind::Coverage => "Coverage",
        }
    }

    /// Scale of the pull-back phase before zooming to a layer of this kind.
    pub fn zoom_out_scale(&self, config: &OverlayConfig) -> f64 {
        match self {
            OverlayKind::FlightPath => config.flight_path_zoom_out_scale,
            OverlayKind::Coverage => config.coverage_zoom_out_scale,
        }
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Currently loaded overlay of each kind. At most one layer per kind.
#[derive(Clone, Debug, Default)]
pub struct OverlaySlots {
    flight_path: Option<Arc<KmlLayer>>,
    coverage: Option<Arc<KmlLayer>>,
}

impl OverlaySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `layer` in its kind's slot and hand back the layer it displaced.
    pub fn replace(&mut self, layer: Arc<KmlLayer>) -> Option<Arc<KmlLayer>> {
        self.slot_mut(layer.kind).replace(layer)
    }

    /// Empty a slot, returning what it held.
    pub fn take(&mut self, kind: OverlayKind) -> Option<Arc<KmlLayer>> {
        self.slot_mut(kind).take()
    }

    pub fn get(&self, kind: OverlayKind) -> Option<&Arc<KmlLayer>> {
        match kind {
            OverlayKind::FlightPath => self.flight_path.as_ref(),
            OverlayKind::Coverage => self.coverage.as_ref(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<KmlLayer>> {
        self.flight_path.iter().chain(self.coverage.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.flight_path.is_none() && self.coverage.is_none()
    }

    fn slot_mut(&mut self, kind: OverlayKind) -> &mut Option<Arc<KmlLayer>> {
        match kind {
            OverlayKind::FlightPath => &mut self.flight_path,
            OverlayKind::Coverage => &mut self.coverage,
        }
    }
}
