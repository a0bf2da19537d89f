use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use flightmap_core::config::AppConfig;
use flightmap_core::controller::LoadedOverlay;
use flightmap_core::export::PixelBuffer;
use flightmap_core::layer::{KmlLayer, LayerId};
use flightmap_core::overlay::OverlayKind;
use flightmap_core::viewpoint::Viewpoint;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    RandomLocation,
    /// Export the map view to the configured PNG path.
    SaveImage,
    /// Pick a KML file and show it in the given slot.
    LoadOverlay { kind: OverlayKind },
    /// Replace the controller's configuration.
    UpdateConfig { config: AppConfig },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    ViewpointChosen {
        viewpoint: Viewpoint,
    },
    ImageSaved {
        path: PathBuf,
    },
    OverlayLoaded {
        overlay: LoadedOverlay,
    },
    /// The user dismissed the file dialog.
    Cancelled,
    /// A config file was read from disk (sent by the menu's dialog thread).
    ConfigImported {
        config: AppConfig,
        path: PathBuf,
    },
    Error {
        title: &'static str,
        message: String,
    },
    Log {
        message: String,
    },
}

/// Calls from the worker's map engine to the display on the UI thread.
/// Each carries the channel the display answers on.
pub enum EngineRequest {
    /// Answered once the animation has finished.
    SetViewpoint {
        viewpoint: Viewpoint,
        duration: Duration,
        reply: mpsc::Sender<()>,
    },
    Export {
        reply: mpsc::Sender<Result<PixelBuffer, String>>,
    },
    AddLayer {
        layer: Arc<KmlLayer>,
        reply: mpsc::Sender<()>,
    },
    RemoveLayer {
        id: LayerId,
        reply: mpsc::Sender<bool>,
    },
}
