use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::export::PixelBuffer;
use crate::layer::{KmlLayer, LayerId};
use crate::viewpoint::Viewpoint;

/// The rendering surface the controller drives.
///
/// Calls block until the display has done the work, so a handler can chain
/// animations the same way it chains file operations.
pub trait MapEngine {
    /// Animate to `viewpoint` over `duration` and return once it is reached.
    /// A zero duration jumps.
    fn set_viewpoint(&mut self, viewpoint: &Viewpoint, duration: Duration) -> Result<()>;

    /// Snapshot of the current map view.
    fn export_image(&mut self) -> Result<PixelBuffer>;

    fn add_layer(&mut self, layer: Arc<KmlLayer>) -> Result<()>;

    /// Detach a layer; `false` when no such layer was attached.
    fn remove_layer(&mut self, id: LayerId) -> Result<bool>;
}
