use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use flightmap_core::engine::MapEngine;
use flightmap_core::error::{FlightMapError, Result};
use flightmap_core::export::PixelBuffer;
use flightmap_core::layer::{KmlLayer, LayerId};
use flightmap_core::viewpoint::Viewpoint;

use crate::messages::EngineRequest;

/// Extra time the display gets to answer on top of any animation.
const REPLY_SLACK: Duration = Duration::from_secs(5);

/// [`MapEngine`] that lives on the worker thread and forwards each call to
/// the map display on the UI thread, blocking until it answers.
pub struct ChannelEngine {
    tx: mpsc::Sender<EngineRequest>,
    ctx: egui::Context,
}

impl ChannelEngine {
    pub fn new(tx: mpsc::Sender<EngineRequest>, ctx: egui::Context) -> Self {
        Self { tx, ctx }
    }

    fn request<T>(
        &self,
        make: impl FnOnce(mpsc::Sender<T>) -> EngineRequest,
        timeout: Duration,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(make(reply_tx))
            .map_err(|_| FlightMapError::EngineDisconnected)?;
        // The display only serves requests while it is painting.
        self.ctx.request_repaint();
        match reply_rx.recv_timeout(timeout) {
            Ok(value) => Ok(value),
            Err(RecvTimeoutError::Timeout) => Err(FlightMapError::Render(format!(
                "map display did not respond within {:.1}s",
                timeout.as_secs_f32()
            ))),
            Err(RecvTimeoutError::Disconnected) => Err(FlightMapError::EngineDisconnected),
        }
    }
}

impl MapEngine for ChannelEngine {
    fn set_viewpoint(&mut self, viewpoint: &Viewpoint, duration: Duration) -> Result<()> {
        let viewpoint = *viewpoint;
        self.request(
            |reply| EngineRequest::SetViewpoint {
                viewpoint,
                duration,
                reply,
            },
            duration + REPLY_SLACK,
        )
    }

    fn export_image(&mut self) -> Result<PixelBuffer> {
        self.request(|reply| EngineRequest::Export { reply }, REPLY_SLACK)?
            .map_err(FlightMapError::Render)
    }

    fn add_layer(&mut self, layer: Arc<KmlLayer>) -> Result<()> {
        self.request(|reply| EngineRequest::AddLayer { layer, reply }, REPLY_SLACK)
    }

    fn remove_layer(&mut self, id: LayerId) -> Result<bool> {
        self.request(|reply| EngineRequest::RemoveLayer { id, reply }, REPLY_SLACK)
    }
}
