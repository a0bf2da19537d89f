use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use flightmap_core::animation::ViewTransition;
use flightmap_core::consts::{EXTENT_PADDING_FRACTION, MIN_VIEW_SCALE};
use flightmap_core::export::PixelBuffer;
use flightmap_core::geo::GeoPoint;
use flightmap_core::layer::KmlLayer;
use flightmap_core::projection::HALF_WORLD_M;
use flightmap_core::viewpoint::{scale_to_resolution, Camera};
use geo_types::Coord;

use crate::messages::EngineRequest;

/// Scale the map opens at: the whole world in a typical window.
const INITIAL_SCALE: f64 = 150_000_000.0;

/// View size used before the viewport has been laid out once.
const FALLBACK_VIEW_SIZE: [f64; 2] = [1024.0, 700.0];

struct ActiveTransition {
    transition: ViewTransition,
    started: Instant,
    reply: mpsc::Sender<()>,
}

/// Map display state: what the viewport shows and the engine requests it
/// is still working on.
pub struct MapState {
    pub camera: Camera,
    /// Attached overlays, bottom to top.
    pub layers: Vec<Arc<KmlLayer>>,
    /// Screen rectangle of the map from the last frame.
    pub map_rect: Option<egui::Rect>,
    /// Position under the mouse pointer, if it is over the map.
    pub hover: Option<GeoPoint>,
    transition: Option<ActiveTransition>,
    pending_exports: Vec<mpsc::Sender<Result<PixelBuffer, String>>>,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            camera: Camera::new(GeoPoint::new(20.0, 0.0), INITIAL_SCALE),
            layers: Vec::new(),
            map_rect: None,
            hover: None,
            transition: None,
            pending_exports: Vec::new(),
        }
    }
}

impl MapState {
    pub fn view_size(&self) -> [f64; 2] {
        self.map_rect
            .map(|r| [r.width() as f64, r.height() as f64])
            .unwrap_or(FALLBACK_VIEW_SIZE)
    }

    pub fn has_pending_export(&self) -> bool {
        !self.pending_exports.is_empty()
    }

    /// Apply one request from the worker's engine.
    pub fn serve(&mut self, request: EngineRequest, ctx: &egui::Context) {
        match request {
            EngineRequest::SetViewpoint {
                viewpoint,
                duration,
                reply,
            } => {
                let target =
                    Camera::for_viewpoint(&viewpoint, self.view_size(), EXTENT_PADDING_FRACTION);
                self.finish_transition();
                if duration.is_zero() {
                    self.camera = target;
                    let _ = reply.send(());
                } else {
                    self.transition = Some(ActiveTransition {
                        transition: ViewTransition::new(self.camera, target, duration),
                        started: Instant::now(),
                        reply,
                    });
                    ctx.request_repaint();
                }
            }
            EngineRequest::Export { reply } => {
                self.pending_exports.push(reply);
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            }
            EngineRequest::AddLayer { layer, reply } => {
                self.layers.push(layer);
                let _ = reply.send(());
            }
            EngineRequest::RemoveLayer { id, reply } => {
                let before = self.layers.len();
                self.layers.retain(|l| l.id != id);
                let _ = reply.send(self.layers.len() != before);
            }
        }
    }

    /// Advance the running animation; answers its request once it ends.
    pub fn tick(&mut self, ctx: &egui::Context) {
        let Some(active) = &self.transition else {
            return;
        };
        let elapsed = active.started.elapsed();
        self.camera = active.transition.camera_at(elapsed);
        if active.transition.is_finished(elapsed) {
            self.finish_transition();
        } else {
            ctx.request_repaint();
        }
    }

    /// End the running animation where it stands and release its waiter.
    pub fn finish_transition(&mut self) {
        if let Some(active) = self.transition.take() {
            let _ = active.reply.send(());
        }
    }

    /// Answer every waiting export with the same image.
    pub fn complete_exports(&mut self, result: Result<PixelBuffer, String>) {
        for reply in self.pending_exports.drain(..) {
            let _ = reply.send(result.clone());
        }
    }

    /// Move the map by a screen-space drag.
    pub fn pan_by(&mut self, delta: egui::Vec2) {
        self.finish_transition();
        let res = self.camera.resolution;
        self.camera.center.x -= delta.x as f64 * res;
        self.camera.center.y += delta.y as f64 * res;
        self.clamp_center();
    }

    /// Zoom by `factor` (>1 zooms in) keeping the point under `offset`
    /// (pixels from the view centre) fixed on screen.
    pub fn zoom_at(&mut self, offset: egui::Vec2, factor: f64) {
        self.finish_transition();
        let offset = [offset.x as f64, offset.y as f64];
        let anchor = self.camera.from_screen_offset(offset);
        let resolution = (self.camera.resolution / factor).clamp(
            scale_to_resolution(MIN_VIEW_SCALE),
            self.max_resolution(),
        );
        self.camera = Camera {
            center: Coord {
                x: anchor.x - offset[0] * resolution,
                y: anchor.y + offset[1] * resolution,
            },
            resolution,
        };
        self.clamp_center();
    }

    /// Coarsest resolution: the world square fits the view with room to spare.
    fn max_resolution(&self) -> f64 {
        let [w, h] = self.view_size();
        2.0 * HALF_WORLD_M / w.min(h).max(1.0) * 2.0
    }

    fn clamp_center(&mut self) {
        self.camera.center.x = self.camera.center.x.clamp(-HALF_WORLD_M, HALF_WORLD_M);
        self.camera.center.y = self.camera.center.y.clamp(-HALF_WORLD_M, HALF_WORLD_M);
    }

    /// Screen position of a lon/lat coordinate inside `rect`.
    pub fn to_screen(&self, rect: egui::Rect, coord: Coord<f64>) -> egui::Pos2 {
        let projected = flightmap_core::projection::project(GeoPoint::from(coord));
        let [dx, dy] = self.camera.to_screen_offset(projected);
        rect.center() + egui::vec2(dx as f32, dy as f32)
    }
}
