use std::sync::mpsc;

use flightmap_core::config::AppConfig;

use crate::convert::crop_screenshot;
use crate::engine::ChannelEngine;
use crate::messages::{EngineRequest, WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{Action, MapState, UIState};
use crate::workers;

pub struct FlightMapApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    /// Lets UI-side helper threads (config dialogs) report back.
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub engine_rx: mpsc::Receiver<EngineRequest>,
    pub ui_state: UIState,
    pub map: MapState,
    pub config: AppConfig,
}

impl FlightMapApp {
    pub fn new(ctx: &egui::Context, config: AppConfig) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let (engine_tx, engine_rx) = mpsc::channel();
        let engine = ChannelEngine::new(engine_tx, ctx.clone());
        let cmd_tx = workers::spawn_worker(result_tx.clone(), engine, config.clone(), ctx.clone());

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            engine_rx,
            ui_state: UIState::default(),
            map: MapState::default(),
            config,
        }
    }

    /// Mark `action` as running and hand it to the worker.
    pub fn start(&mut self, action: Action, cmd: WorkerCommand) {
        if self.ui_state.is_busy() {
            return;
        }
        self.ui_state.running = Some(action);
        self.send_command(cmd);
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    /// Use `config` here and in the worker.
    pub fn apply_config(&mut self, config: AppConfig) {
        self.config = config.clone();
        self.send_command(WorkerCommand::UpdateConfig { config });
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::ViewpointChosen { viewpoint } => {
                    self.ui_state.running = None;
                    self.ui_state.last_viewpoint = Some(viewpoint);
                }
                WorkerResult::ImageSaved { path } => {
                    self.ui_state.running = None;
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                    self.ui_state.show_alert(
                        "Image Saved",
                        format!("Image was saved to: {}", path.display()),
                    );
                }
                WorkerResult::OverlayLoaded { overlay } => {
                    self.ui_state.running = None;
                    self.ui_state.add_log(format!(
                        "{} loaded: {} ({} geometries)",
                        overlay.kind, overlay.name, overlay.geometry_count
                    ));
                    self.ui_state.set_overlay(overlay);
                }
                WorkerResult::Cancelled => {
                    self.ui_state.running = None;
                    self.ui_state.add_log("Cancelled".into());
                }
                WorkerResult::ConfigImported { config, path } => {
                    self.apply_config(config);
                    self.ui_state
                        .add_log(format!("Config imported from {}", path.display()));
                }
                WorkerResult::Error { title, message } => {
                    self.ui_state.running = None;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                    self.ui_state.show_alert(title, message);
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn serve_engine_requests(&mut self, ctx: &egui::Context) {
        while let Ok(request) = self.engine_rx.try_recv() {
            self.map.serve(request, ctx);
        }
    }

    /// Answer waiting exports from a screenshot delivered this frame.
    fn collect_screenshot(&mut self, ctx: &egui::Context) {
        if !self.map.has_pending_export() {
            return;
        }
        let image = ctx.input(|i| {
            i.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(image) = image else {
            return;
        };

        let result = match self.map.map_rect {
            Some(rect) => crop_screenshot(&image, rect, ctx.pixels_per_point())
                .map_err(|e| e.to_string()),
            None => Err("map view has not been laid out".to_string()),
        };
        if let Ok(buffer) = &result {
            tracing::debug!(
                width = buffer.width(),
                height = buffer.height(),
                "Captured map view"
            );
        }
        self.map.complete_exports(result);
    }
}

impl eframe::App for FlightMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();
        self.collect_screenshot(ctx);
        self.serve_engine_requests(ctx);
        self.map.tick(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);
        panels::alert::show(ctx, self);

        if self.ui_state.show_about {
            egui::Window::new("About FlightMap")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("FlightMap");
                        ui.label("Flight path and coverage viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
