use std::sync::mpsc;

use flightmap_core::config::AppConfig;
use flightmap_core::controller::Outcome;
use flightmap_core::overlay::OverlayKind;
use flightmap_core::viewpoint::Viewpoint;

use crate::messages::WorkerResult;

use super::dispatch::Controller;
use super::{send, send_error, send_log};

pub(super) fn handle_random_location(
    controller: &mut Controller,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match controller.random_location() {
        Ok(viewpoint) => {
            if let Viewpoint::Center { scale, .. } = viewpoint {
                send_log(tx, ctx, format!("Scale: 1:{scale:.0}"));
            }
            send(tx, ctx, WorkerResult::ViewpointChosen { viewpoint });
        }
        Err(e) => send_error(tx, ctx, &e),
    }
}

pub(super) fn handle_save_image(
    controller: &mut Controller,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match controller.save_image() {
        Ok(path) => send(tx, ctx, WorkerResult::ImageSaved { path }),
        Err(e) => send_error(tx, ctx, &e),
    }
}

pub(super) fn handle_load_overlay(
    kind: OverlayKind,
    controller: &mut Controller,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match controller.load_overlay(kind) {
        Ok(Outcome::Completed(overlay)) => {
            if overlay.extent.is_none() {
                send_log(tx, ctx, format!("{}: no geometry to zoom to", overlay.name));
            }
            send(tx, ctx, WorkerResult::OverlayLoaded { overlay });
        }
        Ok(Outcome::Cancelled) => send(tx, ctx, WorkerResult::Cancelled),
        Err(e) => send_error(tx, ctx, &e),
    }
}

pub(super) fn handle_update_config(
    config: AppConfig,
    controller: &mut Controller,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match controller.set_config(config) {
        Ok(()) => send_log(tx, ctx, "Config applied"),
        Err(e) => send_error(tx, ctx, &e),
    }
}
