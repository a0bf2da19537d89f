use std::sync::mpsc;

use flightmap_core::config::AppConfig;
use flightmap_core::controller::ViewController;
use flightmap_core::error::FlightMapError;
use rand::rngs::ThreadRng;

use crate::engine::ChannelEngine;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::picker::DialogPicker;

use super::actions;

pub(crate) type Controller = ViewController<ChannelEngine, DialogPicker, ThreadRng>;

/// Spawn the worker thread that owns the view controller. Returns the
/// command sender.
///
/// Commands run one at a time, so at most one action is ever in flight.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    engine: ChannelEngine,
    config: AppConfig,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("flightmap-worker".into())
        .spawn(move || {
            let controller =
                ViewController::new(engine, DialogPicker, rand::thread_rng(), config);
            worker_loop(cmd_rx, result_tx, ctx, controller);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_log(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Log {
            message: msg.into(),
        },
    );
}

pub(crate) fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, err: &FlightMapError) {
    tracing::error!(error = %err, "Action failed");
    send(
        tx,
        ctx,
        WorkerResult::Error {
            title: err.kind().title(),
            message: err.to_string(),
        },
    );
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    mut controller: Controller,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::RandomLocation => {
                actions::handle_random_location(&mut controller, &tx, &ctx);
            }
            WorkerCommand::SaveImage => {
                actions::handle_save_image(&mut controller, &tx, &ctx);
            }
            WorkerCommand::LoadOverlay { kind } => {
                actions::handle_load_overlay(kind, &mut controller, &tx, &ctx);
            }
            WorkerCommand::UpdateConfig { config } => {
                actions::handle_update_config(config, &mut controller, &tx, &ctx);
            }
        }
    }
}
