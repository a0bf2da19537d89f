use flightmap_core::overlay::OverlayKind;

use crate::app::FlightMapApp;
use crate::messages::WorkerCommand;
use crate::panels::{action_button, section_header};
use crate::states::Action;

const LEFT_PANEL_WIDTH: f32 = 220.0;

pub fn show(ctx: &egui::Context, app: &mut FlightMapApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                actions_section(ui, app);
                ui.separator();
                overlays_section(ui, app);
            });
        });
}

fn actions_section(ui: &mut egui::Ui, app: &mut FlightMapApp) {
    section_header(ui, "Map", None);
    ui.add_space(4.0);

    let busy = app.ui_state.is_busy();
    if action_button(ui, "Random Location", busy) {
        app.start(Action::RandomLocation, WorkerCommand::RandomLocation);
    }
    if action_button(ui, "Save Image", busy) {
        app.start(Action::SaveImage, WorkerCommand::SaveImage);
    }
    for kind in OverlayKind::ALL {
        if action_button(ui, &format!("Load {}", kind.label()), busy) {
            app.start(Action::LoadOverlay(kind), WorkerCommand::LoadOverlay { kind });
        }
    }
}

fn overlays_section(ui: &mut egui::Ui, app: &FlightMapApp) {
    let loaded = OverlayKind::ALL
        .iter()
        .filter(|kind| app.ui_state.overlay(**kind).is_some())
        .count();
    section_header(ui, "Overlays", Some(&format!("{loaded}/{}", OverlayKind::ALL.len())));
    ui.add_space(4.0);

    egui::Grid::new("overlays_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            for kind in OverlayKind::ALL {
                ui.label(kind.label());
                match app.ui_state.overlay(kind) {
                    Some(overlay) => {
                        ui.label(&overlay.name).on_hover_text(format!(
                            "{} geometries",
                            overlay.geometry_count
                        ));
                    }
                    None => {
                        ui.weak("None");
                    }
                }
                ui.end_row();
            }
        });
}
