use crate::app::FlightMapApp;

pub fn show(ctx: &egui::Context, app: &mut FlightMapApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Progress bar
        if let Some(action) = app.ui_state.running {
            ui.add(
                egui::ProgressBar::new(0.0)
                    .text(format!("{action}..."))
                    .animate(true),
            );
        } else {
            // Placeholder keeps the panel height stable
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let center = app.map.camera.geo_center();
            ui.label(format!("Center: {:.4}, {:.4}", center.lat, center.lon));
            ui.separator();
            ui.label(format!("Scale: 1:{:.0}", app.map.camera.scale()));
            ui.separator();
            ui.label(format!("Layers: {}", app.map.layers.len()));
            if let Some(cursor) = app.map.hover {
                ui.separator();
                ui.label(format!("Cursor: {:.4}, {:.4}", cursor.lat, cursor.lon));
            }
            if let Some(viewpoint) = &app.ui_state.last_viewpoint {
                ui.separator();
                ui.weak(format!("Last random: {viewpoint}"));
            }
        });

        ui.add_space(2.0);
    });
}
