use crate::app::FlightMapApp;

/// Modal message box for confirmations and errors.
pub fn show(ctx: &egui::Context, app: &mut FlightMapApp) {
    let Some(alert) = app.ui_state.alert.clone() else {
        return;
    };

    let response = egui::Modal::new(egui::Id::new("alert")).show(ctx, |ui| {
        ui.set_max_width(360.0);
        ui.heading(&alert.title);
        ui.add_space(8.0);
        ui.label(&alert.message);
        ui.add_space(8.0);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.button("OK").clicked()
        })
        .inner
    });

    if response.inner || response.should_close() {
        app.ui_state.alert = None;
    }
}
