pub(crate) fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    egui::Frame::NONE.inner_margin(4.0).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.strong(label);
            if let Some(s) = status {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(s);
                });
            }
        });
    });
}

/// Full-width button that is disabled while `busy`.
pub(crate) fn action_button(ui: &mut egui::Ui, label: &str, busy: bool) -> bool {
    ui.add_enabled(
        !busy,
        egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 28.0)),
    )
    .clicked()
}
