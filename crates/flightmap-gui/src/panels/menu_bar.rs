use flightmap_core::config::AppConfig;

use crate::app::FlightMapApp;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::states::Action;

pub fn show(ctx: &egui::Context, app: &mut FlightMapApp) {
    let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
    let random_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::R);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let busy = app.ui_state.is_busy();
                if ui
                    .add_enabled(
                        !busy,
                        egui::Button::new("Save Image")
                            .shortcut_text(ctx.format_shortcut(&save_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    app.start(Action::SaveImage, WorkerCommand::SaveImage);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(ctx, app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(ctx, app);
                }

                if ui.button("Reset Defaults").clicked() {
                    ui.close();
                    app.apply_config(AppConfig::default());
                    app.ui_state.add_log("Config reset to defaults".into());
                }

                ui.separator();

                if ui
                    .add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut)))
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });
    });

    // Keyboard shortcuts (consumed outside menus)
    if app.ui_state.accepts_actions() {
        if ctx.input_mut(|i| i.consume_shortcut(&save_shortcut)) {
            app.start(Action::SaveImage, WorkerCommand::SaveImage);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&random_shortcut)) {
            app.start(Action::RandomLocation, WorkerCommand::RandomLocation);
        }
    }
    if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

fn import_config(ctx: &egui::Context, app: &mut FlightMapApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match AppConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported { config, path },
            Err(e) => WorkerResult::Error {
                title: e.kind().title(),
                message: format!("{}: {e}", path.display()),
            },
        };
        let _ = result_tx.send(result);
        ctx.request_repaint();
    });
}

fn export_config(ctx: &egui::Context, app: &mut FlightMapApp) {
    let config = app.config.clone();
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("flightmap.toml")
            .save_file()
        else {
            return;
        };
        let result = match config.save(&path) {
            Ok(()) => WorkerResult::Log {
                message: format!("Config exported to {}", path.display()),
            },
            Err(e) => WorkerResult::Error {
                title: e.kind().title(),
                message: e.to_string(),
            },
        };
        let _ = result_tx.send(result);
        ctx.request_repaint();
    });
}
