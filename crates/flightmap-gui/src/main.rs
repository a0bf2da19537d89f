mod app;
mod convert;
mod engine;
mod messages;
mod panels;
mod picker;
mod states;
mod workers;

use flightmap_core::config::AppConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = AppConfig::load_or_default(AppConfig::default_path().as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("FlightMap"),
        ..Default::default()
    };

    eframe::run_native(
        "FlightMap",
        options,
        Box::new(|cc| Ok(Box::new(app::FlightMapApp::new(&cc.egui_ctx, config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start FlightMap: {e}"))
}
