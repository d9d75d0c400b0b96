mod app;
mod io;
mod model;

use std::path::PathBuf;

use app::DesktopApp;
use eframe::egui;
use mineral_catalog_common::DATASET_FILE;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // 引数がなければカレントの catalogo_minerales.json
    let dataset = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DATASET_FILE));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Colección de Minerales"),
        ..Default::default()
    };

    eframe::run_native(
        "Colección de Minerales",
        options,
        Box::new(move |_cc| Box::new(DesktopApp::with_dataset(&dataset))),
    )
}
