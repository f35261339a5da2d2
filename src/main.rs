#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod document;
mod editor;
mod settings;
mod theme;

use app::FlowBuilderApp;
use eframe::egui;
use settings::{EditorSettings, SETTINGS_FILE};
use std::path::Path;
use tokio::runtime::Runtime;

/// egui 애플리케이션을 초기화하고 실행하는 진입점입니다.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let settings = EditorSettings::load_or_default(Path::new(SETTINGS_FILE));
    let runtime = Runtime::new()?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_app_id("Flow Builder")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Flow Builder",
        native_options,
        Box::new(move |cc| Box::new(FlowBuilderApp::new(cc, settings, runtime))),
    )
    .map_err(|err| anyhow::anyhow!("애플리케이션 실행 실패: {err}"))
}
