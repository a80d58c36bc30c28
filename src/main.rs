#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use tr::tr;
#[cfg(not(windows))]
use tr::tr_init;
use tracing_subscriber::EnvFilter;

use egui_hostview::app::EguiHostview;
use egui_hostview::context::APP_NAME;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("egui_hostview=info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(tr!("egui hostview"))
            .with_inner_size([800.0, 520.0])
            .with_resizable(true),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    #[cfg(not(windows))]
    tr_init!("./locales");

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(EguiHostview::new(cc)))),
    )
}
