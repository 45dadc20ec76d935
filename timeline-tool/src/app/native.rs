use eframe::egui;
use log::info;

use super::TimelineApp;
use crate::config;

pub fn run_native() -> Result<(), eframe::Error> {
    env_logger::init();

    let config =
        config::load("config.json").map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config.egui.viewport),
        ..Default::default()
    };

    info!("Run with config: {config:?}");
    eframe::run_native(
        "Timeline Selector",
        options,
        Box::new(|cc| Ok(Box::new(TimelineApp::new(cc, config)))),
    )
}
