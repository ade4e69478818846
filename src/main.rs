//! Mental Fitness Analyzer - desktop client for the mental-fitness analysis
//! service. The user selects two CSV files (mental disorders and substance
//! use datasets), the client uploads them to the service, and the returned
//! statistics, model metrics, and visualizations are rendered in the window.

use eframe::egui;
use env_logger::Builder;
use log::{LevelFilter, info};
use std::sync::mpsc;
use std::thread;

use crate::ui::AppState;
use crate::upload::ClientConfig;

mod api;
mod render;
mod ui;
mod upload;
mod validate;

pub type UIRefreshReceiver = mpsc::Receiver<ui::UIRefresh>;
pub type UIRefreshSender = mpsc::Sender<ui::UIRefresh>;
pub type UICommandReceiver = mpsc::Receiver<ui::UICommand>;
pub type UICommandSender = mpsc::Sender<ui::UICommand>;

fn main() {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("mental_fitness_analyzer"), LevelFilter::Debug)
        .init();

    info!("Starting up");

    let config = ClientConfig::load_or_default();

    let (ui_command_tx, ui_command_rx) = mpsc::channel();
    let (ui_refresh_tx, ui_refresh_rx) = mpsc::channel();

    // The worker owns the blocking HTTP client; the UI thread never blocks
    // on the network.
    let _worker_handle = thread::Builder::new()
        .name("upload-worker".to_string())
        .spawn(move || upload::upload_task(config, ui_command_rx, ui_refresh_tx))
        .expect("failed to spawn upload worker thread");

    // Start the GUI on the main thread (required on macOS)
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 800.0]),
        ..Default::default()
    };
    let result = eframe::run_native(
        "Mental Fitness Analyzer",
        native_options,
        Box::new(move |cc| Ok(Box::new(AppState::new(ui_refresh_rx, ui_command_tx, cc.storage)))),
    );
    if let Err(e) = result {
        log::error!("GUI terminated with an error: {}", e);
    }
}
