//! Hecker Client - a desktop chat front end for the Hecker study assistant
//!
//! Architecture:
//! - Main thread: runs the egui UI and owns the chat session
//! - Backend thread: runs a Tokio runtime for the HTTP calls
//! - Communication via crossbeam channels (lock-free, sync-safe)

use eframe::egui;
use tracing_subscriber::EnvFilter;

use hecker_client::app::HeckerApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Hecker - Study Companion",
        options,
        Box::new(|cc| Ok(Box::new(HeckerApp::new(cc)))),
    )
}
