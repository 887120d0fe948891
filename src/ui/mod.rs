//! GUI implementation with egui/eframe
//!
//! This module provides the desktop user interface for the Samarth client.

mod app;
mod components;
mod state;
mod theme;

pub use app::SamarthApp;
pub use state::{AppState, SAMPLE_QUESTIONS};
pub use theme::{Theme, ThemePreference};

use crate::config::AppConfig;

/// Run the Samarth application
pub fn run(config: AppConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Samarth Data Q&A"),
        ..Default::default()
    };

    eframe::run_native(
        "Samarth",
        options,
        Box::new(move |cc| Ok(Box::new(SamarthApp::new(cc, config)))),
    )
}
