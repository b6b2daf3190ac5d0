use log::{debug, info, warn};
use parking_lot::Mutex;
use spectrum_overlay::audio::AudioAnalyzer;
use spectrum_overlay::config::FftSize;
use spectrum_overlay::gui;
use spectrum_overlay::params::ParameterStore;
use spectrum_overlay::settings::Settings;
use std::sync::Arc;

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting up...");

    let settings = Settings::load_or_default();

    // === Shared State ===
    let store = Arc::new(ParameterStore::new(settings.parameters.clone()));
    let window = Arc::new(Mutex::new(settings.window.clone()));

    // === Analyzer Setup ===
    // Runs inside the capture callback; the render tick only reads `store`.
    let analyzer = Arc::new(Mutex::new(AudioAnalyzer::new(
        FftSize::default(),
        store.clone(),
    )));

    let geometry = &settings.window;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Spectrum Overlay")
            .with_inner_size([geometry.width, geometry.height])
            .with_position([geometry.left, geometry.top])
            .with_maximized(geometry.maximized)
            .with_transparent(true)
            .with_decorations(false)
            .with_taskbar(false)
            .with_window_level(egui::WindowLevel::AlwaysOnTop),
        ..Default::default()
    };

    debug!("Launching GUI...");
    let result = {
        let store = store.clone();
        let window = window.clone();
        eframe::run_native(
            "Spectrum Overlay",
            options,
            Box::new(move |_cc| Ok(Box::new(gui::AppState::new(store, analyzer, window)))),
        )
    };

    debug!("Saving settings...");
    let settings = Settings {
        window: window.lock().clone(),
        parameters: store.snapshot().as_ref().clone(),
    };
    if let Err(err) = settings.save() {
        warn!("Failed to save settings: {err:#}");
    }

    info!("Clean shutdown complete");

    result
}
