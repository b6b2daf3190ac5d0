use eframe::egui;

use crate::audio::CaptureStatus;
use crate::config::Parameters;
use crate::dsp::BandState;

const SHORTCUTS: &[(&str, &str)] = &[
    ("Esc", "Exit"),
    ("S", "Settings"),
    ("M", "Minimize"),
    ("C", "Change colors"),
    ("R", "Restart audio"),
    ("+ / -", "Sensitivity"),
    ("B / V", "Bass boost"),
    ("1-5", "Bars (24/32/48/64/80)"),
];

pub fn render_live_monitoring(
    ui: &mut egui::Ui,
    status: &CaptureStatus,
    params: &Parameters,
    bands: &BandState,
    dropped_frames: u64,
) {
    ui.label(egui::RichText::new("Live Monitoring").size(16.0));
    ui.add_space(8.0);

    render_capture_status(ui, status, dropped_frames);
    ui.add_space(8.0);

    render_current_settings(ui, params, bands);
    ui.add_space(8.0);

    render_shortcuts(ui);
    ui.add_space(12.0);
}

fn render_capture_status(ui: &mut egui::Ui, status: &CaptureStatus, dropped_frames: u64) {
    ui.group(|ui| {
        ui.colored_label(egui::Color32::LIGHT_BLUE, "Capture:");
        match status {
            CaptureStatus::Listening(device) => {
                ui.colored_label(egui::Color32::GREEN, format!("Listening on {device}"));
            }
            CaptureStatus::Stopped => {
                ui.colored_label(egui::Color32::GRAY, "Stopped");
            }
            CaptureStatus::Failed(reason) => {
                ui.colored_label(egui::Color32::RED, format!("Capture failed: {reason}"));
                ui.label("Press R to restart audio");
            }
        }
        if dropped_frames > 0 {
            ui.label(format!("Dropped frames: {dropped_frames}"));
        }
    });
}

fn render_current_settings(ui: &mut egui::Ui, params: &Parameters, bands: &BandState) {
    let peak = bands.values.iter().cloned().fold(0.0f32, f32::max);

    ui.group(|ui| {
        ui.colored_label(egui::Color32::LIGHT_GREEN, "Current Settings:");
        ui.horizontal(|ui| {
            ui.label("Bars:");
            ui.strong(params.band_count.get().to_string());

            ui.separator();

            ui.label("Bass Boost:");
            ui.strong(format!("{:.1}x", params.bass_boost));

            ui.separator();

            ui.label("Sensitivity:");
            ui.strong(format!("{:.1}x", params.sensitivity));
        });
        ui.horizontal(|ui| {
            ui.label("Peak band:");
            ui.strong(format!("{peak:.3}"));
        });
    });
}

fn render_shortcuts(ui: &mut egui::Ui) {
    egui::CollapsingHeader::new("Keyboard Controls")
        .default_open(false)
        .show(ui, |ui| {
            egui::Grid::new("shortcut_grid")
                .num_columns(2)
                .spacing([20.0, 4.0])
                .show(ui, |ui| {
                    for (key, action) in SHORTCUTS {
                        ui.strong(*key);
                        ui.label(*action);
                        ui.end_row();
                    }
                });
        });
}
