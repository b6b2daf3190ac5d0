use eframe::egui;

use crate::config::{BandCount, Parameters};
use crate::consts;
use crate::visual::PALETTES;

pub fn render_config_panel(ui: &mut egui::Ui, params: &mut Parameters) {
    ui.label(egui::RichText::new("Configuration").size(16.0));
    ui.add_space(8.0);

    render_bars(ui, params);

    ui.add_space(8.0);

    render_boosts(ui, params);

    ui.add_space(20.0);
}

fn render_bars(ui: &mut egui::Ui, params: &mut Parameters) {
    egui::CollapsingHeader::new("Bars")
        .default_open(true)
        .show(ui, |ui| {
            ui.add_space(4.0);
            egui::Grid::new("bar_settings_grid")
                .num_columns(2)
                .spacing([20.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Bar Count:")
                        .on_hover_text("Changing this resets the bars");
                    egui::ComboBox::from_id_salt("band_count_selector")
                        .selected_text(params.band_count.get().to_string())
                        .show_ui(ui, |ui| {
                            for preset in consts::BAND_COUNT_PRESETS {
                                if let Ok(count) = BandCount::new(preset) {
                                    ui.selectable_value(
                                        &mut params.band_count,
                                        count,
                                        preset.to_string(),
                                    );
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Colors:");
                    egui::ComboBox::from_id_salt("palette_selector")
                        .selected_text(PALETTES[params.palette % PALETTES.len()].name)
                        .show_ui(ui, |ui| {
                            for (idx, palette) in PALETTES.iter().enumerate() {
                                ui.selectable_value(&mut params.palette, idx, palette.name);
                            }
                        });
                    ui.end_row();

                    ui.label("Smoothing:")
                        .on_hover_text("Higher = bars fall more slowly");
                    ui.add(egui::Slider::new(
                        &mut params.smoothing,
                        consts::SMOOTHING_MIN..=consts::SMOOTHING_MAX,
                    ));
                    ui.end_row();
                });
        });
}

fn render_boosts(ui: &mut egui::Ui, params: &mut Parameters) {
    egui::CollapsingHeader::new("Response")
        .default_open(true)
        .show(ui, |ui| {
            ui.add_space(4.0);
            egui::Grid::new("boost_settings_grid")
                .num_columns(2)
                .spacing([20.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Sensitivity:")
                        .on_hover_text("Applies to every bar");
                    ui.add(
                        egui::Slider::new(
                            &mut params.sensitivity,
                            consts::SENSITIVITY_MIN..=consts::SENSITIVITY_MAX,
                        )
                        .suffix("x"),
                    );
                    ui.end_row();

                    for (label, value) in [
                        ("Bass Boost:", &mut params.bass_boost),
                        ("Mid Boost:", &mut params.mid_boost),
                        ("High Boost:", &mut params.high_boost),
                    ] {
                        ui.label(label);
                        ui.add(
                            egui::Slider::new(value, consts::BOOST_MIN..=consts::BOOST_MAX)
                                .suffix("x"),
                        );
                        ui.end_row();
                    }
                });
        });
}
