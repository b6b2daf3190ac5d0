use crate::audio::{AudioAnalyzer, AudioStream, CaptureStatus, audio_stream};
use crate::config::{APP_VERSION, Parameters};
use crate::consts;
use crate::controller::{ControlAction, Controller, ControllerOutput};
use crate::params::ParameterStore;
use crate::settings::WindowGeometry;
use crate::visual::VisualEngine;
use eframe::egui;
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::components::{render_config_panel, render_live_monitoring};

pub struct AppState {
    store: Arc<ParameterStore>,
    controller: Controller,
    devices: Vec<String>,
    active_device_idx: usize,
    pending_device_idx: usize, // Local selection for device selector
    analyzer: Arc<Mutex<AudioAnalyzer>>,
    audio_stream: Option<AudioStream>,
    capture_status: Arc<Mutex<CaptureStatus>>,
    visuals: VisualEngine,
    settings_open: bool,
    settings_auto_hide: AutoHide,
    window: Arc<Mutex<WindowGeometry>>,
}

impl eframe::App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        if self.settings_auto_hide.fire(Instant::now()) {
            debug!("Hiding settings panel after startup");
            self.settings_open = false;
        }
        self.render_settings_panel(ctx);
        self.render_visualizer(ctx);
        self.remember_geometry(ctx);

        ctx.request_repaint_after(Duration::from_secs_f64(1.0 / consts::TARGET_FPS));
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0; 4]
    }
}

impl AppState {
    pub fn new(
        store: Arc<ParameterStore>,
        analyzer: Arc<Mutex<AudioAnalyzer>>,
        window: Arc<Mutex<WindowGeometry>>,
    ) -> Self {
        debug!("Initializing GUI state...");

        let devices = audio_stream::list_input_devices();
        debug!("Found {} audio input devices", devices.len());

        let selected_device_idx = audio_stream::default_input_device_name()
            .and_then(|default_name| devices.iter().position(|name| *name == default_name))
            .unwrap_or(0);

        let selected_device = devices
            .get(selected_device_idx)
            .map(|s| s.as_str())
            .unwrap_or("None");
        info!("Selected initial audio device: {selected_device}");

        let capture_status = Arc::new(Mutex::new(CaptureStatus::default()));
        let audio_stream = audio_stream::create_audio_stream(
            selected_device_idx,
            &devices,
            analyzer.clone(),
            capture_status.clone(),
        );

        let initial = store.snapshot();
        debug!(
            "Initial parameters: bands={}, smoothing={}, sensitivity={}",
            initial.band_count.get(),
            initial.smoothing,
            initial.sensitivity
        );

        Self {
            controller: Controller::new(store.clone()),
            visuals: VisualEngine::new(store.clone()),
            store,
            devices,
            pending_device_idx: selected_device_idx,
            active_device_idx: selected_device_idx,
            analyzer,
            audio_stream,
            capture_status,
            settings_open: true,
            settings_auto_hide: AutoHide::after(
                Duration::from_secs(consts::SETTINGS_AUTO_HIDE_SECS),
                Instant::now(),
            ),
            window,
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Sliders and combo boxes keep focus after a click; only text entry
        // swallows the shortcut keys.
        let focused = ctx.memory(|mem| mem.focused());
        if focused.is_some_and(|id| is_text_field(ctx, id)) {
            return;
        }

        let actions: Vec<ControlAction> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        ..
                    } => action_for_key(*key),
                    _ => None,
                })
                .collect()
        });

        for action in actions {
            match self.controller.process(action) {
                ControllerOutput::Applied => {}
                ControllerOutput::RestartCapture => self.restart_capture(),
                ControllerOutput::ToggleSettings => {
                    self.settings_auto_hide.cancel();
                    self.settings_open = !self.settings_open;
                }
                ControllerOutput::Minimize => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true))
                }
                ControllerOutput::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            }
        }
    }

    fn apply_device(&mut self) {
        let device_name = self
            .devices
            .get(self.pending_device_idx)
            .map(|s| s.as_str())
            .unwrap_or("Unknown");
        debug!("Switching capture to device: {device_name}");

        self.active_device_idx = self.pending_device_idx;
        self.restart_capture();
    }

    fn restart_capture(&mut self) {
        audio_stream::restart_audio_stream(
            &mut self.audio_stream,
            self.active_device_idx,
            &self.devices,
            self.analyzer.clone(),
            self.capture_status.clone(),
        );
        info!("Audio capture restarted");
    }

    fn render_settings_panel(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }

        // Sliders edit a copy of the live snapshot; only a real change is applied.
        let live = self.store.snapshot();
        let mut edited = live.as_ref().clone();

        egui::SidePanel::right("settings_panel")
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading(format!("Spectrum Overlay {APP_VERSION}"));
                ui.separator();

                self.render_device_selector(ui);
                ui.separator();

                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        let status = self.capture_status.lock().clone();
                        let dropped = self.store.dropped_frames();
                        let bands = self.store.band_state();
                        render_live_monitoring(ui, &status, &live, &bands, dropped);

                        render_config_panel(ui, &mut edited);

                        ui.horizontal(|ui| {
                            if ui.button("↺ Reset to Default").clicked() {
                                debug!("Resetting parameters to defaults");
                                edited = Parameters::default();
                            }
                            if ui.button("Hide").clicked() {
                                self.settings_auto_hide.cancel();
                                self.settings_open = false;
                            }
                        });
                    });
            });

        if edited != *live {
            self.store.apply(&edited);
        }
    }

    fn render_device_selector(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Audio Device:");
            egui::ComboBox::from_id_salt("device_selector")
                .selected_text(
                    self.devices
                        .get(self.pending_device_idx)
                        .map(|name| name.as_str())
                        .unwrap_or("No devices"),
                )
                .show_ui(ui, |ui| {
                    for (idx, name) in self.devices.iter().enumerate() {
                        ui.selectable_value(&mut self.pending_device_idx, idx, name);
                    }
                });
        });

        ui.horizontal(|ui| {
            let device_changed = self.pending_device_idx != self.active_device_idx;
            ui.add_enabled_ui(device_changed, |ui| {
                if ui.button("Apply Device").clicked() {
                    self.apply_device();
                }
            });
            if ui.button("🔄 Restart Audio").clicked() {
                self.restart_capture();
            }
        });
    }

    fn render_visualizer(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::default()
                    .fill(egui::Color32::TRANSPARENT)
                    .inner_margin(0.0),
            )
            .show(ctx, |ui| {
                self.visuals.render(ui);
            });
    }

    fn remember_geometry(&self, ctx: &egui::Context) {
        let (outer, inner, maximized) = ctx.input(|i| {
            let viewport = i.viewport();
            (viewport.outer_rect, viewport.inner_rect, viewport.maximized)
        });

        let mut window = self.window.lock();
        if let Some(maximized) = maximized {
            window.maximized = maximized;
        }
        if window.maximized {
            return;
        }
        if let Some(outer) = outer {
            window.left = outer.min.x;
            window.top = outer.min.y;
        }
        if let Some(inner) = inner {
            window.width = inner.width();
            window.height = inner.height();
        }
    }
}

/// One-shot deadline, fired by the first tick at or after it.
struct AutoHide {
    deadline: Option<Instant>,
}

impl AutoHide {
    fn after(delay: Duration, now: Instant) -> Self {
        Self {
            deadline: Some(now + delay),
        }
    }

    fn fire(&mut self, now: Instant) -> bool {
        self.deadline.take_if(|deadline| *deadline <= now).is_some()
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Whether `id` belongs to a text edit (including a slider's value box while
/// it is being typed into).
fn is_text_field(ctx: &egui::Context, id: egui::Id) -> bool {
    egui::TextEdit::load_state(ctx, id).is_some()
}

/// Keyboard map for the control surface.
pub fn action_for_key(key: egui::Key) -> Option<ControlAction> {
    let action = match key {
        egui::Key::Escape => ControlAction::Quit,
        egui::Key::S => ControlAction::ToggleSettings,
        egui::Key::M => ControlAction::Minimize,
        egui::Key::C => ControlAction::CyclePalette,
        egui::Key::R => ControlAction::RestartCapture,
        egui::Key::Plus | egui::Key::Equals => ControlAction::SensitivityUp,
        egui::Key::Minus => ControlAction::SensitivityDown,
        egui::Key::B => ControlAction::BassBoostUp,
        egui::Key::V => ControlAction::BassBoostDown,
        egui::Key::Num1 => ControlAction::BandPreset(0),
        egui::Key::Num2 => ControlAction::BandPreset(1),
        egui::Key::Num3 => ControlAction::BandPreset(2),
        egui::Key::Num4 => ControlAction::BandPreset(3),
        egui::Key::Num5 => ControlAction::BandPreset(4),
        _ => return None,
    };
    Some(action)
}
