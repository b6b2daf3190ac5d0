use eframe::egui;
use std::sync::Arc;

use crate::params::ParameterStore;
use crate::visual::mapper::{BarGeometry, Canvas, VisualMapper};

/// Render-context side of the pipeline: reads the latest band snapshot once
/// per tick and paints the bars.
pub struct VisualEngine {
    store: Arc<ParameterStore>,
    mapper: VisualMapper,
}

impl VisualEngine {
    pub fn new(store: Arc<ParameterStore>) -> Self {
        Self {
            store,
            mapper: VisualMapper::new(),
        }
    }

    pub fn render(&mut self, ui: &mut egui::Ui) {
        let rect = ui.max_rect();
        let painter = ui.painter_at(rect);

        let state = self.store.band_state();
        let palette = self.store.snapshot().palette;
        let canvas = Canvas {
            width: rect.width(),
            height: rect.height(),
        };

        for bar in self.mapper.map(&state, palette, canvas) {
            painter.rect_filled(to_rect(rect.min, &bar.glow), 2.0, to_color(&bar.glow));
            painter.rect_filled(to_rect(rect.min, &bar.primary), 1.0, to_color(&bar.primary));
        }
    }
}

fn to_rect(origin: egui::Pos2, bar: &BarGeometry) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(origin.x + bar.x, origin.y + bar.y),
        egui::vec2(bar.width, bar.height),
    )
}

fn to_color(bar: &BarGeometry) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(bar.fill.r, bar.fill.g, bar.fill.b, bar.alpha)
}
