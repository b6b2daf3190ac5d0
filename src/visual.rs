pub mod engine;
pub mod mapper;
pub mod palette;

pub use engine::VisualEngine;
pub use mapper::{BarGeometry, BarVisual, Canvas, VisualMapper};
pub use palette::{PALETTES, Palette, Rgb};
