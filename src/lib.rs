//! Real-time audio spectrum overlay: capture, band analysis and bar rendering.

pub mod audio;
pub mod config;
pub mod consts;
pub mod controller;
pub mod dsp;
pub mod error;
pub mod gui;
pub mod params;
pub mod settings;
pub mod snapshot;
pub mod visual;
