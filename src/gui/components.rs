mod config_panel;
mod live_monitoring;

pub use config_panel::render_config_panel;
pub use live_monitoring::render_live_monitoring;
