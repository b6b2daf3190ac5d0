use crate::config::BandCount;
use crate::consts;
use crate::params::ParameterStore;
use log::{debug, warn};
use std::sync::Arc;

/// Discrete operations offered by the control surface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ControlAction {
    CyclePalette,
    SensitivityUp,
    SensitivityDown,
    BassBoostUp,
    BassBoostDown,
    /// Index into [`consts::BAND_COUNT_PRESETS`].
    BandPreset(usize),
    RestartCapture,
    ToggleSettings,
    Minimize,
    Quit,
}

/// What the surface still has to do after the controller handled an action.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ControllerOutput {
    /// Parameters were updated; nothing else to do.
    Applied,
    RestartCapture,
    ToggleSettings,
    Minimize,
    Quit,
}

pub struct Controller {
    store: Arc<ParameterStore>,
}

impl Controller {
    pub fn new(store: Arc<ParameterStore>) -> Self {
        Self { store }
    }

    pub fn process(&self, action: ControlAction) -> ControllerOutput {
        debug!("Control action: {action:?}");

        match action {
            ControlAction::CyclePalette => self.store.cycle_palette(),
            ControlAction::SensitivityUp => self.store.scale_sensitivity(consts::STEP_UP),
            ControlAction::SensitivityDown => self.store.scale_sensitivity(consts::STEP_DOWN),
            ControlAction::BassBoostUp => self.store.scale_bass_boost(consts::STEP_UP),
            ControlAction::BassBoostDown => self.store.scale_bass_boost(consts::STEP_DOWN),
            ControlAction::BandPreset(idx) => {
                match consts::BAND_COUNT_PRESETS
                    .get(idx)
                    .map(|&count| BandCount::new(count))
                {
                    Some(Ok(count)) => self.store.set_band_count(count),
                    Some(Err(err)) => warn!("Ignoring band preset: {err}"),
                    None => warn!("No band preset at index {idx}"),
                }
            }
            ControlAction::RestartCapture => return ControllerOutput::RestartCapture,
            ControlAction::ToggleSettings => return ControllerOutput::ToggleSettings,
            ControlAction::Minimize => return ControllerOutput::Minimize,
            ControlAction::Quit => return ControllerOutput::Quit,
        }

        ControllerOutput::Applied
    }
}
