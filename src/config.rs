use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::ConfigError;

pub const APP_VERSION: &str = "v0.1.0";

/// Transform length. Only powers of two >= 2 can be constructed, so every
/// stage downstream may assume a valid radix-2 size.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FftSize(usize);

impl FftSize {
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size >= 2 && size.is_power_of_two() {
            Ok(Self(size))
        } else {
            Err(ConfigError::FftSize(size))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Number of usable bins (the lower half of the spectrum).
    pub fn half(self) -> usize {
        self.0 / 2
    }
}

impl Default for FftSize {
    fn default() -> Self {
        Self(consts::FFT_SIZE)
    }
}

/// Number of bars. Every group (bass, mid, high) gets at least one band.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct BandCount(usize);

impl BandCount {
    pub fn new(count: usize) -> Result<Self, ConfigError> {
        let band_count = Self(count);
        let (bass, mid, high) = band_count.group_sizes();
        if bass == 0 || mid == 0 || high == 0 {
            return Err(ConfigError::BandCount(count));
        }
        Ok(band_count)
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// (bass, mid, high) band counts: 40% / 40% / remainder.
    pub fn group_sizes(self) -> (usize, usize, usize) {
        let bass = (self.0 as f64 * consts::BASS_BAND_SHARE) as usize;
        let mid = (self.0 as f64 * consts::MID_BAND_SHARE) as usize;
        let high = self.0.saturating_sub(bass + mid);
        (bass, mid, high)
    }
}

impl Default for BandCount {
    fn default() -> Self {
        Self(consts::DEFAULT_BAND_COUNT)
    }
}

impl TryFrom<usize> for BandCount {
    type Error = ConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BandCount> for usize {
    fn from(value: BandCount) -> Self {
        value.0
    }
}

/// Live-tunable pipeline coefficients. Values are always within their clamp
/// ranges when read from the [`ParameterStore`](crate::params::ParameterStore).
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub band_count: BandCount,

    /// Weight of the previous band value in the one-pole smoother.
    /// Higher = more inertia, lower = snappier bars.
    pub smoothing: f32,

    pub bass_boost: f32,
    pub mid_boost: f32,
    pub high_boost: f32,

    /// Global multiplier on every raw band magnitude.
    pub sensitivity: f32,

    pub palette: usize,

    /// Bumped on every band-count change; frames computed for an older epoch
    /// are never published.
    #[serde(skip)]
    pub layout_epoch: u64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            band_count: BandCount::default(),
            smoothing: consts::DEFAULT_SMOOTHING,
            bass_boost: consts::DEFAULT_BASS_BOOST,
            mid_boost: consts::DEFAULT_MID_BOOST,
            high_boost: consts::DEFAULT_HIGH_BOOST,
            sensitivity: consts::DEFAULT_SENSITIVITY,
            palette: 0,
            layout_epoch: 0,
        }
    }
}
