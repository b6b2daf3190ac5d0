use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::{BandCount, Parameters};
use crate::consts;
use crate::dsp::BandState;
use crate::snapshot::SnapshotCell;
use crate::visual::palette;

/// Live parameters plus the band state they shape.
///
/// Parameters and band state are published through separate snapshot cells.
/// A band-count change bumps the layout epoch and publishes a zeroed state of
/// the new length; the analyzer refuses to publish frames from older epochs,
/// so no reader ever pairs a new band count with an old-length array.
pub struct ParameterStore {
    params: SnapshotCell<Parameters>,
    bands: SnapshotCell<BandState>,
    reconfigure: Mutex<()>,
    dropped_frames: AtomicU64,
}

impl ParameterStore {
    pub fn new(initial: Parameters) -> Self {
        let initial = sanitize(&Parameters {
            layout_epoch: 0,
            ..initial
        });
        let bands = BandState::zeroed(0, initial.band_count.get());

        Self {
            params: SnapshotCell::new(initial),
            bands: SnapshotCell::new(bands),
            reconfigure: Mutex::new(()),
            dropped_frames: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> Arc<Parameters> {
        self.params.load()
    }

    pub fn band_state(&self) -> Arc<BandState> {
        self.bands.load()
    }

    /// Publishes a frame from the analyzer. Frames computed for an epoch older
    /// than the current one are discarded.
    pub fn publish_bands(&self, state: BandState) -> bool {
        self.bands
            .publish_if(state, |current, next| next.epoch >= current.epoch)
    }

    pub fn record_dropped_frame(&self) {
        self.dropped_frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Frames the analyzer computed but did not publish.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames.load(Ordering::Relaxed)
    }

    pub fn set_band_count(&self, band_count: BandCount) {
        let _guard = self.reconfigure.lock();

        if self.params.load().band_count == band_count {
            return;
        }

        let next = self.params.update(|p| Parameters {
            band_count,
            layout_epoch: p.layout_epoch + 1,
            ..p.clone()
        });
        self.bands
            .store(BandState::zeroed(next.layout_epoch, band_count.get()));

        info!("Band count set to {}", band_count.get());
    }

    pub fn set_smoothing(&self, smoothing: f32) {
        self.modify(|p| p.smoothing = smoothing);
    }

    pub fn set_bass_boost(&self, boost: f32) {
        self.modify(|p| p.bass_boost = boost);
    }

    pub fn set_mid_boost(&self, boost: f32) {
        self.modify(|p| p.mid_boost = boost);
    }

    pub fn set_high_boost(&self, boost: f32) {
        self.modify(|p| p.high_boost = boost);
    }

    pub fn set_sensitivity(&self, sensitivity: f32) {
        self.modify(|p| p.sensitivity = sensitivity);
    }

    pub fn set_palette(&self, palette: usize) {
        self.modify(|p| p.palette = palette);
    }

    pub fn cycle_palette(&self) {
        self.modify(|p| p.palette += 1);
    }

    pub fn scale_sensitivity(&self, factor: f32) {
        self.modify(|p| p.sensitivity *= factor);
    }

    pub fn scale_bass_boost(&self, factor: f32) {
        self.modify(|p| p.bass_boost *= factor);
    }

    /// Applies every field of `target`, clamping as the individual setters do.
    pub fn apply(&self, target: &Parameters) {
        self.set_band_count(target.band_count);
        self.modify(|p| {
            p.smoothing = target.smoothing;
            p.bass_boost = target.bass_boost;
            p.mid_boost = target.mid_boost;
            p.high_boost = target.high_boost;
            p.sensitivity = target.sensitivity;
            p.palette = target.palette;
        });
    }

    fn modify<F>(&self, f: F)
    where
        F: FnOnce(&mut Parameters),
    {
        let next = self.params.update(|current| {
            let mut candidate = current.clone();
            f(&mut candidate);
            sanitize_against(current, &candidate)
        });
        debug!("Parameters updated: {next:?}");
    }
}

/// Clamps every field into range. Non-finite floats fall back to `previous`.
fn sanitize_against(previous: &Parameters, candidate: &Parameters) -> Parameters {
    let pick = |value: f32, fallback: f32, min: f32, max: f32| {
        if value.is_finite() {
            value.clamp(min, max)
        } else {
            fallback
        }
    };

    Parameters {
        band_count: previous.band_count,
        smoothing: pick(
            candidate.smoothing,
            previous.smoothing,
            consts::SMOOTHING_MIN,
            consts::SMOOTHING_MAX,
        ),
        bass_boost: pick(
            candidate.bass_boost,
            previous.bass_boost,
            consts::BOOST_MIN,
            consts::BOOST_MAX,
        ),
        mid_boost: pick(
            candidate.mid_boost,
            previous.mid_boost,
            consts::BOOST_MIN,
            consts::BOOST_MAX,
        ),
        high_boost: pick(
            candidate.high_boost,
            previous.high_boost,
            consts::BOOST_MIN,
            consts::BOOST_MAX,
        ),
        sensitivity: pick(
            candidate.sensitivity,
            previous.sensitivity,
            consts::SENSITIVITY_MIN,
            consts::SENSITIVITY_MAX,
        ),
        palette: candidate.palette % palette::PALETTES.len(),
        layout_epoch: previous.layout_epoch,
    }
}

fn sanitize(params: &Parameters) -> Parameters {
    let mut out = sanitize_against(&Parameters::default(), params);
    out.band_count = params.band_count;
    out
}
