use log::{debug, trace};
use rustfft::num_complex::Complex;
use std::sync::Arc;

use crate::audio::block::{self, SampleBlock};
use crate::config::{FftSize, Parameters};
use crate::dsp::{BandPlan, BandState, GroupGains, HannWindow, SpectralTransform};
use crate::error::FrameError;
use crate::params::ParameterStore;

/// Ingestion side of the pipeline: window, transform, band aggregation and
/// smoothing, run once per delivered block.
///
/// Every frame reads one parameter snapshot, builds a complete new band state
/// and publishes it in a single swap. A frame that fails anywhere is dropped
/// and the previously published state stays visible.
pub struct AudioAnalyzer {
    size: FftSize,
    window: HannWindow,
    transform: SpectralTransform,
    plan: BandPlan,
    plan_epoch: u64,
    tail: Vec<f32>,
    mono: Vec<f32>,
    frame: Vec<Complex<f32>>,
    raw: Vec<f32>,
    store: Arc<ParameterStore>,
}

impl AudioAnalyzer {
    pub fn new(size: FftSize, store: Arc<ParameterStore>) -> Self {
        let params = store.snapshot();
        let plan = BandPlan::new(size, params.band_count);

        Self {
            size,
            window: HannWindow::new(size),
            transform: SpectralTransform::new(size),
            raw: vec![0.0; plan.len()],
            plan,
            plan_epoch: params.layout_epoch,
            tail: Vec::with_capacity(size.get() * 2),
            mono: Vec::new(),
            frame: vec![Complex::new(0.0, 0.0); size.get()],
            store,
        }
    }

    /// Entry point for the capture callback: interleaved samples with
    /// `channels` channels per frame.
    pub fn add_interleaved(&mut self, data: &[f32], channels: usize) {
        let mut mono = std::mem::take(&mut self.mono);
        mono.clear();
        block::mix_to_mono(data, channels, &mut mono);
        self.add_samples(&mono);
        self.mono = mono;
    }

    /// Appends mono samples, keeps only the most recent `N`, and processes a
    /// frame once `N` are available. A delivery with no samples runs nothing.
    pub fn add_samples(&mut self, samples: &[f32]) {
        if samples.is_empty() {
            return;
        }

        let n = self.size.get();
        self.tail.extend_from_slice(samples);

        if self.tail.len() > n {
            self.tail.drain(0..self.tail.len() - n);
        }
        if self.tail.len() < n {
            return;
        }

        let tail = std::mem::take(&mut self.tail);
        let result = self.process_samples(&tail);
        self.tail = tail;
        self.record(result);
    }

    /// Byte-level capture interface: decodes the last `N` little-endian floats
    /// from the first `length` bytes of `buffer`. Short buffers are skipped.
    pub fn add_bytes(&mut self, buffer: &[u8], length: usize) {
        let Some(block) = SampleBlock::from_le_bytes(buffer, length, self.size) else {
            trace!("Skipping short capture buffer ({length} bytes)");
            return;
        };
        let result = self.process_block(&block);
        self.record(result);
    }

    pub fn process_block(&mut self, block: &SampleBlock) -> Result<(), FrameError> {
        self.process_samples(block.samples())
    }

    /// Samples currently held for the next frame, oldest first.
    pub fn buffered_samples(&self) -> &[f32] {
        &self.tail
    }

    fn process_samples(&mut self, samples: &[f32]) -> Result<(), FrameError> {
        if samples.len() != self.size.get() {
            return Err(FrameError::BlockSize {
                expected: self.size.get(),
                actual: samples.len(),
            });
        }

        let params = self.store.snapshot();
        self.sync_layout(&params);

        self.window.apply(samples, &mut self.frame);
        self.transform.process(&mut self.frame)?;
        self.plan.aggregate(
            &self.frame[..self.size.half()],
            &GroupGains::from(params.as_ref()),
            &mut self.raw,
        )?;

        let published = self.store.band_state();
        let previous = if published.epoch == params.layout_epoch && published.len() == self.raw.len()
        {
            published
        } else if published.epoch > params.layout_epoch {
            return Err(FrameError::StaleLayout);
        } else {
            Arc::new(BandState::zeroed(params.layout_epoch, self.raw.len()))
        };

        let next = previous.smoothed(&self.raw, params.smoothing);
        if !self.store.publish_bands(next) {
            return Err(FrameError::StaleLayout);
        }
        Ok(())
    }

    /// Rebuilds the band plan and raw buffer when the band count changed.
    fn sync_layout(&mut self, params: &Parameters) {
        if self.plan_epoch == params.layout_epoch && self.plan.len() == params.band_count.get() {
            return;
        }

        debug!(
            "Rebuilding band plan: {} bands, epoch {}",
            params.band_count.get(),
            params.layout_epoch
        );
        self.plan = BandPlan::new(self.size, params.band_count);
        self.raw = vec![0.0; self.plan.len()];
        self.plan_epoch = params.layout_epoch;
    }

    fn record(&mut self, result: Result<(), FrameError>) {
        if let Err(err) = result {
            self.store.record_dropped_frame();
            trace!("Frame dropped: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BandCount;
    use crate::consts;
    use crate::visual::{Canvas, VisualMapper};

    const N: usize = 512;

    fn setup() -> (Arc<ParameterStore>, AudioAnalyzer) {
        let store = Arc::new(ParameterStore::new(Parameters::default()));
        let analyzer = AudioAnalyzer::new(FftSize::new(N).unwrap(), store.clone());
        (store, analyzer)
    }

    fn sine(bin: usize, amplitude: f32) -> Vec<f32> {
        (0..N)
            .map(|i| {
                let phase = 2.0 * std::f64::consts::PI * bin as f64 * i as f64 / N as f64;
                (phase.sin() as f32) * amplitude
            })
            .collect()
    }

    #[test]
    fn silence_keeps_bands_at_zero_and_bars_at_floor() {
        let (store, mut analyzer) = setup();
        let silence = vec![0.0f32; N];

        for _ in 0..10 {
            analyzer.add_samples(&silence);
        }

        let state = store.band_state();
        assert_eq!(state.len(), 48);
        assert!(state.values.iter().all(|&v| v == 0.0));
        assert_eq!(store.dropped_frames(), 0);

        let mut mapper = VisualMapper::new();
        let canvas = Canvas {
            width: 1280.0,
            height: 720.0,
        };
        for bar in mapper.map(&state, 0, canvas) {
            assert_eq!(bar.primary.height, consts::MIN_BAR_HEIGHT);
        }
    }

    #[test]
    fn mid_frequency_sine_lights_mid_bands() {
        let (store, mut analyzer) = setup();
        // Bin 64 of 256 sits inside the mid region (bins 25..128).
        analyzer.add_samples(&sine(64, 0.8));

        let state = store.band_state();
        let (bass, mid, high) = BandCount::new(48).unwrap().group_sizes();
        let high_vals = &state.values[..high];
        let mid_vals = &state.values[high..high + mid];
        let bass_vals = &state.values[high + mid..];
        assert_eq!(bass_vals.len(), bass);

        let mid_peak = mid_vals.iter().cloned().fold(0.0f32, f32::max);
        let outside_peak = high_vals
            .iter()
            .chain(bass_vals)
            .cloned()
            .fold(0.0f32, f32::max);

        assert!(mid_peak > 0.01, "mid peak {mid_peak}");
        assert!(outside_peak < 0.01, "leakage {outside_peak}");
        assert!(mid_peak > outside_peak * 20.0);
    }

    #[test]
    fn short_delivery_waits_for_a_full_block() {
        let (store, mut analyzer) = setup();
        analyzer.add_samples(&sine(64, 1.0)[..N / 2]);
        assert!(store.band_state().values.iter().all(|&v| v == 0.0));

        analyzer.add_samples(&sine(64, 1.0)[N / 2..]);
        assert!(store.band_state().values.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn empty_delivery_does_not_advance_smoothing() {
        let (store, mut analyzer) = setup();
        store.set_smoothing(0.5);
        analyzer.add_samples(&sine(64, 1.0));
        let before = store.band_state();

        analyzer.add_samples(&[]);
        // One sample across two channels mixes down to nothing.
        analyzer.add_interleaved(&[0.3], 2);

        let after = store.band_state();
        assert_eq!(before.values, after.values);
        assert_eq!(analyzer.buffered_samples().len(), N);
    }

    #[test]
    fn only_the_most_recent_block_is_kept() {
        let (_store, mut analyzer) = setup();
        let mut long = vec![9.0f32; N * 3];
        long.extend(std::iter::repeat_n(0.25, N));
        analyzer.add_samples(&long);

        assert_eq!(analyzer.buffered_samples().len(), N);
        assert!(analyzer.buffered_samples().iter().all(|&s| s == 0.25));
    }

    #[test]
    fn short_byte_buffer_leaves_state_untouched() {
        let (store, mut analyzer) = setup();
        let bytes: Vec<u8> = sine(64, 1.0).iter().flat_map(|s| s.to_le_bytes()).collect();

        analyzer.add_bytes(&bytes, N * 4 - 1);
        assert!(store.band_state().values.iter().all(|&v| v == 0.0));

        analyzer.add_bytes(&bytes, bytes.len());
        assert!(store.band_state().values.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn band_count_change_takes_effect_on_next_frame() {
        let (store, mut analyzer) = setup();
        analyzer.add_samples(&sine(64, 1.0));

        store.set_band_count(BandCount::new(24).unwrap());
        let reset = store.band_state();
        assert_eq!(reset.len(), 24);
        assert!(reset.values.iter().all(|&v| v == 0.0));

        analyzer.add_samples(&sine(64, 1.0));
        let state = store.band_state();
        assert_eq!(state.len(), 24);
        assert_eq!(state.epoch, store.snapshot().layout_epoch);
        assert!(state.values.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn smoothing_blends_with_previous_frame() {
        let (store, mut analyzer) = setup();
        store.set_smoothing(0.5);

        analyzer.add_samples(&sine(64, 1.0));
        let first = store.band_state();
        analyzer.add_samples(&sine(64, 1.0));
        let second = store.band_state();

        for (a, b) in first.values.iter().zip(&second.values) {
            // raw r: first = r/2, second = r/2 * 0.5 + r * 0.5 = 1.5 * first
            approx::assert_relative_eq!(*b, *a * 1.5, epsilon = 1e-6, max_relative = 1e-4);
        }
    }

    #[test]
    fn stereo_input_is_mixed_down() {
        let (store, mut analyzer) = setup();
        let mono = sine(64, 1.0);
        let stereo: Vec<f32> = mono.iter().flat_map(|&s| [s, s]).collect();
        analyzer.add_interleaved(&stereo, 2);

        let (reference_store, mut reference) = setup();
        reference.add_samples(&mono);

        assert_eq!(store.band_state().values, reference_store.band_state().values);
    }
}
