use rustfft::{Fft, FftPlanner, num_complex::Complex};
use std::sync::Arc;

use crate::config::FftSize;
use crate::error::FrameError;

/// Forward FFT planned once for a fixed power-of-two size.
///
/// Output is scaled by 1/N so bin magnitudes do not grow with the block
/// length; the height curve constants assume this scaling.
pub struct SpectralTransform {
    size: FftSize,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl SpectralTransform {
    pub fn new(size: FftSize) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(size.get());
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        Self { size, fft, scratch }
    }

    /// Transforms `buffer` in place.
    pub fn process(&mut self, buffer: &mut [Complex<f32>]) -> Result<(), FrameError> {
        if buffer.len() != self.size.get() {
            return Err(FrameError::BlockSize {
                expected: self.size.get(),
                actual: buffer.len(),
            });
        }

        self.fft.process_with_scratch(buffer, &mut self.scratch);

        let scale = 1.0 / self.size.get() as f32;
        for c in buffer.iter_mut() {
            *c *= scale;
        }
        Ok(())
    }
}
