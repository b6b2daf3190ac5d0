use rustfft::num_complex::Complex;

use crate::config::FftSize;

/// Precomputed Hann window coefficients, `0.5 * (1 - cos(2πi / (N-1)))`.
pub struct HannWindow {
    coeffs: Vec<f32>,
}

impl HannWindow {
    pub fn new(size: FftSize) -> Self {
        let n = size.get();
        let denom = (n - 1) as f64;
        let coeffs = (0..n)
            .map(|i| (0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / denom).cos())) as f32)
            .collect();
        Self { coeffs }
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn coeffs(&self) -> &[f32] {
        &self.coeffs
    }

    /// Weights `samples` into `out` as real-valued complex samples.
    /// Both slices must match the window length.
    pub fn apply(&self, samples: &[f32], out: &mut [Complex<f32>]) {
        debug_assert_eq!(samples.len(), self.coeffs.len());
        debug_assert_eq!(out.len(), self.coeffs.len());

        for ((dst, &sample), &w) in out.iter_mut().zip(samples).zip(&self.coeffs) {
            *dst = Complex::new(sample * w, 0.0);
        }
    }
}
