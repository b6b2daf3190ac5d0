/// Smoothed per-band magnitudes in visual-index order, tagged with the layout
/// epoch they were computed for.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct BandState {
    pub epoch: u64,
    pub values: Vec<f32>,
}

impl BandState {
    pub fn zeroed(epoch: u64, band_count: usize) -> Self {
        Self {
            epoch,
            values: vec![0.0; band_count],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// One-pole IIR step: `next = prev * alpha + raw * (1 - alpha)`.
    /// Returns a new state; `self` is left as the published snapshot.
    pub fn smoothed(&self, raw: &[f32], alpha: f32) -> Self {
        debug_assert_eq!(raw.len(), self.values.len());

        let values = self
            .values
            .iter()
            .zip(raw)
            .map(|(&prev, &r)| prev * alpha + r * (1.0 - alpha))
            .collect();

        Self {
            epoch: self.epoch,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn converges_to_constant_input() {
        for alpha in [0.0, 0.25, 0.5, 0.9, 0.99] {
            let raw = vec![0.3, 1.7, 12.0, 0.0];
            let mut state = BandState::zeroed(0, raw.len());
            for _ in 0..5000 {
                state = state.smoothed(&raw, alpha);
            }
            for (got, want) in state.values.iter().zip(&raw) {
                assert_relative_eq!(*got, *want, epsilon = 1e-4, max_relative = 1e-4);
            }
        }
    }

    #[test]
    fn output_stays_between_previous_and_raw() {
        let state = BandState {
            epoch: 3,
            values: vec![1.0, 5.0, 2.0],
        };
        let raw = [4.0, 0.0, 2.0];
        let next = state.smoothed(&raw, 0.25);

        assert_eq!(next.epoch, 3);
        for ((&prev, &r), &v) in state.values.iter().zip(&raw).zip(&next.values) {
            assert!(v >= prev.min(r) && v <= prev.max(r));
        }
        assert_relative_eq!(next.values[0], 3.25);
        assert_relative_eq!(next.values[1], 1.25);
        assert_relative_eq!(next.values[2], 2.0);
    }

    #[test]
    fn zero_alpha_tracks_raw_immediately() {
        let state = BandState::zeroed(0, 2);
        let next = state.smoothed(&[0.5, 0.8], 0.0);
        assert_eq!(next.values, vec![0.5, 0.8]);
    }
}
