use rustfft::num_complex::Complex;

use crate::config::{BandCount, FftSize, Parameters};
use crate::consts;
use crate::error::FrameError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BandGroup {
    Bass,
    Mid,
    High,
}

/// Bins `[start, end)` reduced into the bar at `visual_index`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BandRange {
    pub group: BandGroup,
    pub start: usize,
    pub end: usize,
}

impl BandRange {
    pub fn width(&self) -> usize {
        self.end - self.start
    }
}

/// Per-group multipliers for one frame, read from a single parameter snapshot.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GroupGains {
    pub bass: f32,
    pub mid: f32,
    pub high: f32,
    pub sensitivity: f32,
}

impl GroupGains {
    pub fn for_group(&self, group: BandGroup) -> f32 {
        let boost = match group {
            BandGroup::Bass => self.bass,
            BandGroup::Mid => self.mid,
            BandGroup::High => self.high,
        };
        boost * self.sensitivity
    }
}

impl From<&Parameters> for GroupGains {
    fn from(params: &Parameters) -> Self {
        Self {
            bass: params.bass_boost,
            mid: params.mid_boost,
            high: params.high_boost,
            sensitivity: params.sensitivity,
        }
    }
}

/// Band-to-bin map for one (fft size, band count) pair, ordered by visual index.
///
/// Layout, left to right: high bands ascending, mid bands ascending, then the
/// bass bands mirrored so the lowest bass band is the rightmost bar.
pub struct BandPlan {
    half: usize,
    bands: Vec<BandRange>,
}

impl BandPlan {
    pub fn new(size: FftSize, band_count: BandCount) -> Self {
        let half = size.half();
        let half_f = half as f64;
        let (bass, mid, high) = band_count.group_sizes();

        let bass_end = half_f * consts::BASS_SPECTRUM_END;
        let mid_end = half_f * consts::MID_SPECTRUM_END;

        let bass_ranges = split_region(BandGroup::Bass, 0.0, bass_end, bass);
        let mid_ranges = split_region(BandGroup::Mid, bass_end, mid_end, mid);
        let high_ranges = split_region(BandGroup::High, mid_end, half_f, high);

        let mut bands = Vec::with_capacity(band_count.get());
        bands.extend(high_ranges);
        bands.extend(mid_ranges);
        bands.extend(bass_ranges.into_iter().rev());

        Self { half, bands }
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn bands(&self) -> &[BandRange] {
        &self.bands
    }

    /// Mean bin magnitude per band, scaled by the group boost and sensitivity.
    /// `out` is indexed by visual index.
    pub fn aggregate(
        &self,
        spectrum: &[Complex<f32>],
        gains: &GroupGains,
        out: &mut [f32],
    ) -> Result<(), FrameError> {
        if spectrum.len() < self.half {
            return Err(FrameError::SpectrumSize {
                expected: self.half,
                actual: spectrum.len(),
            });
        }
        if out.len() != self.bands.len() {
            return Err(FrameError::StaleLayout);
        }

        for (dst, band) in out.iter_mut().zip(&self.bands) {
            let sum: f32 = spectrum[band.start..band.end].iter().map(|c| c.norm()).sum();
            let mean = sum / band.width().max(1) as f32;
            *dst = mean * gains.for_group(band.group);
        }
        Ok(())
    }
}

/// Splits `[lo, hi)` (fractional bin positions) into `count` contiguous ranges.
/// Band `i` starts at `floor(lo + i * (hi - lo) / count)`; each band ends where
/// the next begins and the last ends at `floor(hi)`.
fn split_region(group: BandGroup, lo: f64, hi: f64, count: usize) -> Vec<BandRange> {
    let end_bin = hi as usize;
    let span = hi - lo;
    let start_of = |i: usize| ((lo + i as f64 * span / count as f64) as usize).min(end_bin);

    (0..count)
        .map(|i| {
            let start = start_of(i);
            let end = if i + 1 == count { end_bin } else { start_of(i + 1) };
            BandRange { group, start, end }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn plan(n: usize, b: usize) -> BandPlan {
        BandPlan::new(FftSize::new(n).unwrap(), BandCount::new(b).unwrap())
    }

    fn unit_gains() -> GroupGains {
        GroupGains {
            bass: 1.0,
            mid: 1.0,
            high: 1.0,
            sensitivity: 1.0,
        }
    }

    #[test]
    fn ranges_partition_the_half_spectrum() {
        for n in [64, 256, 512, 1024, 4096] {
            for b in 3..=96 {
                let plan = plan(n, b);
                assert_eq!(plan.len(), b);

                let mut by_start: Vec<BandRange> = plan.bands().to_vec();
                by_start.sort_by_key(|r| (r.start, r.end));

                let total: usize = by_start.iter().map(BandRange::width).sum();
                assert_eq!(total, n / 2, "n={n} b={b}");

                let mut cursor = 0;
                for r in &by_start {
                    assert!(r.start <= r.end);
                    assert_eq!(r.start, cursor, "gap or overlap at n={n} b={b}");
                    cursor = r.end;
                }
                assert_eq!(cursor, n / 2);
            }
        }
    }

    #[test]
    fn visual_order_is_high_mid_then_mirrored_bass() {
        let plan = plan(512, 48);
        let bands = plan.bands();

        assert!(bands[..10].iter().all(|r| r.group == BandGroup::High));
        assert!(bands[10..29].iter().all(|r| r.group == BandGroup::Mid));
        assert!(bands[29..].iter().all(|r| r.group == BandGroup::Bass));

        // Lowest frequencies end up in the rightmost bar.
        assert_eq!(bands[47].start, 0);
        assert!(bands[29].start > bands[47].start);
        // High and mid run left to right in ascending frequency.
        assert!(bands[0].start < bands[9].start);
        assert_eq!(bands[9].end, 256);
        assert!(bands[10].start < bands[28].start);
    }

    #[test]
    fn region_boundaries_match_cut_points() {
        let plan = plan(512, 48);
        let bands = plan.bands();

        // 10% of 256 bins = 25.6 -> bass ends at bin 25, mid ends at bin 128.
        let bass_max = bands[29..].iter().map(|r| r.end).max().unwrap();
        let mid_min = bands[10..29].iter().map(|r| r.start).min().unwrap();
        let mid_max = bands[10..29].iter().map(|r| r.end).max().unwrap();
        assert_eq!(bass_max, 25);
        assert_eq!(mid_min, 25);
        assert_eq!(mid_max, 128);
    }

    #[test]
    fn bass_band_starts_follow_floor_formula() {
        let plan = plan(512, 48);
        let bass: Vec<&BandRange> = plan.bands()[29..].iter().rev().collect();
        for (i, r) in bass.iter().enumerate() {
            let expected = (i as f64 * 25.6 / 19.0) as usize;
            assert_eq!(r.start, expected, "bass band {i}");
        }
    }

    #[test]
    fn aggregate_averages_magnitudes_and_applies_gains() {
        let plan = plan(64, 5);
        let spectrum = vec![Complex::new(3.0, 4.0); 64];
        let gains = GroupGains {
            bass: 2.0,
            mid: 3.0,
            high: 4.0,
            sensitivity: 0.5,
        };
        let mut out = vec![0.0; plan.len()];
        plan.aggregate(&spectrum, &gains, &mut out).unwrap();

        for (value, band) in out.iter().zip(plan.bands()) {
            let expected = 5.0 * gains.for_group(band.group);
            assert_abs_diff_eq!(*value, expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn zero_width_band_reads_zero() {
        // 80 bars on a 64-point transform: 32 bass bands share 3 bins.
        let plan = plan(64, 80);
        let spectrum = vec![Complex::new(1.0, 0.0); 64];
        let mut out = vec![0.0; plan.len()];
        plan.aggregate(&spectrum, &unit_gains(), &mut out).unwrap();

        let mut saw_empty = false;
        for (value, band) in out.iter().zip(plan.bands()) {
            if band.width() == 0 {
                saw_empty = true;
                assert_eq!(*value, 0.0);
            } else {
                assert_abs_diff_eq!(*value, 1.0, epsilon = 1e-6);
            }
        }
        assert!(saw_empty);
    }

    #[test]
    fn raising_sensitivity_never_lowers_a_band() {
        let plan = plan(512, 48);
        let spectrum: Vec<Complex<f32>> = (0..512)
            .map(|i| Complex::new((i as f32 * 0.37).sin(), (i as f32 * 0.11).cos()))
            .collect();

        let mut previous = vec![0.0; plan.len()];
        for step in 1..=50 {
            let gains = GroupGains {
                sensitivity: step as f32 * 0.1,
                ..GroupGains::from(&Parameters::default())
            };
            let mut out = vec![0.0; plan.len()];
            plan.aggregate(&spectrum, &gains, &mut out).unwrap();
            for (now, before) in out.iter().zip(&previous) {
                assert!(now >= before);
            }
            previous = out;
        }
    }

    #[test]
    fn short_spectrum_is_rejected() {
        let plan = plan(512, 48);
        let spectrum = vec![Complex::new(0.0, 0.0); 100];
        let mut out = vec![0.0; 48];
        assert_eq!(
            plan.aggregate(&spectrum, &unit_gains(), &mut out),
            Err(FrameError::SpectrumSize {
                expected: 256,
                actual: 100
            })
        );
    }
}
