use crate::consts;
use crate::dsp::BandState;
use crate::visual::palette::{self, Rgb};

/// Drawable area in pixels. Bars are anchored to its bottom edge.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BarGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Rgb,
    pub alpha: u8,
}

/// Primary bar plus the translucent glow drawn behind it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BarVisual {
    pub primary: BarGeometry,
    pub glow: BarGeometry,
}

/// Turns smoothed band values into bar rectangles for the render tick.
#[derive(Default)]
pub struct VisualMapper {
    bars: Vec<BarVisual>,
}

impl VisualMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out one bar per band of `state`. The band count is taken from the
    /// state snapshot itself, so geometry and values always agree in length.
    pub fn map(&mut self, state: &BandState, palette_index: usize, canvas: Canvas) -> &[BarVisual] {
        self.bars.clear();

        let band_count = state.len();
        if band_count == 0 || canvas.width <= 0.0 || canvas.height <= 0.0 {
            return &self.bars;
        }

        let palette = palette::palette(palette_index);
        let n = band_count as f32;
        let bar_width = canvas.width * consts::BAR_AREA_FRACTION / n;
        let spacing = bar_width * consts::BAR_SPACING_FRACTION;
        let total_width = n * bar_width + (n - 1.0) * spacing;
        let start_x = (canvas.width - total_width) / 2.0;
        let max_height = canvas.height * consts::MAX_BAR_HEIGHT_FRACTION;

        for (index, &value) in state.values.iter().enumerate() {
            let x = start_x + index as f32 * (bar_width + spacing);
            let h = normalized_height(value, index, band_count);
            let height = (h * max_height).max(consts::MIN_BAR_HEIGHT);
            let y = canvas.height - height;
            let fill = palette.color_for(index, band_count);

            let glow_height = height * consts::GLOW_HEIGHT_FRACTION;
            let glow_y = y - (glow_height - height) / 2.0;

            self.bars.push(BarVisual {
                primary: BarGeometry {
                    x,
                    y,
                    width: bar_width * consts::PRIMARY_WIDTH_FRACTION,
                    height,
                    fill,
                    alpha: primary_alpha(value),
                },
                glow: BarGeometry {
                    x: x - consts::GLOW_X_OFFSET,
                    y: glow_y,
                    width: bar_width * consts::GLOW_WIDTH_FRACTION,
                    height: glow_height,
                    fill,
                    alpha: consts::GLOW_ALPHA,
                },
            });
        }

        &self.bars
    }
}

/// First visual index that gets the bass height boost.
pub fn bass_region_start(band_count: usize) -> usize {
    band_count - (band_count as f64 * consts::BASS_BAND_SHARE) as usize
}

/// Log-scaled height in `[0, 1]`, times 1.3 for the bass bars.
///
/// The bass boost is applied after the clamp, so a loud bass bar may reach
/// 1.3x the nominal maximum height.
pub fn normalized_height(value: f32, index: usize, band_count: usize) -> f32 {
    let h = ((1.0 + value.max(0.0) * consts::LOG_INPUT_GAIN).log10() / consts::LOG_FULL_SCALE)
        .min(1.0);

    if index >= bass_region_start(band_count) {
        h * consts::BASS_HEIGHT_BOOST
    } else {
        h
    }
}

pub fn primary_alpha(value: f32) -> u8 {
    (consts::PRIMARY_ALPHA_BASE + value * consts::PRIMARY_ALPHA_GAIN).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CANVAS: Canvas = Canvas {
        width: 1920.0,
        height: 1080.0,
    };

    #[test]
    fn silence_renders_floor_height() {
        let state = BandState::zeroed(0, 48);
        let mut mapper = VisualMapper::new();
        let bars = mapper.map(&state, 0, CANVAS);

        assert_eq!(bars.len(), 48);
        for bar in bars {
            assert_eq!(bar.primary.height, consts::MIN_BAR_HEIGHT);
            assert_eq!(bar.primary.y, CANVAS.height - consts::MIN_BAR_HEIGHT);
            assert_eq!(bar.primary.alpha, 180);
        }
    }

    #[test]
    fn bass_boost_applies_to_top_forty_percent_only() {
        let band_count = 48;
        assert_eq!(bass_region_start(band_count), 29);

        let value = 0.05;
        let base = ((1.0 + value * 80.0f32).log10() / 2.2).min(1.0);
        for k in 0..band_count {
            let h = normalized_height(value, k, band_count);
            if k >= 29 {
                assert_relative_eq!(h, base * 1.3);
            } else {
                assert_relative_eq!(h, base);
            }
        }
    }

    #[test]
    fn loud_bass_bar_overshoots_max_height() {
        let h = normalized_height(1000.0, 47, 48);
        assert_relative_eq!(h, 1.3);
        let h = normalized_height(1000.0, 0, 48);
        assert_relative_eq!(h, 1.0);
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(primary_alpha(0.0), 180);
        assert_eq!(primary_alpha(0.1), 200);
        assert_eq!(primary_alpha(10.0), 255);
        assert_eq!(primary_alpha(-10.0), 0);
    }

    #[test]
    fn row_is_centered_and_bottom_anchored() {
        let state = BandState {
            epoch: 0,
            values: vec![0.2; 24],
        };
        let mut mapper = VisualMapper::new();
        let bars = mapper.map(&state, 1, CANVAS);

        let bar_width = CANVAS.width * 0.85 / 24.0;
        let spacing = bar_width * 0.1;
        let total = 24.0 * bar_width + 23.0 * spacing;
        let left_margin = bars[0].primary.x;
        let right_margin = CANVAS.width - (bars[23].primary.x + bar_width);
        assert_relative_eq!(left_margin, (CANVAS.width - total) / 2.0, epsilon = 1e-3);
        assert_relative_eq!(left_margin, right_margin, epsilon = 1e-3);

        for pair in bars.windows(2) {
            assert_relative_eq!(
                pair[1].primary.x - pair[0].primary.x,
                bar_width + spacing,
                epsilon = 1e-3
            );
        }
        for bar in bars {
            assert_relative_eq!(bar.primary.y + bar.primary.height, CANVAS.height, epsilon = 1e-3);
            assert_relative_eq!(bar.primary.width, bar_width * 0.9, epsilon = 1e-4);
        }
    }

    #[test]
    fn glow_surrounds_primary_with_fixed_alpha() {
        let state = BandState {
            epoch: 0,
            values: vec![0.4; 32],
        };
        let mut mapper = VisualMapper::new();
        let bars = mapper.map(&state, 2, CANVAS);

        for bar in bars {
            let (p, g) = (bar.primary, bar.glow);
            assert_eq!(g.alpha, consts::GLOW_ALPHA);
            assert!(g.alpha < p.alpha / 2);
            assert_eq!(g.fill, p.fill);
            assert_relative_eq!(g.height, p.height * 1.2, epsilon = 1e-3);
            assert_relative_eq!(g.y + g.height / 2.0, p.y + p.height / 2.0, epsilon = 1e-3);
            assert_relative_eq!(g.x, p.x - 1.0);
        }
    }

    #[test]
    fn colors_follow_selected_palette() {
        let state = BandState::zeroed(0, 16);
        let mut mapper = VisualMapper::new();
        let bars = mapper.map(&state, 3, CANVAS);
        let ocean = &palette::PALETTES[3];

        assert_eq!(bars[0].primary.fill, ocean.colors[0]);
        assert_eq!(bars[15].primary.fill, ocean.colors[7]);
    }

    #[test]
    fn empty_canvas_yields_no_bars() {
        let state = BandState::zeroed(0, 48);
        let mut mapper = VisualMapper::new();
        let canvas = Canvas {
            width: 0.0,
            height: 600.0,
        };
        assert!(mapper.map(&state, 0, canvas).is_empty());
    }
}
