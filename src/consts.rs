/// Number of samples fed to each transform. Must be a power of 2 for FFT.
/// 512 samples at 48kHz = ~10ms of audio, ~94Hz per bin.
pub const FFT_SIZE: usize = 512;

/// Band count used on first launch.
pub const DEFAULT_BAND_COUNT: usize = 48;

/// Band counts reachable from the number keys 1-5.
pub const BAND_COUNT_PRESETS: [usize; 5] = [24, 32, 48, 64, 80];

/// Render tick rate. Independent of how often capture delivers audio.
pub const TARGET_FPS: f64 = 120.0;

/// The settings panel shown at startup hides itself after this long.
pub const SETTINGS_AUTO_HIDE_SECS: u64 = 5;

/// Share of the bands given to the bass group. The mid group gets the same
/// share and the high group takes whatever is left (about 20%).
pub const BASS_BAND_SHARE: f64 = 0.4;
pub const MID_BAND_SHARE: f64 = 0.4;

/// Fraction of the half-spectrum where the bass region ends.
pub const BASS_SPECTRUM_END: f64 = 0.1;

/// Fraction of the half-spectrum where the mid region ends.
pub const MID_SPECTRUM_END: f64 = 0.5;

/// Gain applied to the smoothed magnitude before the log10 in the height curve.
pub const LOG_INPUT_GAIN: f32 = 80.0;

/// log10 value that maps to a full-height bar.
pub const LOG_FULL_SCALE: f32 = 2.2;

/// Extra height for the bass bars on the right.
pub const BASS_HEIGHT_BOOST: f32 = 1.3;

/// Bars never shrink below this many pixels so silence still shows a row.
pub const MIN_BAR_HEIGHT: f32 = 4.0;

/// Tallest bar as a fraction of the canvas height.
pub const MAX_BAR_HEIGHT_FRACTION: f32 = 0.6;

/// Share of the canvas width occupied by bar slots.
pub const BAR_AREA_FRACTION: f32 = 0.85;

/// Gap between bars as a fraction of the bar width.
pub const BAR_SPACING_FRACTION: f32 = 0.1;

pub const PRIMARY_WIDTH_FRACTION: f32 = 0.9;
pub const GLOW_WIDTH_FRACTION: f32 = 1.1;
pub const GLOW_HEIGHT_FRACTION: f32 = 1.2;
pub const GLOW_X_OFFSET: f32 = 1.0;

/// Primary bar alpha = base + smoothed magnitude * gain, clamped to 255.
pub const PRIMARY_ALPHA_BASE: f32 = 180.0;
pub const PRIMARY_ALPHA_GAIN: f32 = 200.0;

/// Fixed alpha of the translucent glow bar behind each primary bar:
/// 80 drawn at half opacity.
pub const GLOW_ALPHA: u8 = 40;

/// Multiplicative step used by the sensitivity and bass boost shortcuts.
pub const STEP_UP: f32 = 1.2;
pub const STEP_DOWN: f32 = 0.8;

pub const BOOST_MIN: f32 = 1.0;
pub const BOOST_MAX: f32 = 15.0;
pub const SENSITIVITY_MIN: f32 = 0.1;
pub const SENSITIVITY_MAX: f32 = 5.0;
pub const SMOOTHING_MIN: f32 = 0.0;
pub const SMOOTHING_MAX: f32 = 0.99;

/// Defaults tuned for a bass-heavy look.
pub const DEFAULT_SMOOTHING: f32 = 0.25;
pub const DEFAULT_BASS_BOOST: f32 = 6.0;
pub const DEFAULT_MID_BOOST: f32 = 2.5;
pub const DEFAULT_HIGH_BOOST: f32 = 1.5;
pub const DEFAULT_SENSITIVITY: f32 = 1.0;

/// Pause between tearing down and rebuilding the capture stream.
pub const CAPTURE_RESTART_PAUSE_MS: u64 = 200;
