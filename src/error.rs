use thiserror::Error;

/// Configuration values that the pipeline cannot be built from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("fft size {0} is not a power of two >= 2")]
    FftSize(usize),

    #[error("band count {0} leaves a band group empty (need at least 3 bands)")]
    BandCount(usize),
}

/// A single frame that could not be processed. The frame is dropped and the
/// previously published band state stays in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("sample block holds {actual} samples, transform expects {expected}")]
    BlockSize { expected: usize, actual: usize },

    #[error("spectrum holds {actual} bins, band plan expects {expected}")]
    SpectrumSize { expected: usize, actual: usize },

    #[error("band state was reconfigured while the frame was in flight")]
    StaleLayout,
}
