pub mod analyzer;
pub mod audio_stream;
pub mod block;

pub use analyzer::AudioAnalyzer;
pub use audio_stream::{AudioStream, CaptureStatus};
pub use block::SampleBlock;
