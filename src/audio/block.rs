use crate::config::FftSize;

const SAMPLE_BYTES: usize = std::mem::size_of::<f32>();

/// The most recent `N` mono samples, ready for windowing.
#[derive(Clone, PartialEq, Debug)]
pub struct SampleBlock {
    samples: Vec<f32>,
}

impl SampleBlock {
    /// Decodes the last `size` complete little-endian `f32` samples out of the
    /// first `length` bytes of `buffer`. `None` if fewer than `size * 4` bytes
    /// are available.
    pub fn from_le_bytes(buffer: &[u8], length: usize, size: FftSize) -> Option<Self> {
        let length = length.min(buffer.len());
        let usable = length - length % SAMPLE_BYTES;
        let needed = size.get() * SAMPLE_BYTES;
        if usable < needed {
            return None;
        }

        let samples = buffer[usable - needed..usable]
            .chunks_exact(SAMPLE_BYTES)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        Some(Self { samples })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

/// Averages each interleaved frame of `channels` samples into one mono sample.
/// A trailing partial frame is ignored.
pub fn mix_to_mono(interleaved: &[f32], channels: usize, out: &mut Vec<f32>) {
    if channels <= 1 {
        out.extend_from_slice(interleaved);
        return;
    }
    let scale = 1.0 / channels as f32;
    out.extend(
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() * scale),
    );
}
