use crate::audio::AudioAnalyzer;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::consts;

/// Health of the capture collaborator as seen by the control surface.
#[derive(Clone, PartialEq, Debug, Default)]
pub enum CaptureStatus {
    #[default]
    Stopped,
    Listening(String),
    Failed(String),
}

pub struct AudioStream {
    _stream: cpal::Stream,
}

impl AudioStream {
    pub fn new(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        sample_format: SampleFormat,
        analyzer: Arc<Mutex<AudioAnalyzer>>,
        status: Arc<Mutex<CaptureStatus>>,
    ) -> Result<Self, anyhow::Error> {
        let stream = match sample_format {
            cpal::SampleFormat::F32 => build_stream::<f32>(device, config, analyzer, status)?,
            cpal::SampleFormat::I16 => build_stream::<i16>(device, config, analyzer, status)?,
            cpal::SampleFormat::U16 => build_stream::<u16>(device, config, analyzer, status)?,
            other => return Err(anyhow::anyhow!("Unsupported sample format {other:?}")),
        };

        stream.play()?;

        Ok(Self { _stream: stream })
    }
}

pub fn list_input_devices() -> Vec<String> {
    cpal::default_host()
        .input_devices()
        .ok()
        .map(|iter| iter.filter_map(|d| d.name().ok()).collect())
        .unwrap_or_default()
}

pub fn default_input_device_name() -> Option<String> {
    cpal::default_host()
        .default_input_device()
        .and_then(|d| d.name().ok())
}

/// Opens the device at `device_idx` in `devices` and starts feeding the
/// analyzer. Failures are reported through `status`, never propagated.
pub fn create_audio_stream(
    device_idx: usize,
    devices: &[String],
    analyzer: Arc<Mutex<AudioAnalyzer>>,
    status: Arc<Mutex<CaptureStatus>>,
) -> Option<AudioStream> {
    match open_stream(device_idx, devices, analyzer, status.clone()) {
        Ok((stream, name)) => {
            info!("Capturing from {name}");
            *status.lock() = CaptureStatus::Listening(name);
            Some(stream)
        }
        Err(err) => {
            warn!("Failed to start audio capture: {err:#}");
            *status.lock() = CaptureStatus::Failed(format!("{err:#}"));
            None
        }
    }
}

/// Drops the current stream, waits, and opens a fresh one. Band state and
/// parameters live outside the stream and are not touched.
pub fn restart_audio_stream(
    current: &mut Option<AudioStream>,
    device_idx: usize,
    devices: &[String],
    analyzer: Arc<Mutex<AudioAnalyzer>>,
    status: Arc<Mutex<CaptureStatus>>,
) {
    debug!("Restarting audio capture...");
    current.take();
    *status.lock() = CaptureStatus::Stopped;

    thread::sleep(Duration::from_millis(consts::CAPTURE_RESTART_PAUSE_MS));

    *current = create_audio_stream(device_idx, devices, analyzer, status);
}

fn open_stream(
    device_idx: usize,
    devices: &[String],
    analyzer: Arc<Mutex<AudioAnalyzer>>,
    status: Arc<Mutex<CaptureStatus>>,
) -> Result<(AudioStream, String), anyhow::Error> {
    let host = cpal::default_host();

    // Get the device by matching name
    let device_name = devices
        .get(device_idx)
        .ok_or_else(|| anyhow::anyhow!("No audio input device available"))?;
    let device = host
        .input_devices()?
        .find(|d| d.name().ok().as_ref() == Some(device_name))
        .ok_or_else(|| anyhow::anyhow!("Audio device {device_name} is gone"))?;

    let supported_config = device.default_input_config()?;
    let sample_format = supported_config.sample_format();
    let stream_config: cpal::StreamConfig = supported_config.into();
    debug!(
        "Stream config: {} Hz, {} channels, {:?}",
        stream_config.sample_rate.0, stream_config.channels, sample_format
    );

    let stream = AudioStream::new(&device, &stream_config, sample_format, analyzer, status)?;
    Ok((stream, device_name.clone()))
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    analyzer: Arc<Mutex<AudioAnalyzer>>,
    status: Arc<Mutex<CaptureStatus>>,
) -> Result<cpal::Stream, anyhow::Error>
where
    T: Sample + FromSample<f32> + cpal::SizedSample,
    f32: FromSample<T>,
{
    let channels = config.channels as usize;
    let mut converted: Vec<f32> = Vec::new();

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            converted.clear();
            converted.extend(data.iter().map(|&s| s.to_sample::<f32>()));
            analyzer.lock().add_interleaved(&converted, channels);
        },
        move |err| {
            warn!("Stream error: {err}");
            *status.lock() = CaptureStatus::Failed(err.to_string());
        },
        None,
    )?;

    Ok(stream)
}
