use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, Device, SampleFormat, Stream, StreamConfig};
use tracing::{info, warn};

use crate::types::AudioData;

const CHANNEL_CHUNKS: usize = 64;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Settings for a single fixed-length microphone recording.
#[derive(Clone, Debug)]
pub struct CaptureConfig {
    pub device_name: Option<String>,
    /// Length of the listen window.
    pub duration: Duration,
}

impl CaptureConfig {
    pub fn new(duration: Duration) -> Self {
        Self {
            device_name: None,
            duration,
        }
    }

    pub fn with_device(mut self, device_name: Option<String>) -> Self {
        self.device_name = device_name;
        self
    }
}

/// Record `config.duration` of mono audio at the device's native rate.
pub fn record_audio(config: &CaptureConfig) -> Result<AudioData> {
    let device = select_device(config.device_name.as_deref())?;
    let supported = device
        .default_input_config()
        .context("failed to query default input config")?;
    let stream_config = StreamConfig {
        channels: supported.channels(),
        sample_rate: supported.sample_rate(),
        buffer_size: BufferSize::Default,
    };
    let sample_rate = stream_config.sample_rate.0;
    let (sender, receiver) = mpsc::sync_channel::<Vec<f32>>(CHANNEL_CHUNKS);
    let finished = Arc::new(AtomicBool::new(false));
    let stream = open_stream(
        &device,
        &stream_config,
        supported.sample_format(),
        sender,
        finished.clone(),
    )?;

    info!(
        sample_rate,
        channels = stream_config.channels,
        duration_secs = config.duration.as_secs_f32(),
        "listening"
    );
    let frames_needed = (config.duration.as_secs_f64() * sample_rate as f64).ceil() as usize;
    let samples = collect(&stream, &receiver, frames_needed, config.duration)?;
    finished.store(true, Ordering::SeqCst);
    stream.pause().ok();

    Ok(AudioData {
        samples,
        sample_rate,
    })
}

fn select_device(name: Option<&str>) -> Result<Device> {
    let host = cpal::default_host();
    match name {
        Some(wanted) => {
            let mut devices = host
                .input_devices()
                .context("listing input devices failed")?;
            devices
                .find(|device| device.name().map(|n| n == wanted).unwrap_or(false))
                .ok_or_else(|| anyhow!("input device '{}' not found", wanted))
        }
        None => host
            .default_input_device()
            .context("no default input device available"),
    }
}

fn open_stream(
    device: &Device,
    config: &StreamConfig,
    format: SampleFormat,
    sender: SyncSender<Vec<f32>>,
    finished: Arc<AtomicBool>,
) -> Result<Stream> {
    let channels = config.channels as usize;
    let on_error = |err: cpal::StreamError| warn!(error = %err, "audio input stream error");
    let stream = match format {
        SampleFormat::F32 => device.build_input_stream(
            config,
            move |data: &[f32], _| forward(data.to_vec(), channels, &sender, &finished),
            on_error,
            None,
        ),
        SampleFormat::I16 => device.build_input_stream(
            config,
            move |data: &[i16], _| {
                let converted = data.iter().map(|&s| s as f32 / i16::MAX as f32).collect();
                forward(converted, channels, &sender, &finished)
            },
            on_error,
            None,
        ),
        SampleFormat::U16 => device.build_input_stream(
            config,
            move |data: &[u16], _| {
                let converted = data
                    .iter()
                    .map(|&s| (s as f32 / u16::MAX as f32) * 2.0 - 1.0)
                    .collect();
                forward(converted, channels, &sender, &finished)
            },
            on_error,
            None,
        ),
        other => bail!("unsupported input sample format {:?}", other),
    };
    stream
        .map_err(|err| anyhow!(err))
        .context("failed to build input stream")
}

fn forward(
    interleaved: Vec<f32>,
    channels: usize,
    sender: &SyncSender<Vec<f32>>,
    finished: &AtomicBool,
) {
    if finished.load(Ordering::Relaxed) || channels == 0 {
        return;
    }
    let _ = sender.try_send(crate::audio::decoder::downmix(&interleaved, channels));
}

fn collect(
    stream: &Stream,
    receiver: &Receiver<Vec<f32>>,
    frames_needed: usize,
    window: Duration,
) -> Result<Vec<f32>> {
    stream.play().context("failed to start capture stream")?;
    let deadline = Instant::now() + window + Duration::from_secs(1);
    let mut collected = Vec::with_capacity(frames_needed);
    while collected.len() < frames_needed && Instant::now() < deadline {
        match receiver.recv_timeout(POLL_INTERVAL) {
            Ok(chunk) => {
                let remaining = frames_needed - collected.len();
                collected.extend(chunk.into_iter().take(remaining));
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    if collected.len() < frames_needed {
        warn!(
            collected = collected.len(),
            expected = frames_needed,
            "capture window closed before the buffer filled"
        );
    }
    Ok(collected)
}
