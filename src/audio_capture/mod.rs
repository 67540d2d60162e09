//! live microphone input
//!
//! ```text
//! cpal callback ──(mono Vec<f32>)──> mpsc ──try_recv──> Analyser ──> get_frame()
//! ```
//!
//! the callback runs on cpal's audio thread, the render loop only ever drains
//! what already arrived, so a stalled device never blocks a frame

/// configs for `CaptureSource`
pub mod config;

use std::fmt;
use std::sync::mpsc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::analyser::{config::AnalyserConfig, Analyser};
use crate::source::{Domain, SampleSource};
use crate::utils;
use config::Config;

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    DeviceNotFound,
    BuildStream(String),
    PlayStream(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DeviceNotFound => write!(f, "audio input device not found"),
            Error::BuildStream(e) => write!(f, "failed to build input stream: {}", e),
            Error::PlayStream(e) => write!(f, "failed to start input stream: {}", e),
        }
    }
}

impl std::error::Error for Error {}

pub struct CaptureSource {
    // dropping the stream stops the capture
    _stream: cpal::Stream,
    receiver: mpsc::Receiver<Vec<f32>>,
    analyser: Analyser,
}

/// captured blocks waiting for the next `get_frame()`, newer ones are dropped once full
pub const QUEUE_BOUND: usize = 32;

impl CaptureSource {
    pub fn init(config: Config, analyser: AnalyserConfig) -> Result<Self, Error> {
        let device = find_device(&config.device)?;

        let supported = device
            .default_input_config()
            .map_err(|e| Error::BuildStream(e.to_string()))?;
        let channels = supported.channels();

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: match config.sample_rate {
                Some(rate) => cpal::SampleRate(rate),
                None => supported.sample_rate(),
            },
            buffer_size: match config.latency {
                Some(latency) => cpal::BufferSize::Fixed(latency),
                None => cpal::BufferSize::Default,
            },
        };
        log::debug!(
            "capturing from {:?} with {} channel(s) at {} Hz",
            device.name().unwrap_or_default(),
            channels,
            stream_config.sample_rate.0
        );

        let (sender, receiver) = mpsc::sync_channel(QUEUE_BOUND);
        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, sender),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, sender),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, sender),
        }
        .map_err(|e| Error::BuildStream(e.to_string()))?;

        stream
            .play()
            .map_err(|e| Error::PlayStream(e.to_string()))?;

        Ok(CaptureSource {
            _stream: stream,
            receiver,
            analyser: Analyser::new(analyser),
        })
    }

    /// names of all input devices of the default host
    pub fn fetch_devices() -> Result<Vec<String>, Error> {
        let host = cpal::default_host();
        let devices = host.input_devices().map_err(|_| Error::DeviceNotFound)?;
        Ok(devices.filter_map(|d| d.name().ok()).collect())
    }

    pub fn analyser(&self) -> &Analyser {
        &self.analyser
    }

    /// moves everything captured since the last call into the analyser
    fn drain(&mut self) {
        while let Ok(data) = self.receiver.try_recv() {
            self.analyser.push(&data);
        }
    }
}

impl SampleSource for CaptureSource {
    fn get_frame(&mut self, domain: Domain) -> Option<&[u8]> {
        self.drain();
        self.analyser.get_frame(domain)
    }
}

fn build_stream<T: cpal::Sample + Send + 'static>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    sender: mpsc::SyncSender<Vec<f32>>,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    let channels = config.channels as usize;
    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| forward(&sender, data, channels),
        |e| log::warn!("audio capture stream error: {}", e),
    )
}

/// downmixes one callback block and queues it without ever blocking the audio thread
fn forward<T: cpal::Sample>(sender: &mpsc::SyncSender<Vec<f32>>, data: &[T], channels: usize) {
    let samples: Vec<f32> = data.iter().map(|s| s.to_f32()).collect();
    // full queue or dropped receiver, either way the block is not needed
    sender.try_send(utils::mono(&samples, channels)).ok();
}

fn find_device(name: &str) -> Result<cpal::Device, Error> {
    let host = cpal::default_host();

    match name {
        "default" => host.default_input_device().ok_or(Error::DeviceNotFound),
        name => host
            .input_devices()
            .map_err(|_| Error::DeviceNotFound)?
            .find(|d| d.name().map(|n| n == name).unwrap_or(false))
            .ok_or(Error::DeviceNotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_read_well() {
        assert_eq!(Error::DeviceNotFound.to_string(), "audio input device not found");
        assert_eq!(
            Error::PlayStream(String::from("busy")).to_string(),
            "failed to start input stream: busy"
        );
    }

    #[test]
    fn integer_samples_are_normalized() {
        let (sender, receiver) = mpsc::sync_channel(QUEUE_BOUND);
        forward(&sender, &[i16::MAX, i16::MIN, i16::MAX, i16::MAX], 2);
        forward(&sender, &[32_768u16], 1);
        forward(&sender, &[0.25f32, 0.75], 2);

        assert_eq!(receiver.try_recv(), Ok(vec![0.0, 1.0]));
        assert_eq!(receiver.try_recv(), Ok(vec![0.0]));
        assert_eq!(receiver.try_recv(), Ok(vec![0.5]));
    }

    #[test]
    fn queue_drops_blocks_once_full() {
        let (sender, receiver) = mpsc::sync_channel(QUEUE_BOUND);
        for _ in 0..QUEUE_BOUND * 4 {
            forward(&sender, &[0.5f32; 64], 1);
        }
        assert_eq!(receiver.try_iter().count(), QUEUE_BOUND);

        // room again after draining
        forward(&sender, &[0.5f32; 64], 1);
        assert_eq!(receiver.try_iter().count(), 1);
    }

    #[test]
    fn default_config_uses_default_device() {
        let config = Config::default();
        assert_eq!(config.device, "default");
        assert!(config.sample_rate.is_none());
    }
}
