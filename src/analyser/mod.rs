//! turns a continuous stream of PCM samples into the byte frames the render
//! pipeline pulls, the way a browser analyser node does
//!
//! ```text
//! push(&[f32]) ──> last fft_size samples ──┬──> time bytes       (fft_size)
//!                                          └──> blackman → fft → smoothing → dB → bytes
//!                                                                (fft_size / 2)
//! ```

/// configs for `Analyser`
pub mod config;

/// windowing, fft and byte conversion steps
pub mod processor;

use config::AnalyserConfig;
use processor::Spectrum;

use crate::source::{Domain, SampleSource};

pub struct Analyser {
    config: AnalyserConfig,
    spectrum: Spectrum,

    /// always exactly `fft_size` samples, zero padded at the start
    window: Vec<f32>,
    smoothed: Vec<f32>,
    magnitudes: Vec<f32>,

    time_frame: Vec<u8>,
    frequency_frame: Vec<u8>,

    received: bool,
}

impl Analyser {
    /// an invalid config is replaced by the default one
    pub fn new(config: AnalyserConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("invalid analyser config, using defaults: {}", e);
                AnalyserConfig::default()
            }
        };
        let size = config.fft_size;
        let bins = config.frequency_bin_count();

        Analyser {
            spectrum: Spectrum::new(size),
            window: vec![0.0; size],
            smoothed: vec![0.0; bins],
            magnitudes: vec![0.0; bins],
            time_frame: Vec::with_capacity(size),
            frequency_frame: Vec::with_capacity(bins),
            received: false,
            config,
        }
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.config.frequency_bin_count()
    }

    /// appends mono samples, only the newest `fft_size` are kept
    pub fn push(&mut self, data: &[f32]) {
        if data.is_empty() {
            return;
        }
        let size = self.window.len();
        if data.len() >= size {
            self.window.copy_from_slice(&data[data.len() - size..]);
        } else {
            self.window.drain(..data.len());
            self.window.extend_from_slice(data);
        }
        self.received = true;
    }

    /// forgets all samples and the smoothing history
    pub fn clear(&mut self) {
        self.window.iter_mut().for_each(|s| *s = 0.0);
        self.smoothed.iter_mut().for_each(|s| *s = 0.0);
        self.received = false;
    }

    pub fn time_domain(&mut self) -> &[u8] {
        processor::time_bytes(&self.window, &mut self.time_frame);
        &self.time_frame
    }

    /// every call advances the smoothing by one step
    pub fn frequency_domain(&mut self) -> &[u8] {
        self.spectrum.magnitudes(&self.window, &mut self.magnitudes);
        processor::smooth(
            &mut self.smoothed,
            &self.magnitudes,
            self.config.smoothing_time_constant,
        );
        processor::decibel_bytes(
            &self.smoothed,
            self.config.min_decibels,
            self.config.max_decibels,
            &mut self.frequency_frame,
        );
        &self.frequency_frame
    }
}

impl Default for Analyser {
    fn default() -> Self {
        Self::new(AnalyserConfig::default())
    }
}

impl SampleSource for Analyser {
    fn get_frame(&mut self, domain: Domain) -> Option<&[u8]> {
        if !self.received {
            return None;
        }
        Some(match domain {
            Domain::Time => self.time_domain(),
            Domain::Frequency => self.frequency_domain(),
        })
    }
}
