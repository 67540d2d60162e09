//! Downsamples raw byte frames into the fixed size sample set every strategy draws from.
//!
//! ```text
//!  raw frame (M bytes)       only the lower half carries energy
//! |||||||||||||||||||||||||||||||||..............................
//!           ↓ pick floor(i / K * M / 2), amplify, clamp
//! ||||||||||||||||  visual samples (K bytes)
//! ```

use std::ops::Deref;

use crate::config::ReducerConfig;
use crate::source::Domain;

/// fixed length sample set derived from one raw frame, every element is a valid byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualSamples(Vec<u8>);

impl VisualSamples {
    pub fn zeros(len: usize) -> Self {
        Self(vec![0; len])
    }

    /// what a frame looks like while no source is attached
    pub fn idle(len: usize, domain: Domain) -> Self {
        match domain {
            Domain::Time => Self(vec![128; len]),
            Domain::Frequency => Self::zeros(len),
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for VisualSamples {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for VisualSamples {
    fn from(samples: Vec<u8>) -> Self {
        Self(samples)
    }
}

#[derive(Debug, Clone)]
pub struct Reducer {
    config: ReducerConfig,
}

impl Reducer {
    pub fn new(config: ReducerConfig) -> Self {
        Self { config }
    }

    pub fn resolution(&self) -> usize {
        self.config.resolution
    }

    /// reduces a frame of the given domain
    ///
    /// frequency frames use the lower half and get amplified,
    /// time frames are spread over the whole frame and left untouched so 128 stays the centerline
    pub fn reduce(&self, raw: &[u8], domain: Domain) -> VisualSamples {
        match domain {
            Domain::Frequency => self.reduce_frequency(raw),
            Domain::Time => self.reduce_time(raw),
        }
    }

    /// element i = min(255, raw[floor(i / K * M / 2)] * amplification)
    pub fn reduce_frequency(&self, raw: &[u8]) -> VisualSamples {
        let k = self.config.resolution;
        let m = raw.len();
        if m == 0 || k == 0 {
            return VisualSamples::zeros(k);
        }

        let amplification = self.config.amplification.max(0.0);
        let samples = (0..k)
            .map(|i| {
                // integer form of floor(i / K * M / 2)
                let index = (i * m) / (2 * k);
                amplify(raw[index], amplification)
            })
            .collect();

        VisualSamples(samples)
    }

    pub fn reduce_time(&self, raw: &[u8]) -> VisualSamples {
        let k = self.config.resolution;
        let m = raw.len();
        if m == 0 || k == 0 {
            return VisualSamples::zeros(k);
        }

        VisualSamples((0..k).map(|i| raw[(i * m) / k]).collect())
    }
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new(ReducerConfig::default())
    }
}

#[inline]
fn amplify(value: u8, amplification: f32) -> u8 {
    (value as f32 * amplification).min(255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_has_fixed_length_for_any_frame() {
        let reducer = Reducer::default();
        for m in [2usize, 3, 7, 64, 128, 1000, 1024, 2048, 32_768] {
            let raw: Vec<u8> = (0..m).map(|i| (i * 37 % 256) as u8).collect();
            assert_eq!(reducer.reduce_frequency(&raw).len(), 128, "m = {}", m);
            assert_eq!(reducer.reduce_time(&raw).len(), 128, "m = {}", m);
        }
    }

    #[test]
    fn amplifies_and_clamps() {
        let reducer = Reducer::default();
        let out = reducer.reduce_frequency(&[100; 256]);
        assert!(out.iter().all(|v| *v == 150));

        let out = reducer.reduce_frequency(&[200; 256]);
        assert!(out.iter().all(|v| *v == 255));
    }

    #[test]
    fn reads_only_lower_half() {
        let reducer = Reducer::default();
        let mut raw = vec![0u8; 256];
        for v in raw[128..].iter_mut() {
            *v = 255;
        }
        assert!(reducer.reduce_frequency(&raw).iter().all(|v| *v == 0));
    }

    #[test]
    fn picks_floor_index() {
        let reducer = Reducer::default();
        let raw: Vec<u8> = (0..=255).collect();
        let out = reducer.reduce_frequency(&raw);
        // M = 256, K = 128 -> index i
        assert_eq!(out[0], 0);
        assert_eq!(out[10], 15);
        assert_eq!(out[127], (127.0f32 * 1.5) as u8);
    }

    #[test]
    fn empty_frame_gives_zeros() {
        let reducer = Reducer::default();
        assert_eq!(reducer.reduce(&[], Domain::Frequency), VisualSamples::zeros(128));
        assert_eq!(reducer.reduce(&[], Domain::Time), VisualSamples::zeros(128));
    }

    #[test]
    fn silence_stays_silent() {
        let reducer = Reducer::default();
        assert!(reducer.reduce_frequency(&[0; 128]).iter().all(|v| *v == 0));
    }

    #[test]
    fn time_domain_keeps_centerline() {
        let reducer = Reducer::default();
        assert!(reducer.reduce_time(&[128; 2048]).iter().all(|v| *v == 128));
    }

    #[test]
    fn deterministic() {
        let reducer = Reducer::default();
        let raw: Vec<u8> = (0..1024).map(|i| (i % 251) as u8).collect();
        assert_eq!(reducer.reduce_frequency(&raw), reducer.reduce_frequency(&raw));
    }
}
