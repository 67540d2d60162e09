#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalyserConfig {
    /// samples per analysis window, power of two between 32 and 32768
    ///
    /// frequency frames have `fft_size / 2` bins
    pub fft_size: usize,

    /// how much of the previous frequency frame survives into the next one (0..=1)
    pub smoothing_time_constant: f32,

    /// magnitudes at or below this map to 0
    pub min_decibels: f32,

    /// magnitudes at or above this map to 255
    pub max_decibels: f32,
}
impl Default for AnalyserConfig {
    fn default() -> Self {
        AnalyserConfig {
            fft_size: 2048,
            smoothing_time_constant: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

impl AnalyserConfig {
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.fft_size.is_power_of_two() || !(32..=32_768).contains(&self.fft_size) {
            return Err(format!(
                "fft size must be a power of 2 between 32 and 32768, got {}",
                self.fft_size
            ));
        }
        if !(0.0..=1.0).contains(&self.smoothing_time_constant) {
            return Err(format!(
                "smoothing time constant must be in 0..=1, got {}",
                self.smoothing_time_constant
            ));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(format!(
                "min decibels ({}) must be below max decibels ({})",
                self.min_decibels, self.max_decibels
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = AnalyserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.frequency_bin_count(), 1024);
    }

    #[test]
    fn rejects_bad_values() {
        let bad_size = AnalyserConfig {
            fft_size: 1000,
            ..AnalyserConfig::default()
        };
        assert!(bad_size.validate().is_err());

        let bad_smoothing = AnalyserConfig {
            smoothing_time_constant: 1.5,
            ..AnalyserConfig::default()
        };
        assert!(bad_smoothing.validate().is_err());

        let bad_range = AnalyserConfig {
            min_decibels: -10.0,
            max_decibels: -30.0,
            ..AnalyserConfig::default()
        };
        assert!(bad_range.validate().is_err());
    }
}
