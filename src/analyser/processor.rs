//! the steps that turn a window of PCM samples into byte frames

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// `128 * (1 + s)` clamped to a byte, so silence sits at 128
pub fn time_bytes(samples: &[f32], out: &mut Vec<u8>) {
    out.clear();
    out.extend(
        samples
            .iter()
            .map(|s| (128.0 * (1.0 + *s)).floor().clamp(0.0, 255.0) as u8),
    );
}

/// blackman window, removes the leakage of the hard window edges
pub fn blackman(size: usize) -> Vec<f32> {
    apodize::blackman_iter(size).map(|w| w as f32).collect()
}

/// forward FFT of one windowed block
pub struct Spectrum {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
}

impl Spectrum {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        Spectrum {
            fft: planner.plan_fft_forward(size),
            window: blackman(size),
            buffer: vec![Complex { re: 0.0, im: 0.0 }; size],
        }
    }

    pub fn size(&self) -> usize {
        self.window.len()
    }

    /// normalized magnitudes of the lower (non mirrored) half into `out`
    ///
    /// `samples` must hold exactly `size()` values
    pub fn magnitudes(&mut self, samples: &[f32], out: &mut [f32]) {
        for ((slot, sample), w) in self.buffer.iter_mut().zip(samples).zip(&self.window) {
            *slot = Complex {
                re: *sample * *w,
                im: 0.0,
            };
        }
        self.fft.process(&mut self.buffer[..]);

        let size = self.size() as f32;
        for (m, c) in out.iter_mut().zip(&self.buffer) {
            *m = c.norm() / size;
        }
    }
}

/// blends the new magnitudes into the previous ones
pub fn smooth(previous: &mut [f32], current: &[f32], time_constant: f32) {
    for (p, c) in previous.iter_mut().zip(current) {
        let v = time_constant * *p + (1.0 - time_constant) * *c;
        // keep NaN or infinity from a broken input from sticking around forever
        *p = if v.is_finite() { v } else { 0.0 };
    }
}

/// maps magnitudes linearly in decibel space from `min_db..max_db` onto 0..=255
pub fn decibel_bytes(magnitudes: &[f32], min_db: f32, max_db: f32, out: &mut Vec<u8>) {
    let scale = 255.0 / (max_db - min_db);
    out.clear();
    out.extend(magnitudes.iter().map(|m| {
        if *m <= 0.0 {
            return 0;
        }
        let db = 20.0 * m.log10();
        (scale * (db - min_db)).floor().clamp(0.0, 255.0) as u8
    }));
}
