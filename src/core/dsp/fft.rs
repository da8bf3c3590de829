//! FFT processing with windowing

use rustfft::{FftPlanner, num_complex::Complex};
use super::windows::{WindowType, create_window};

/// FFT computation with windowing
pub struct FftProcessor {
    planner: FftPlanner<f32>,
    window: Vec<f32>,
    fft_size: usize,
}

impl FftProcessor {
    pub fn new(fft_size: usize, window_type: WindowType) -> Self {
        let window = create_window(fft_size, window_type);
        Self {
            planner: FftPlanner::new(),
            window,
            fft_size,
        }
    }

    /// Compute magnitude spectrum (first fft_size/2 bins).
    ///
    /// The input is windowed and zero-padded to the configured size, so
    /// frames shorter than `fft_size` are accepted.
    pub fn magnitude_spectrum(&mut self, samples: &[f32]) -> Vec<f32> {
        let fft = self.planner.plan_fft_forward(self.fft_size);

        let mut buffer: Vec<Complex<f32>> = samples
            .iter()
            .take(self.fft_size)
            .enumerate()
            .map(|(i, &s)| Complex::new(s * self.window[i], 0.0))
            .collect();

        // Zero-pad if necessary
        buffer.resize(self.fft_size, Complex::new(0.0, 0.0));

        fft.process(&mut buffer);

        buffer[..self.fft_size / 2]
            .iter()
            .map(|c| (c.re * c.re + c.im * c.im).sqrt())
            .collect()
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }
}

/// Direct DFT magnitudes for the first n/2 bins.
///
/// O(n^2) with f64 accumulation. Kept as the ground truth the FFT path is
/// cross-checked against, valid for any input size.
pub fn reference_dft(samples: &[f32]) -> Vec<f32> {
    let n = samples.len();
    if n == 0 {
        return vec![];
    }

    (0..n / 2)
        .map(|k| {
            let mut re = 0.0f64;
            let mut im = 0.0f64;
            for (i, &s) in samples.iter().enumerate() {
                let angle = -2.0 * std::f64::consts::PI * (k * i) as f64 / n as f64;
                re += s as f64 * angle.cos();
                im += s as f64 * angle.sin();
            }
            (re * re + im * im).sqrt() as f32
        })
        .collect()
}
