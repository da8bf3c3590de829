//! Statistical and spectral analysis functions

/// Compute RMS (Root Mean Square)
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Compute mean absolute amplitude
pub fn mean_abs(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    samples.iter().map(|s| s.abs()).sum::<f32>() / samples.len() as f32
}

/// Compute peak amplitude
pub fn peak_amplitude(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max)
}

/// Population standard deviation
pub fn std_dev(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }

    let mean = values.iter().sum::<f32>() / values.len() as f32;
    let variance = values
        .iter()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f32>()
        / values.len() as f32;
    variance.sqrt()
}

/// Coefficient of variation (stddev / mean), 0.0 when the mean is ~0
pub fn variation(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }

    let mean = values.iter().sum::<f32>() / values.len() as f32;
    if mean < 1e-10 {
        return 0.0;
    }
    std_dev(values) / mean
}

/// Strict local maxima above `rel_threshold` times the series maximum.
///
/// Boundary entries are never peaks. Returns an empty vec when the series is
/// too short or effectively silent.
pub fn find_relative_peaks(values: &[f32], rel_threshold: f32) -> Vec<usize> {
    if values.len() < 3 {
        return vec![];
    }

    let max = values.iter().fold(0.0f32, |a, &b| a.max(b));
    if max < 1e-10 {
        return vec![];
    }

    let floor = rel_threshold * max;
    (1..values.len() - 1)
        .filter(|&i| values[i] > values[i - 1] && values[i] > values[i + 1] && values[i] > floor)
        .collect()
}

/// Compute autocorrelation
pub fn autocorrelation(samples: &[f32], max_lag: usize) -> Vec<f32> {
    let n = samples.len();
    if n == 0 {
        return vec![];
    }
    let max_lag = max_lag.min(n - 1);

    // Normalize by energy
    let energy: f32 = samples.iter().map(|s| s * s).sum();
    if energy < 1e-10 {
        return vec![0.0; max_lag + 1];
    }

    (0..=max_lag)
        .map(|lag| {
            let sum: f32 = samples[..n - lag]
                .iter()
                .zip(&samples[lag..])
                .map(|(a, b)| a * b)
                .sum();
            sum / energy
        })
        .collect()
}

/// Compute spectral centroid (brightness measure)
pub fn spectral_centroid(magnitudes: &[f32], sample_rate: u32) -> f32 {
    let total_energy: f32 = magnitudes.iter().sum();
    if total_energy < 1e-10 {
        return 0.0;
    }

    let weighted_sum: f32 = magnitudes
        .iter()
        .enumerate()
        .map(|(i, &m)| {
            let freq = i as f32 * sample_rate as f32 / (2.0 * magnitudes.len() as f32);
            freq * m
        })
        .sum();

    weighted_sum / total_energy
}
