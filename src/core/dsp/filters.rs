//! Signal conditioning filters

/// Apply pre-emphasis filter (boosts high frequencies)
pub fn pre_emphasis(samples: &[f32], coefficient: f32) -> Vec<f32> {
    if samples.is_empty() {
        return vec![];
    }

    let mut output = Vec::with_capacity(samples.len());
    output.push(samples[0]);

    for i in 1..samples.len() {
        output.push(samples[i] - coefficient * samples[i - 1]);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pre_emphasis_length_and_first_sample() {
        let samples = vec![0.5, 0.6, 0.7];
        let out = pre_emphasis(&samples, 0.97);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], 0.5);
        assert!((out[1] - (0.6 - 0.97 * 0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_pre_emphasis_attenuates_dc() {
        let dc = vec![1.0f32; 64];
        let out = pre_emphasis(&dc, 0.97);
        // Steady-state output for DC input is 1 - coefficient
        assert!(out[1..].iter().all(|&s| (s - 0.03).abs() < 1e-6));
    }
}
