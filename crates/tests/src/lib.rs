//! Shared fixtures for the integration tests
//!
//! Signal generators and the reference configurations used across the
//! end-to-end scenarios.

use compandor_core::{CompressorConfig, LimiterConfig, NoiseGateConfig};

pub const SAMPLE_RATE: u32 = 48000;

/// Compressor used by the reference scenarios: -10 dB threshold, 5:1,
/// 5 dB makeup and a 5 dB soft knee
pub fn reference_compressor() -> CompressorConfig {
    CompressorConfig {
        sample_rate: SAMPLE_RATE,
        threshold_db: -10.0,
        attack_sec: 0.01,
        release_sec: 0.1,
        ratio: 5.0,
        makeup_gain_db: Some(5.0),
        knee_width_db: Some(5.0),
    }
}

/// Limiter with the same shape as [`reference_compressor`]
pub fn reference_limiter() -> LimiterConfig {
    LimiterConfig {
        sample_rate: SAMPLE_RATE,
        threshold_db: -10.0,
        attack_sec: 0.01,
        release_sec: 0.1,
        makeup_gain_db: Some(5.0),
        knee_width_db: Some(5.0),
    }
}

pub fn reference_gate() -> NoiseGateConfig {
    NoiseGateConfig {
        sample_rate: SAMPLE_RATE,
        threshold_db: -10.0,
        attack_sec: 0.01,
        release_sec: 0.1,
    }
}

pub fn generate_sine_wave(frequency: f32, amplitude: f32, duration_ms: f32) -> Vec<f32> {
    let num_samples = (SAMPLE_RATE as f32 * duration_ms / 1000.0) as usize;
    (0..num_samples)
        .map(|i| 2.0 * std::f32::consts::PI * frequency * i as f32 / SAMPLE_RATE as f32)
        .map(|phase| amplitude * phase.sin())
        .collect()
}

pub fn generate_constant(level: f32, num_samples: usize) -> Vec<f32> {
    vec![level; num_samples]
}

/// Peak magnitude in dBFS, `None` for silence
pub fn peak_db(buffer: &[f32]) -> Option<f32> {
    let peak = buffer.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
    (peak > 0.0).then(|| 20.0 * peak.log10())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sine_wave() {
        let wave = generate_sine_wave(440.0, 0.5, 10.0);
        assert_eq!(wave.len(), 480);
        assert!(wave.iter().all(|&s| s.abs() <= 0.5));
    }

    #[test]
    fn test_peak_db() {
        assert_eq!(peak_db(&[0.0; 8]), None);
        let db = peak_db(&[0.1, -1.0, 0.5]).unwrap();
        assert!(db.abs() < 1e-6);
    }
}
