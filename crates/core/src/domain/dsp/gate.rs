//! Noise gate
//!
//! Follows the rectified input with a linear envelope and mutes samples while
//! the gate is closed. There is no gain curve: a sample either passes
//! unchanged or becomes silence.

use super::{db_to_gain, envelope_coeff, Processor};
use crate::domain::config::NoiseGateConfig;
use crate::domain::error::Result;
use tracing::{debug, trace};

/// Noise gate with a linear envelope follower
///
/// The envelope rises toward samples above the threshold with the attack
/// coefficient and decays geometrically with the release coefficient
/// otherwise. The gate is open while the envelope is at or above the
/// threshold, or while the current sample itself is above it.
#[derive(Debug, Clone)]
pub struct NoiseGate {
    config: NoiseGateConfig,
    // Linear threshold derived from `config.threshold_db`
    threshold: f32,
    attack_coeff: f32,
    release_coeff: f32,
    envelope: f32,
}

impl NoiseGate {
    /// Validate a configuration and create a ready gate
    pub fn new(config: NoiseGateConfig) -> Result<Self> {
        config.timing().validate()?;

        let mut gate = Self {
            config,
            threshold: 0.0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            envelope: 0.0,
        };
        gate.update_coefficients();

        debug!(
            sample_rate = config.sample_rate,
            threshold = gate.threshold,
            "Noise gate created"
        );

        Ok(gate)
    }

    /// Replace the configuration. The envelope is kept.
    pub fn set_configuration(&mut self, config: NoiseGateConfig) -> Result<()> {
        config.timing().validate()?;

        self.config = config;
        self.update_coefficients();

        debug!(
            sample_rate = config.sample_rate,
            threshold = self.threshold,
            "Noise gate reconfigured"
        );

        Ok(())
    }

    fn update_coefficients(&mut self) {
        self.threshold = db_to_gain(self.config.threshold_db);
        self.attack_coeff = envelope_coeff(self.config.attack_sec, self.config.sample_rate);
        self.release_coeff = envelope_coeff(self.config.release_sec, self.config.sample_rate);

        trace!(
            attack_coeff = self.attack_coeff,
            release_coeff = self.release_coeff,
            "Gate coefficients derived"
        );
    }

    /// Process a single sample
    #[inline]
    pub fn process_sample(&mut self, sample: f32) -> f32 {
        // NaN rectifies to silence; infinities are capped
        let level = sample.abs().max(0.0).min(f32::MAX);
        let keyed = level > self.threshold;

        if keyed {
            self.envelope = self.attack_coeff * (self.envelope - level) + level;
        } else {
            self.envelope *= self.release_coeff;
        }

        if keyed || self.envelope >= self.threshold {
            sample
        } else {
            0.0
        }
    }

    /// Process a single sample in place
    #[inline]
    pub fn process_sample_in_place(&mut self, sample: &mut f32) {
        *sample = self.process_sample(*sample);
    }

    /// Process a buffer of samples in place
    pub fn process(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            self.process_sample_in_place(sample);
        }
    }

    /// Zero the envelope
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }

    pub fn config(&self) -> &NoiseGateConfig {
        &self.config
    }

    /// Linear threshold the envelope is compared against
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Current envelope magnitude (linear)
    pub fn envelope(&self) -> f32 {
        self.envelope
    }

    /// True while the envelope holds the gate open
    pub fn is_open(&self) -> bool {
        self.envelope >= self.threshold
    }

    pub fn attack_coeff(&self) -> f32 {
        self.attack_coeff
    }

    pub fn release_coeff(&self) -> f32 {
        self.release_coeff
    }
}

impl Processor for NoiseGate {
    fn process_sample(&mut self, sample: f32) -> f32 {
        NoiseGate::process_sample(self, sample)
    }

    fn process(&mut self, buffer: &mut [f32]) {
        NoiseGate::process(self, buffer);
    }

    fn reset(&mut self) {
        NoiseGate::reset(self);
    }

    fn name(&self) -> &str {
        "NoiseGate"
    }
}
