//! Processor configurations and chain presets
//!
//! This module provides:
//! - One configuration struct per processor variant
//! - Shared timing validation (sample rate, attack, release)
//! - Serializable processor settings and TOML chain presets

use crate::domain::dsp::{
    Compressor, DynamicsConfig, Expander, Limiter, NoiseGate, Processor, ProcessorChain,
};
use crate::domain::error::{DynamicsError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Sample rate and attack/release times shared by every processor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Attack time in seconds
    pub attack_sec: f32,
    /// Release time in seconds
    pub release_sec: f32,
}

impl Timing {
    /// Reject a non-positive sample rate, attack or release.
    ///
    /// NaN times are rejected as well.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            warn!(sample_rate = self.sample_rate, "Rejected configuration");
            return Err(DynamicsError::InvalidSampleRate(self.sample_rate));
        }
        if !(self.attack_sec > 0.0) {
            warn!(attack_sec = self.attack_sec, "Rejected configuration");
            return Err(DynamicsError::InvalidAttack(self.attack_sec));
        }
        if !(self.release_sec > 0.0) {
            warn!(release_sec = self.release_sec, "Rejected configuration");
            return Err(DynamicsError::InvalidRelease(self.release_sec));
        }
        Ok(())
    }
}

/// Compressor configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompressorConfig {
    pub sample_rate: u32,
    pub threshold_db: f32,
    pub attack_sec: f32,
    pub release_sec: f32,
    /// Slope of the compression law above threshold (1 = no effect)
    pub ratio: f32,
    /// Scales the smoothed gain change; `Some(0.0)` disables the processor.
    /// Resolved from the curve when absent.
    #[serde(default)]
    pub makeup_gain_db: Option<f32>,
    /// Soft knee when present
    #[serde(default)]
    pub knee_width_db: Option<f32>,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            threshold_db: -18.0,
            attack_sec: 0.005,
            release_sec: 0.1,
            ratio: 4.0,
            makeup_gain_db: None,
            knee_width_db: None,
        }
    }
}

/// Expander configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpanderConfig {
    pub sample_rate: u32,
    pub threshold_db: f32,
    pub attack_sec: f32,
    pub release_sec: f32,
    /// Slope of the expansion law below threshold (1 = no effect)
    pub ratio: f32,
    /// Scales the smoothed gain change; `Some(0.0)` disables the processor
    #[serde(default)]
    pub makeup_gain_db: Option<f32>,
    #[serde(default)]
    pub knee_width_db: Option<f32>,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            threshold_db: -40.0,
            attack_sec: 0.001,
            release_sec: 0.1,
            ratio: 2.0,
            makeup_gain_db: Some(1.0),
            knee_width_db: None,
        }
    }
}

/// Limiter configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimiterConfig {
    pub sample_rate: u32,
    pub threshold_db: f32,
    pub attack_sec: f32,
    pub release_sec: f32,
    /// Scales the smoothed gain change. When absent it resolves to the
    /// distance from threshold to 0 dBFS, so with a hard knee a threshold at
    /// or above 0 dBFS leaves the limiter without effect.
    #[serde(default)]
    pub makeup_gain_db: Option<f32>,
    #[serde(default)]
    pub knee_width_db: Option<f32>,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            threshold_db: -1.0,
            attack_sec: 0.001,
            release_sec: 0.05,
            makeup_gain_db: None,
            knee_width_db: None,
        }
    }
}

/// Noise gate configuration
///
/// The threshold is given in dB and converted to a linear magnitude once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseGateConfig {
    pub sample_rate: u32,
    pub threshold_db: f32,
    pub attack_sec: f32,
    pub release_sec: f32,
}

impl Default for NoiseGateConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            threshold_db: -40.0,
            attack_sec: 0.001,
            release_sec: 0.05,
        }
    }
}

impl NoiseGateConfig {
    /// Sample rate and time constants of this configuration
    pub fn timing(&self) -> Timing {
        Timing {
            sample_rate: self.sample_rate,
            attack_sec: self.attack_sec,
            release_sec: self.release_sec,
        }
    }
}

/// Serializable settings for any processor variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum ProcessorSettings {
    Compressor(CompressorConfig),
    Expander(ExpanderConfig),
    Limiter(LimiterConfig),
    NoiseGate(NoiseGateConfig),
}

impl ProcessorSettings {
    /// Get the processor name
    pub fn name(&self) -> &str {
        match self {
            ProcessorSettings::Compressor(_) => "Compressor",
            ProcessorSettings::Expander(_) => "Expander",
            ProcessorSettings::Limiter(_) => "Limiter",
            ProcessorSettings::NoiseGate(_) => "NoiseGate",
        }
    }

    /// Timing of the wrapped configuration
    pub fn timing(&self) -> Timing {
        match self {
            ProcessorSettings::Compressor(config) => config.timing(),
            ProcessorSettings::Expander(config) => config.timing(),
            ProcessorSettings::Limiter(config) => config.timing(),
            ProcessorSettings::NoiseGate(config) => config.timing(),
        }
    }

    /// Create a ready processor from these settings
    pub fn build(&self) -> Result<Box<dyn Processor>> {
        let processor: Box<dyn Processor> = match self {
            ProcessorSettings::Compressor(config) => Box::new(Compressor::new(*config)?),
            ProcessorSettings::Expander(config) => Box::new(Expander::new(*config)?),
            ProcessorSettings::Limiter(config) => Box::new(Limiter::new(*config)?),
            ProcessorSettings::NoiseGate(config) => Box::new(NoiseGate::new(*config)?),
        };
        Ok(processor)
    }
}

/// Ordered list of processor settings, stored as TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainPreset {
    #[serde(default)]
    pub processors: Vec<ProcessorSettings>,
}

impl ChainPreset {
    /// Parse a preset from TOML text
    #[instrument(skip(text))]
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let preset: Self = toml::from_str(text)?;
        debug!(count = preset.processors.len(), "Preset parsed");
        Ok(preset)
    }

    /// Render the preset as TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build a processing chain, validating every entry
    pub fn build(&self) -> Result<ProcessorChain> {
        let mut chain = ProcessorChain::new();
        for settings in &self.processors {
            chain.push(settings.build()?);
        }
        Ok(chain)
    }
}
