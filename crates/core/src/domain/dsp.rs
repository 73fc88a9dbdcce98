//! Feed-forward dynamics processing
//!
//! This module provides a small family of dynamic-range processors:
//! - Compressor, Expander and Limiter, sharing one decibel-domain engine
//! - Noise Gate driven by a linear envelope follower
//! - A serial chain over any of them
//!
//! Per-sample pipeline of the decibel-domain processors:
//! level (dB) -> static characteristic -> gain smoother -> gain -> multiply.
//!
//! All processors are designed for:
//! - Zero allocations in the hot path
//! - Bounded, input-independent work per sample
//! - Coefficients derived on (re)configuration only

mod chain;
mod curve;
mod gate;

pub use chain::ProcessorChain;
pub use curve::{compress_curve, expand_curve, limit_curve, Knee};
pub use gate::NoiseGate;

use crate::domain::config::{CompressorConfig, ExpanderConfig, LimiterConfig, Timing};
use crate::domain::error::Result;
use std::fmt;
use tracing::{debug, trace};

/// Core trait for all dynamics processors
///
/// Processors work in place on f32 samples normalized to [-1.0, 1.0].
pub trait Processor: Send {
    /// Process one sample and return the result
    fn process_sample(&mut self, sample: f32) -> f32;

    /// Process a buffer of samples in place, strictly left to right
    fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Clear the smoothing state. Configuration is kept.
    fn reset(&mut self);

    /// Get processor name for debugging/display
    fn name(&self) -> &str;
}

/// Numeric constants shared by the processors
pub mod params {
    /// Smallest magnitude fed to the level detector (-120 dBFS)
    pub const MIN_LEVEL: f32 = 1e-6;
    pub const MIN_LEVEL_DB: f32 = -120.0;

    /// Bound on the instantaneous gain change, in dB
    pub const MAX_GAIN_CHANGE_DB: f32 = 240.0;

    /// A step change is covered to within 1/SETTLE_RATIO of its size after
    /// one attack/release time
    pub const SETTLE_RATIO: f64 = 9.0;
}

/// Convert a sample to its level in dBFS.
///
/// The magnitude is floored at [`params::MIN_LEVEL`] so silence maps to
/// -120 dB instead of -inf. NaN maps to the floor as well.
#[inline]
pub fn level_to_db(sample: f32) -> f32 {
    let level = sample.abs().max(params::MIN_LEVEL).min(f32::MAX);
    20.0 * level.log10()
}

/// Convert decibels to a linear amplitude factor
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// One-pole coefficient for the decibel-domain smoother.
///
/// After `time_sec` the distance left to a step target is one ninth of the
/// step.
pub fn smoothing_coeff(time_sec: f32, sample_rate: u32) -> f32 {
    let samples = f64::from(time_sec) * f64::from(sample_rate);
    (-params::SETTLE_RATIO.ln() / samples).exp() as f32
}

/// One-pole coefficient for the noise gate's linear envelope follower.
///
/// `time_sec` is the time constant (63% of a step change).
pub fn envelope_coeff(time_sec: f32, sample_rate: u32) -> f32 {
    let samples = f64::from(time_sec) * f64::from(sample_rate);
    (-1.0 / samples).exp() as f32
}

/// Asymmetric one-pole smoother over the gain change in dB
///
/// Every curve only ever reduces the level, so a falling gain change means
/// more effect and is tracked with the attack coefficient. A rising one is
/// recovery and uses the release coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainSmoother {
    attack_coeff: f32,
    release_coeff: f32,
    state: f32,
}

impl GainSmoother {
    /// Create a smoother at rest (0 dB change)
    pub fn new(timing: &Timing) -> Self {
        let mut smoother = Self {
            attack_coeff: 0.0,
            release_coeff: 0.0,
            state: 0.0,
        };
        smoother.set_timing(timing);
        smoother
    }

    /// Re-derive coefficients. The smoothed value is kept.
    pub fn set_timing(&mut self, timing: &Timing) {
        self.attack_coeff = smoothing_coeff(timing.attack_sec, timing.sample_rate);
        self.release_coeff = smoothing_coeff(timing.release_sec, timing.sample_rate);

        trace!(
            attack_coeff = self.attack_coeff,
            release_coeff = self.release_coeff,
            "Smoother coefficients derived"
        );
    }

    /// Move the smoothed value toward `target` and return it
    #[inline]
    pub fn update(&mut self, target: f32) -> f32 {
        let alpha = if target <= self.state {
            self.attack_coeff
        } else {
            self.release_coeff
        };

        self.state = alpha * self.state + (1.0 - alpha) * target;
        self.state
    }

    pub fn value(&self) -> f32 {
        self.state
    }

    pub fn attack_coeff(&self) -> f32 {
        self.attack_coeff
    }

    pub fn release_coeff(&self) -> f32 {
        self.release_coeff
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

/// Configuration of a decibel-domain processor
///
/// Implemented by the compressor, expander and limiter configurations; the
/// implementation picks the static characteristic.
pub trait DynamicsConfig: Copy + fmt::Debug + Send + 'static {
    /// Display name of the processor
    const NAME: &'static str;

    /// Sample rate and time constants
    fn timing(&self) -> Timing;

    /// Explicitly configured makeup gain
    fn makeup_gain_db(&self) -> Option<f32>;

    /// Target output level in dB for an input level in dB
    fn static_characteristic(&self, input_db: f32) -> f32;
}

/// Makeup gain to use for a configuration.
///
/// Without an explicit value this is `-f(0)`, the level reduction the curve
/// applies to a full-scale input, taken as a positive number.
pub fn resolve_makeup_gain<C: DynamicsConfig>(config: &C) -> f32 {
    config
        .makeup_gain_db()
        .unwrap_or_else(|| -config.static_characteristic(0.0))
}

/// Generic decibel-domain dynamics processor
///
/// Owns one configuration, the derived smoothing coefficients and the
/// smoothed gain change. The makeup gain scales the smoothed gain change:
/// `gain_db = smoothed * makeup`, so a processor at rest passes samples
/// through unchanged.
///
/// A makeup gain of 0 dB therefore applies no gain at all: the smoother
/// still tracks the curve but every sample passes unchanged. This also
/// happens with a resolved makeup gain when `f(0) == 0`, for example a hard-knee
/// limiter with its threshold at or above 0 dBFS.
#[derive(Debug, Clone)]
pub struct Dynamics<C: DynamicsConfig> {
    config: C,
    makeup_gain_db: f32,
    smoother: GainSmoother,
}

/// Downward compressor
pub type Compressor = Dynamics<CompressorConfig>;

/// Downward expander
pub type Expander = Dynamics<ExpanderConfig>;

/// Peak limiter (infinite-ratio compressor)
pub type Limiter = Dynamics<LimiterConfig>;

impl<C: DynamicsConfig> Dynamics<C> {
    /// Validate a configuration and create a ready processor
    pub fn new(config: C) -> Result<Self> {
        let timing = config.timing();
        timing.validate()?;

        let processor = Self {
            config,
            makeup_gain_db: resolve_makeup_gain(&config),
            smoother: GainSmoother::new(&timing),
        };

        debug!(
            kind = C::NAME,
            sample_rate = timing.sample_rate,
            attack_coeff = processor.smoother.attack_coeff(),
            release_coeff = processor.smoother.release_coeff(),
            makeup_gain_db = processor.makeup_gain_db,
            "Processor created"
        );

        Ok(processor)
    }

    /// Replace the configuration.
    ///
    /// Coefficients and makeup gain are re-derived; the smoothed gain is
    /// kept so a parameter change does not click. An invalid configuration
    /// leaves the processor untouched.
    pub fn set_configuration(&mut self, config: C) -> Result<()> {
        let timing = config.timing();
        timing.validate()?;

        self.config = config;
        self.makeup_gain_db = resolve_makeup_gain(&config);
        self.smoother.set_timing(&timing);

        debug!(
            kind = C::NAME,
            sample_rate = timing.sample_rate,
            makeup_gain_db = self.makeup_gain_db,
            "Processor reconfigured"
        );

        Ok(())
    }

    /// Process a single sample
    #[inline]
    pub fn process_sample(&mut self, sample: f32) -> f32 {
        let input_db = level_to_db(sample);
        let target_db = self.config.static_characteristic(input_db);

        let change = target_db - input_db;
        let change = if change.is_nan() {
            0.0
        } else {
            change.clamp(-params::MAX_GAIN_CHANGE_DB, params::MAX_GAIN_CHANGE_DB)
        };

        let smoothed = self.smoother.update(change);
        sample * db_to_gain(smoothed * self.makeup_gain_db)
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

    /// Zero the smoothed gain change
    pub fn reset(&mut self) {
        self.smoother.reset();
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Makeup gain in use, explicit or resolved
    pub fn makeup_gain_db(&self) -> f32 {
        self.makeup_gain_db
    }

    /// Current smoothed gain change in dB (before makeup scaling)
    pub fn gain_db(&self) -> f32 {
        self.smoother.value()
    }

    pub fn attack_coeff(&self) -> f32 {
        self.smoother.attack_coeff()
    }

    pub fn release_coeff(&self) -> f32 {
        self.smoother.release_coeff()
    }
}

impl<C: DynamicsConfig> Processor for Dynamics<C> {
    fn process_sample(&mut self, sample: f32) -> f32 {
        Dynamics::process_sample(self, sample)
    }

    fn process(&mut self, buffer: &mut [f32]) {
        Dynamics::process(self, buffer);
    }

    fn reset(&mut self) {
        Dynamics::reset(self);
    }

    fn name(&self) -> &str {
        C::NAME
    }
}

// ============================================================================
// TESTS
// ============================================================================
