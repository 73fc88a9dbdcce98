//! Static characteristics of the decibel-domain processors
//!
//! Each curve maps an input level in dB to a target output level in dB.
//! Soft knees blend the two linear segments with a parabola over
//! `[threshold - width/2, threshold + width/2]`, so every curve is continuous
//! with a continuous slope at the knee boundaries.

use super::DynamicsConfig;
use crate::domain::config::{CompressorConfig, ExpanderConfig, LimiterConfig, Timing};

/// Transition policy around the threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Knee {
    Hard,
    Soft { width_db: f32 },
}

impl Knee {
    /// Soft knee for a positive width, hard knee otherwise
    pub fn from_width(width_db: Option<f32>) -> Self {
        match width_db {
            Some(width_db) if width_db > 0.0 => Knee::Soft { width_db },
            _ => Knee::Hard,
        }
    }
}

/// Compression law: above threshold the level rises 1 dB per `ratio` dB
#[inline]
pub fn compress_curve(input_db: f32, threshold_db: f32, ratio: f32, knee: Knee) -> f32 {
    let overshoot = input_db - threshold_db;
    match knee {
        Knee::Hard => {
            if overshoot < 0.0 {
                input_db
            } else {
                threshold_db + overshoot / ratio
            }
        }
        Knee::Soft { width_db } => {
            if 2.0 * overshoot < -width_db {
                input_db
            } else if 2.0 * overshoot > width_db {
                threshold_db + overshoot / ratio
            } else {
                let into_knee = overshoot + width_db / 2.0;
                input_db + (1.0 / ratio - 1.0) * into_knee * into_knee / (2.0 * width_db)
            }
        }
    }
}

/// Expansion law: below threshold the level falls `ratio` dB per dB
#[inline]
pub fn expand_curve(input_db: f32, threshold_db: f32, ratio: f32, knee: Knee) -> f32 {
    let overshoot = input_db - threshold_db;
    match knee {
        Knee::Hard => {
            if overshoot > 0.0 {
                input_db
            } else {
                threshold_db + overshoot * ratio
            }
        }
        Knee::Soft { width_db } => {
            if 2.0 * overshoot > width_db {
                input_db
            } else if 2.0 * overshoot < -width_db {
                threshold_db + overshoot * ratio
            } else {
                let into_knee = overshoot - width_db / 2.0;
                input_db - (ratio - 1.0) * into_knee * into_knee / (2.0 * width_db)
            }
        }
    }
}

/// Limiting law: nothing passes above threshold
#[inline]
pub fn limit_curve(input_db: f32, threshold_db: f32, knee: Knee) -> f32 {
    match knee {
        Knee::Hard => input_db.min(threshold_db),
        Knee::Soft { width_db } => {
            let overshoot = input_db - threshold_db;
            if 2.0 * overshoot < -width_db {
                input_db
            } else if 2.0 * overshoot > width_db {
                threshold_db
            } else {
                let into_knee = overshoot + width_db / 2.0;
                input_db - into_knee * into_knee / (2.0 * width_db)
            }
        }
    }
}

impl DynamicsConfig for CompressorConfig {
    const NAME: &'static str = "Compressor";

    fn timing(&self) -> Timing {
        Timing {
            sample_rate: self.sample_rate,
            attack_sec: self.attack_sec,
            release_sec: self.release_sec,
        }
    }

    fn makeup_gain_db(&self) -> Option<f32> {
        self.makeup_gain_db
    }

    fn static_characteristic(&self, input_db: f32) -> f32 {
        compress_curve(
            input_db,
            self.threshold_db,
            self.ratio,
            Knee::from_width(self.knee_width_db),
        )
    }
}

impl DynamicsConfig for ExpanderConfig {
    const NAME: &'static str = "Expander";

    fn timing(&self) -> Timing {
        Timing {
            sample_rate: self.sample_rate,
            attack_sec: self.attack_sec,
            release_sec: self.release_sec,
        }
    }

    fn makeup_gain_db(&self) -> Option<f32> {
        self.makeup_gain_db
    }

    fn static_characteristic(&self, input_db: f32) -> f32 {
        expand_curve(
            input_db,
            self.threshold_db,
            self.ratio,
            Knee::from_width(self.knee_width_db),
        )
    }
}

impl DynamicsConfig for LimiterConfig {
    const NAME: &'static str = "Limiter";

    fn timing(&self) -> Timing {
        Timing {
            sample_rate: self.sample_rate,
            attack_sec: self.attack_sec,
            release_sec: self.release_sec,
        }
    }

    fn makeup_gain_db(&self) -> Option<f32> {
        self.makeup_gain_db
    }

    fn static_characteristic(&self, input_db: f32) -> f32 {
        limit_curve(
            input_db,
            self.threshold_db,
            Knee::from_width(self.knee_width_db),
        )
    }
}
