//! Error types for the dynamics processors
//!
//! Processing a sample never fails. Errors only come out of construction,
//! reconfiguration, preset parsing and chain slot access.

use thiserror::Error;

/// Errors that can occur while building or configuring a processor
#[derive(Debug, Error)]
pub enum DynamicsError {
    /// Sample rate must be a positive number of Hz
    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    /// Attack time must be strictly positive
    #[error("Invalid attack time: {0} s")]
    InvalidAttack(f32),

    /// Release time must be strictly positive
    #[error("Invalid release time: {0} s")]
    InvalidRelease(f32),

    /// Preset text could not be parsed
    #[error("TOML parsing error: {0}")]
    PresetParse(#[from] toml::de::Error),

    /// Preset could not be rendered as TOML
    #[error("TOML serialization error: {0}")]
    PresetSerialize(#[from] toml::ser::Error),

    /// Chain slot does not exist
    #[error("Processor index {index} out of bounds (chain has {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl DynamicsError {
    /// True for the errors a validating factory can report
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DynamicsError::InvalidSampleRate(_)
                | DynamicsError::InvalidAttack(_)
                | DynamicsError::InvalidRelease(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DynamicsError>;
