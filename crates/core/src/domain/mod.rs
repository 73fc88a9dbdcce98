//! Domain entities and processing rules

pub mod config;
pub mod dsp;
pub mod error;

pub use config::{
    ChainPreset, CompressorConfig, ExpanderConfig, LimiterConfig, NoiseGateConfig,
    ProcessorSettings, Timing,
};
pub use dsp::*;
pub use error::{DynamicsError, Result};
