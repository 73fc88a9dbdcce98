//! Compandor core
//!
//! Feed-forward compressor, expander, limiter and noise gate operating on
//! one sample (or a contiguous run of samples) at a time.
//!
//! ```
//! use compandor_core::{Compressor, CompressorConfig};
//!
//! let mut comp = Compressor::new(CompressorConfig {
//!     threshold_db: -10.0,
//!     ratio: 5.0,
//!     makeup_gain_db: Some(5.0),
//!     knee_width_db: Some(5.0),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let mut buffer = [0.1_f32, 1.0, 1.0];
//! comp.process(&mut buffer);
//! assert_eq!(buffer[0], 0.1);
//! assert!(buffer[2] < 1.0);
//! ```

pub mod domain;

pub use domain::*;
