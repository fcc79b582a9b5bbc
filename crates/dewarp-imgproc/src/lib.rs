#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// calibration points and circle fitting.
pub mod calibration;

/// error types for the dewarping engine.
pub mod error;

/// fisheye coordinate map generators and the dewarping pipeline.
pub mod fisheye;

/// utilities for interpolation.
pub mod interpolation;

/// row-parallel execution utilities.
pub mod parallel;

pub use error::DewarpError;
