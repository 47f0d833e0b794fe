//! # NDVI Common
//!
//! Shared types, errors, and logging setup for the NDVI chart cycler.
//!
//! This crate provides the measurement model (`MeasurementRecord`, `Entity`,
//! `AlignedSeries`) and the error taxonomy used by every other crate in the
//! workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{NdviError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingGuard};
pub use types::*;
pub use utils::*;
