//! # NDVI Chart
//!
//! Cycles through per-field NDVI series on a fixed timer, aligning each with
//! the shared precipitation series and handing the result to a chart renderer.
//!
//! This is the application crate: it owns the cycle state, drives the tick
//! schedule and wires configuration, datasets and renderers together.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cycler;
pub mod error;
pub mod scheduler;

pub use app::*;
pub use cycler::*;
pub use error::*;
pub use scheduler::*;
