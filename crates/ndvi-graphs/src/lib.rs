//! # NDVI Graphs
//!
//! Series alignment, dataset loading, and chart rendering for NDVI and
//! precipitation data.
//!
//! The aligner is a pure transformation; renderers sit behind the
//! [`ChartRenderer`] trait so the transformation never depends on how a chart
//! is drawn.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aligner;
pub mod dataset;
pub mod frame;
pub mod layout;
pub mod renderer;
pub mod traits;

pub use aligner::*;
pub use dataset::*;
pub use frame::*;
pub use renderer::*;
pub use traits::*;
