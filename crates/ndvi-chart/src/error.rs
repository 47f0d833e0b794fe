//! Application-wide error types using thiserror.

use ndvi_common::NdviError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Error from configuration, datasets, alignment or rendering.
    #[error(transparent)]
    Ndvi(#[from] NdviError),

    /// A scheduled tick failed under the stop policy.
    #[error("Tick {tick} failed: {source}")]
    TickFailed {
        /// One-based number of the failed tick.
        tick: u64,
        /// What went wrong.
        #[source]
        source: NdviError,
    },
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
