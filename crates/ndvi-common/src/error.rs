//! Error types and utilities for the NDVI chart cycler

use thiserror::Error;

/// Result type alias for NDVI chart operations
pub type Result<T> = std::result::Result<T, NdviError>;

/// Main error type for NDVI chart operations
#[derive(Error, Debug)]
pub enum NdviError {
    /// The entity collection handed to the cycler was empty
    #[error("Entity collection is empty")]
    EmptyEntityCollection,

    /// Entity and external series cannot be matched by position
    #[error("Series length mismatch: entity has {entity} records, external series has {external}")]
    MismatchedSeriesLength {
        /// Records held by the entity
        entity: usize,
        /// Records held by the external series
        external: usize,
    },

    /// An entity index outside `[0, count)` was presented
    #[error("Entity index {index} out of range for {count} entities")]
    IndexOutOfRange {
        /// Index that was presented
        index: usize,
        /// Number of entities available
        count: usize,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Chart drawing and encoding errors
    #[error("Render error: {message}")]
    Render {
        /// What went wrong
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        /// What is invalid
        message: String,
        /// Dotted path of the offending field
        field: Option<String>,
    },
}

impl NdviError {
    /// Create a new series length mismatch error
    pub fn mismatched_lengths(entity: usize, external: usize) -> Self {
        Self::MismatchedSeriesLength { entity, external }
    }

    /// Create a new index out of range error
    pub fn index_out_of_range(index: usize, count: usize) -> Self {
        Self::IndexOutOfRange { index, count }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error for a specific field
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether the error comes from malformed input data rather than the environment.
    ///
    /// Data errors never go away on retry.
    pub const fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyEntityCollection
                | Self::MismatchedSeriesLength { .. }
                | Self::IndexOutOfRange { .. }
        )
    }

    /// Get the error category for logging and metrics
    pub const fn category(&self) -> &'static str {
        match self {
            Self::EmptyEntityCollection
            | Self::MismatchedSeriesLength { .. }
            | Self::IndexOutOfRange { .. } => "data",
            Self::Config { .. } => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Render { .. } => "render",
            Self::Validation { .. } => "validation",
        }
    }
}
