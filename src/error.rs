//! Error types for metric-sampler
//!
//! Sampling itself never fails. These errors cover the surfaces around it:
//! configuration, table loading, and the per-series validation run by the
//! batch entry point.

use thiserror::Error;

/// Main error type for metric-sampler operations
#[derive(Error, Debug)]
pub enum SamplerError {
    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Column not found in data
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Step or value is NaN or infinite
    #[error("Observation {index} has a non-finite step or value")]
    NonFiniteObservation { index: usize },

    /// Step decreases relative to the previous observation
    #[error("Observation {index} has a step smaller than its predecessor")]
    UnorderedSteps { index: usize },
}

/// Result type alias for metric-sampler operations
pub type Result<T> = std::result::Result<T, SamplerError>;

impl SamplerError {
    /// Get a user-friendly error message suitable for CLI output
    pub fn user_message(&self) -> String {
        match self {
            SamplerError::FileIo(e) => format!("File error: {}", e),
            SamplerError::Polars(e) => format!("Data error: {}", e),
            SamplerError::Json(e) => format!("JSON error: {}", e),
            SamplerError::UnsupportedFormat { extension } => {
                format!("Unsupported file format: '.{}'", extension)
            }
            SamplerError::ColumnNotFound { column } => {
                format!("Column '{}' not found", column)
            }
            SamplerError::InvalidConfig(msg) => format!("Config error: {}", msg),
            SamplerError::NonFiniteObservation { index } => {
                format!("Point {} is NaN or infinite", index)
            }
            SamplerError::UnorderedSteps { index } => {
                format!("Steps go backwards at point {}", index)
            }
        }
    }

    /// Get a short title for the error
    pub fn title(&self) -> &'static str {
        match self {
            SamplerError::FileIo(_) => "File Error",
            SamplerError::Polars(_) => "Data Error",
            SamplerError::Json(_) => "JSON Error",
            SamplerError::UnsupportedFormat { .. } => "Unsupported Format",
            SamplerError::ColumnNotFound { .. } => "Column Not Found",
            SamplerError::InvalidConfig(_) => "Configuration Error",
            SamplerError::NonFiniteObservation { .. } => "Invalid Series",
            SamplerError::UnorderedSteps { .. } => "Invalid Series",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SamplerError::ColumnNotFound {
            column: "loss".to_string(),
        };
        assert_eq!(err.user_message(), "Column 'loss' not found");
        assert_eq!(err.title(), "Column Not Found");

        let err = SamplerError::UnorderedSteps { index: 7 };
        assert_eq!(err.user_message(), "Steps go backwards at point 7");
        assert_eq!(
            err.to_string(),
            "Observation 7 has a step smaller than its predecessor"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SamplerError = io_err.into();
        assert!(matches!(err, SamplerError::FileIo(_)));
    }
}
