//! Crate-wide error type

use thiserror::Error;

/// Errors surfaced by the training, evaluation and I/O layers
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying I/O failure (checkpoint files, reports)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Checkpoint or report (de)serialization failure
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid or unreadable run configuration
    #[error("config error: {0}")]
    Config(String),

    /// Checkpoint missing, unparsable or incompatible with the model
    #[error("checkpoint error: {0}")]
    Checkpoint(String),

    /// Optical-flow batch carries labels that differ from the RGB labels
    #[error("optical-flow labels do not match RGB labels")]
    FlowLabelMismatch,
}

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("lr must be positive".to_string());
        assert_eq!(err.to_string(), "config error: lr must be positive");

        let err = Error::FlowLabelMismatch;
        assert!(err.to_string().contains("optical-flow"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
