//! Error types for the pipeline driver.

use oriel_primitives::FactorName;
use oriel_traits::{FactorError, SourceError};

/// Errors that can occur while running a pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Factor definition or invocation error.
    #[error("factor error: {0}")]
    Factor(#[from] FactorError),

    /// Window source error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Polars error during table assembly.
    #[error("data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Two registered factors share a name.
    #[error("duplicate factor name: {0}")]
    DuplicateFactor(FactorName),

    /// The pipeline has no registered factors.
    #[error("no factors registered")]
    NoFactors,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PipelineError::DuplicateFactor(FactorName::new("momentum"));
        assert_eq!(err.to_string(), "duplicate factor name: momentum");

        let err = PipelineError::NoFactors;
        assert_eq!(err.to_string(), "no factors registered");
    }
}
