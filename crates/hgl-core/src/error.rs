//! Error types for loading and indexing spec sources

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, parsing or correlating a spec source.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The spec file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is not well-formed HGL, or breaks a rule of the spec language.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The rule list and the markup index disagree about a section.
    #[error("position correlation failed: {message}")]
    Correlation { message: String },
}

impl SpecError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        SpecError::Parse {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn correlation(message: impl Into<String>) -> Self {
        SpecError::Correlation {
            message: message.into(),
        }
    }
}

/// Result type for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;
