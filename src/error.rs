//! Error types for the dilemma crate

use thiserror::Error;

/// Main error type for the dilemma crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("field '{field}' must lie in [{low}, {high}], got {value}")]
    OutOfRange {
        field: &'static str,
        low: f64,
        high: f64,
        value: f64,
    },

    #[error("invalid move token '{token}' (expected a cooperate/defect representation)")]
    InvalidMoveToken { token: String },

    #[error("unknown opponent archetype '{name}'. Expected one of: {expected}")]
    UnknownOpponent { name: String, expected: String },

    #[error("match must run for at least one round, got {rounds}")]
    EmptyMatch { rounds: usize },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
