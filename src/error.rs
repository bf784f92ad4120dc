//! Error types for the Solace library.
//!
//! All fallible library operations return [`SolaceError`] through the
//! [`Result`] alias. Two narrower enums describe the failures the response
//! engine recovers from on its own:
//!
//! - [`LoadFailure`] - the persisted model could not be used; the engine retrains.
//! - [`TrainingFailure`] - the corpus cannot produce a model; the engine degrades.
//!
//! # Examples
//!
//! ```
//! use solace::error::{Result, SolaceError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SolaceError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Solace operations.
#[derive(Error, Debug)]
pub enum SolaceError {
    /// I/O errors (file operations, stdin, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// The training corpus could not produce a model.
    #[error("Training error: {0}")]
    Training(#[from] TrainingFailure),

    /// A persisted model could not be loaded.
    #[error("Load error: {0}")]
    Load(#[from] LoadFailure),

    /// Model store errors other than load failures.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Binary serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SolaceError.
pub type Result<T> = std::result::Result<T, SolaceError>;

/// Reasons a persisted model artifact cannot be used.
///
/// Every variant is recoverable: the engine answers a load failure by
/// training a fresh model from its corpus.
#[derive(Error, Debug)]
pub enum LoadFailure {
    /// No artifact exists yet.
    #[error("model artifact not found")]
    Missing,

    /// The artifact exists but could not be read.
    #[error("model artifact unreadable: {0}")]
    Unreadable(#[source] io::Error),

    /// The artifact bytes are not a valid model.
    #[error("model artifact corrupt: {0}")]
    Corrupt(String),

    /// The artifact was written with an incompatible format version.
    #[error("model artifact version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    /// The artifact is valid but was built from a different corpus or settings.
    #[error("model artifact is stale: {0}")]
    Stale(String),
}

/// Reasons a training corpus cannot produce a model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrainingFailure {
    /// The corpus has no training documents.
    #[error("training corpus is empty")]
    EmptyCorpus,

    /// Classification needs at least two intents to choose between.
    #[error("training corpus needs at least 2 distinct intents, found {found}")]
    TooFewIntents { found: usize },

    /// A document or response carries a blank intent id.
    #[error("training corpus contains a blank intent id")]
    BlankIntent,

    /// Every utterance normalized to nothing.
    #[error("training corpus produced an empty vocabulary")]
    EmptyVocabulary,

    /// Feature vectors and labels disagree in count or shape.
    #[error("invalid training data: {0}")]
    InvalidData(String),
}

impl SolaceError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SolaceError::Analysis(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        SolaceError::Storage(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SolaceError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SolaceError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

impl From<bincode::Error> for SolaceError {
    fn from(err: bincode::Error) -> Self {
        SolaceError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SolaceError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");

        let error = SolaceError::config("threshold out of range");
        assert_eq!(
            error.to_string(),
            "Configuration error: threshold out of range"
        );

        let error = SolaceError::invalid_argument("bad");
        assert_eq!(error.to_string(), "Error: Invalid argument: bad");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let solace_error = SolaceError::from(io_error);

        match solace_error {
            SolaceError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_training_failure_conversion() {
        let error = SolaceError::from(TrainingFailure::TooFewIntents { found: 1 });
        assert_eq!(
            error.to_string(),
            "Training error: training corpus needs at least 2 distinct intents, found 1"
        );
    }

    #[test]
    fn test_load_failure_display() {
        let failure = LoadFailure::VersionMismatch {
            expected: 2,
            found: 1,
        };
        assert_eq!(
            failure.to_string(),
            "model artifact version mismatch: expected 2, found 1"
        );
    }
}
