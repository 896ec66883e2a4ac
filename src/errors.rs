/*!
 * Error types for the subdialogs library.
 *
 * Corpus construction treats most anomalies as data-quality filtering:
 * undecodable files are skipped, malformed lines are ignored and single-line
 * groups are dropped. Only filesystem failures on the root directory and bad
 * configuration surface to the caller as errors.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating a dialog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// A dialog needs at least two utterances
    #[error("A dialog needs at least 2 utterances, got {0}")]
    TooShort(usize),
}

/// Errors that can occur while building a corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The subtitle directory does not exist
    #[error("Subtitle directory does not exist: {0:?}")]
    DirectoryNotFound(PathBuf),

    /// The subtitle path exists but is not a directory
    #[error("Subtitle path is not a directory: {0:?}")]
    NotADirectory(PathBuf),

    /// Error while walking the directory tree
    #[error("Failed to walk subtitle directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Error from a file operation
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// None of the configured charsets could decode the file
    #[error("Could not decode {path:?} with any of: {tried}")]
    Undecodable {
        /// File that failed to decode
        path: PathBuf,
        /// Comma separated list of charsets that were tried
        tried: String,
    },

    /// Charset label that is not supported
    #[error("Unknown charset: {0}")]
    UnknownCharset(String),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A file worker panicked or was cancelled
    #[error("File worker failed: {0}")]
    Worker(String),

    /// Dialog validation failure
    #[error("Dialog error: {0}")]
    Dialog(#[from] DialogError),
}

impl From<tokio::task::JoinError> for CorpusError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::Worker(error.to_string())
    }
}
