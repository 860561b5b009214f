//! Error handling for the Kiln application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error as ThisError;

/// Custom error types for Kiln operations.
///
/// This enum represents all possible errors that can occur while generating
/// a project skeleton. It implements the standard Error trait through thiserror's derive macro.
#[derive(ThisError, Debug)]
pub enum Error {
    /// The destination directory exists but could not be listed
    #[error("Failed to read destination directory '{path}': {source}.")]
    PreflightReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A bundled template or source asset is missing
    #[error("Template asset '{name}' is missing, the installation is corrupt.")]
    TemplateAssetError { name: String },

    /// Represents errors that occur during template rendering
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// A file or directory of the skeleton could not be created
    #[error("Failed to create '{path}': {source}.")]
    WriteError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Represents errors that occur while reading the operator's answer
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// Represents errors while serializing the package descriptor
    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    /// Represents errors that occur during console operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The operator declined to generate into a non-empty directory
    #[error("aborting")]
    AbortedByOperator,
}

/// Convenience type alias for Results with Kiln's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that reports the error and returns the exit status.
///
/// The caller is responsible for terminating the process, so that buffered
/// output is drained first.
pub fn default_error_handler(err: Error) -> i32 {
    match err {
        Error::AbortedByOperator => log::debug!("Generation declined by operator"),
        _ => log::debug!("Generation failed: {:?}", err),
    }
    eprintln!("{err}");
    1
}
