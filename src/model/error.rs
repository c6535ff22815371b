//! Error types for vpager.
//!
//! The pager widget itself reports expected empty results (no match, overlay
//! already active) through `bool` and `Option` returns. The errors here cover
//! the fallible edges around it: reading input, compiling patterns, loading
//! configuration and talking to the terminal.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error wrapping every domain failure
//!   - [`InputError`] - File/stdin reading failures
//!   - [`PatternError`] - Invalid search expressions
//!   - [`ConfigError`] - Unreadable or malformed configuration
//!   - [`LoggingError`] - Tracing subscriber setup
//!   - `std::io::Error` - Terminal failures

use std::path::PathBuf;
use thiserror::Error;

pub use crate::config::loader::ConfigError;
pub use crate::logging::LoggingError;
pub use crate::model::pattern::PatternError;

/// Top-level application error encompassing all failure modes.
///
/// Domain errors convert into `AppError` via `From`, so application code
/// composes with `?`.
///
/// # Examples
///
/// ```no_run
/// use vpager::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     let _input = read_document()?;
///     Ok(())
/// }
/// # fn read_document() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the document from a file or stdin. Fatal.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// A search expression given on the command line did not compile.
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] PatternError),

    /// The configuration file exists but could not be used.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading the document to display.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use vpager::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.txt")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.txt"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// No file was given and stdin is an interactive terminal.
    ///
    /// # Examples
    ///
    /// ```
    /// use vpager::model::error::InputError;
    ///
    /// let msg = InputError::NoInput.to_string();
    /// assert!(msg.contains("file path or pipe data to stdin"));
    /// ```
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Any other I/O failure while reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_converts_into_app_error() {
        let err: AppError = InputError::NoInput.into();
        assert!(matches!(err, AppError::Input(InputError::NoInput)));
    }

    #[test]
    fn io_error_converts_into_input_error() {
        let io_err = std::io::Error::other("disk on fire");
        let err: InputError = io_err.into();
        assert!(matches!(err, InputError::Io(_)));
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn pattern_error_converts_into_app_error() {
        let err = crate::model::SearchPattern::new("(unclosed").unwrap_err();
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Pattern(_)));
        assert!(app.to_string().contains("(unclosed"));
    }

    #[test]
    fn terminal_error_keeps_message() {
        let app: AppError = std::io::Error::other("broken pipe").into();
        assert_eq!(app.to_string(), "Terminal error: broken pipe");
    }
}
