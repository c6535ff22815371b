//! Document input sources.
//!
//! This module provides input sources for the document being paged:
//! - File loading for read-once file input
//! - Stdin for piped input, streamed as it arrives
//! - Unified InputSource enum for both

use crate::model::error::InputError;
use std::path::PathBuf;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Unified input source for the document text.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// File source - read-once loading
    File(FileSource),
    /// Stdin source - reads from piped stdin on a background thread
    Stdin(StdinSource),
}

impl InputSource {
    /// Take the text that arrived since the last poll.
    ///
    /// Non-blocking - returns `Ok(None)` when nothing new is available.
    ///
    /// # Behavior:
    /// - File: the whole file on first call, `None` after
    /// - Stdin: whatever complete lines have been read so far
    ///
    /// # Errors
    ///
    /// Returns `InputError` for I/O errors.
    pub fn poll(&mut self) -> Result<Option<String>, InputError> {
        match self {
            InputSource::File(f) => Ok(f.drain()),
            InputSource::Stdin(s) => s.poll(),
        }
    }

    /// Check if the source can still produce more text.
    ///
    /// # Behavior:
    /// - File: false once drained
    /// - Stdin: true until EOF is reached
    pub fn is_live(&self) -> bool {
        match self {
            InputSource::File(f) => !f.is_drained(),
            InputSource::Stdin(s) => !s.is_complete(),
        }
    }
}

/// Detect and create appropriate input source.
///
/// # Logic:
/// 1. If file path is provided: create FileSource (loads on construction)
/// 2. If stdin is piped: use StdinSource
/// 3. Else: return InputError::NoInput
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is not piped.
/// Returns `InputError::FileNotFound` if file does not exist.
/// Returns `InputError::Io` for I/O errors during file reading.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}
