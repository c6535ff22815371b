//! File-based document source.

use crate::model::error::InputError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file read completely on construction.
///
/// Invalid UTF-8 is replaced rather than rejected, so binary-ish files can
/// still be paged.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    contents: Option<String>,
}

impl FileSource {
    /// Read the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path)?;
        let contents = String::from_utf8_lossy(&bytes).into_owned();
        debug!(path = %path.display(), bytes = bytes.len(), "file loaded");

        Ok(Self {
            path: path.to_path_buf(),
            contents: Some(contents),
        })
    }

    /// The file's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the file's text. Returns `None` on every later call.
    pub fn drain(&mut self) -> Option<String> {
        self.contents.take()
    }

    /// Whether the text has been taken.
    pub fn is_drained(&self) -> bool {
        self.contents.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn invalid_utf8_is_replaced() {
        let test_file = std::env::temp_dir().join("vpager_file_invalid_utf8.txt");
        fs::write(&test_file, b"ok \xff\n").unwrap();

        let mut source = FileSource::new(&test_file).unwrap();
        let _ = fs::remove_file(&test_file);

        assert_eq!(source.drain().as_deref(), Some("ok \u{fffd}\n"));
    }

    #[test]
    fn drain_empties_the_source() {
        let test_file = std::env::temp_dir().join("vpager_file_drain.txt");
        fs::write(&test_file, "x\n").unwrap();

        let mut source = FileSource::new(&test_file).unwrap();
        let _ = fs::remove_file(&test_file);

        assert!(!source.is_drained());
        assert!(source.drain().is_some());
        assert!(source.is_drained());
        assert_eq!(source.drain(), None);
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let path = std::env::temp_dir().join("vpager_file_missing_987.txt");
        let err = FileSource::new(&path).unwrap_err();
        assert!(err.to_string().contains("vpager_file_missing_987.txt"));
    }
}
