//! Persistent storage for the key mapping.
//!
//! One JSON record in one file, read once at startup and overwritten
//! wholesale on every confirmed edit. A missing file means first run and
//! yields the default mapping; an unreadable or malformed file is an
//! error the caller reports and dies on.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::mapping::KeyMapping;

/// Default file name for the mapping record.
pub const KEYMAP_FILE: &str = "keymap.json";

#[derive(Debug)]
pub enum StoreError {
    /// The file exists but could not be read, or could not be written.
    Io(PathBuf, io::Error),
    /// The file was read but does not hold a valid mapping record.
    Malformed(PathBuf, serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "{}: {e}", path.display()),
            Self::Malformed(path, e) => {
                write!(f, "{}: malformed key mapping: {e}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, e) => Some(e),
            Self::Malformed(_, e) => Some(e),
        }
    }
}

/// File-backed store for the mapping record.
pub struct KeymapStore {
    path: PathBuf,
}

impl KeymapStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored mapping, or the built-in default if the file does
    /// not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or does
    /// not parse as a mapping record (either accepted shape).
    pub fn load(&self) -> Result<KeyMapping, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(KeyMapping::default());
            }
            Err(e) => return Err(StoreError::Io(self.path.clone(), e)),
        };

        serde_json::from_str(&text).map_err(|e| StoreError::Malformed(self.path.clone(), e))
    }

    /// Overwrite the stored record with the given mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, mapping: &KeyMapping) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(mapping)
            .map_err(|e| StoreError::Malformed(self.path.clone(), e))?;
        fs::write(&self.path, json).map_err(|e| StoreError::Io(self.path.clone(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_default() {
        let store = KeymapStore::new("/nonexistent/dir/keymap.json");
        let mapping = store.load().expect("load");
        assert_eq!(mapping, KeyMapping::default());
    }

    #[test]
    fn error_display_names_the_file() {
        let err = StoreError::Io(
            PathBuf::from("keymap.json"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("keymap.json"));
    }
}
