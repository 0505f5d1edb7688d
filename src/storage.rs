// SPDX-License-Identifier: GPL-3.0-only

//! Persistent preferences (currently only the last-used language).
//!
//! Storage failures are never fatal to the keyboard: callers treat an error as
//! "no stored preference" and keep going.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error raised by a preference store.
#[derive(Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    Io {
        /// The underlying I/O error
        source: io::Error,
        /// File involved
        path: PathBuf,
    },
    /// The backing file is not a flat JSON object of strings
    Json {
        /// The underlying JSON error
        source: serde_json::Error,
        /// File involved
        path: PathBuf,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io { source, path } => {
                write!(f, "I/O error on preference file '{}': {}", path.display(), source)
            }
            StorageError::Json { source, path } => {
                write!(f, "Malformed preference file '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io { source, .. } => Some(source),
            StorageError::Json { source, .. } => Some(source),
        }
    }
}

/// String key/value preference storage.
pub trait PreferenceStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Preferences kept in memory for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self { values }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in a JSON file.
///
/// The file holds one flat object. A missing file reads as an empty store;
/// every write rewrites the whole object.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by `path`. The file is not touched until used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    source,
                    path: self.path.clone(),
                });
            }
        };

        serde_json::from_str(&contents).map_err(|source| StorageError::Json {
            source,
            path: self.path.clone(),
        })
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&values).map_err(|source| StorageError::Json {
            source,
            path: self.path.clone(),
        })?;

        fs::write(&self.path, json).map_err(|source| StorageError::Io {
            source,
            path: self.path.clone(),
        })?;

        tracing::debug!("Saved preference '{}' to {}", key, self.path.display());
        Ok(())
    }
}
