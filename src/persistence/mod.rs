//! Key-value storage for the best score
//!
//! Backends:
//! - `MemoryStore`: process-local, for tests and headless runs
//! - `JsonFileStore`: one JSON object on disk

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::PersistenceError;

/// Integer key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<i64>, PersistenceError>;
    fn set(&mut self, key: &str, value: i64) -> Result<(), PersistenceError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<i64>, PersistenceError> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), PersistenceError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a JSON object file. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, i64>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<i64>, PersistenceError> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), PersistenceError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);
        // Readers never observe a partial file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&values)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
