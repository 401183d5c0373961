use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Keys the quiz session reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    Answers,
    PassCriteria,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Answers => "answers",
            StoreKey::PassCriteria => "passCriteria",
        }
    }
}

/// String-keyed persistence that outlives a single run.
pub trait KeyValueStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: StoreKey, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError>;
}

#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key.as_str()).cloned())
    }

    fn set(&mut self, key: StoreKey, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.as_str().to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError> {
        self.entries.remove(key.as_str());
        Ok(())
    }
}

/// A JSON object on disk, rewritten whole on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|source| StoreError::Json {
                    path: path.clone(),
                    source,
                })?
            }
        } else {
            log::debug!("no state file at {}, starting fresh", path.display());
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let contents =
            serde_json::to_string_pretty(&self.entries).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, contents).map_err(io_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key.as_str()).cloned())
    }

    fn set(&mut self, key: StoreKey, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.as_str().to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError> {
        if self.entries.remove(key.as_str()).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
