//! Durable string key/value storage and the team layout on top of it.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::error::StorageError;
use crate::state::TeamMember;
use crate::team::TeamStore;

pub const CURRENT_TEAM_KEY: &str = "team.current";
pub const SAVED_TEAMS_KEY: &str = "team.saved";

pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
}

/// One file per key below `root`. Writes go through a temp file and a rename
/// so a crash never leaves a half-written value behind.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe = key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_'));
        if safe && !key.is_empty() && !key.starts_with('.') {
            return self.root.join(format!("{key}.json"));
        }
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        self.root.join(format!("{}.json", hex::encode(hasher.finalize())))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.root).map_err(io_err)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Current team and named snapshots under two independent keys.
///
/// Each save rewrites its whole key; there is no cross-key transaction.
pub struct TeamStorage<S> {
    store: S,
}

impl<S: KvStore> TeamStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load_current(&self) -> Result<Vec<TeamMember>, StorageError> {
        self.read(CURRENT_TEAM_KEY)
            .map(|value: Option<Vec<TeamMember>>| value.unwrap_or_default())
    }

    pub fn save_current(&mut self, members: &[TeamMember]) -> Result<(), StorageError> {
        self.write(CURRENT_TEAM_KEY, members)
    }

    pub fn load_snapshots(&self) -> Result<BTreeMap<String, Vec<TeamMember>>, StorageError> {
        self.read(SAVED_TEAMS_KEY)
            .map(|value: Option<BTreeMap<String, Vec<TeamMember>>>| value.unwrap_or_default())
    }

    pub fn save_snapshots(
        &mut self,
        snapshots: &BTreeMap<String, Vec<TeamMember>>,
    ) -> Result<(), StorageError> {
        self.write(SAVED_TEAMS_KEY, snapshots)
    }

    /// Reads both keys at startup. A key that cannot be read or no longer
    /// matches the schema is dropped and logged.
    pub fn restore(&self) -> TeamStore {
        let current = self.load_current().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "discarding unreadable current team");
            Vec::new()
        });
        let saved = self.load_snapshots().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "discarding unreadable saved teams");
            BTreeMap::new()
        });
        TeamStore::new(current, saved)
    }

    fn read<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Serde {
                key: key.to_string(),
                source,
            })
    }

    fn write<T>(&mut self, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: serde::Serialize + ?Sized,
    {
        let json = serde_json::to_string(value).map_err(|source| StorageError::Serde {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &json)
    }
}
