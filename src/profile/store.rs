//! Key-value persistence for onboarding records
//!
//! The onboarding flow writes one record per user; the engine only reads
//! it back. The file-backed store keeps a single JSON document.

use super::ProfileRecord;
use crate::error::{EligibilityError, Result};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Get/set access to stored onboarding records
pub trait ProfileStore {
    fn get(&self, key: &str) -> Result<Option<ProfileRecord>>;
    fn set(&mut self, key: &str, record: ProfileRecord) -> Result<()>;
}

/// A record plus the time it was last written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    pub record: ProfileRecord,
    pub updated_at: DateTime<Utc>,
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    entries: BTreeMap<String, StoredProfile>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updated_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|entry| entry.updated_at)
    }
}

impl ProfileStore for MemoryProfileStore {
    fn get(&self, key: &str) -> Result<Option<ProfileRecord>> {
        Ok(self.entries.get(key).map(|entry| entry.record.clone()))
    }

    fn set(&mut self, key: &str, record: ProfileRecord) -> Result<()> {
        self.entries.insert(
            key.to_string(),
            StoredProfile {
                record,
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }
}

/// Store backed by one JSON file mapping key -> [`StoredProfile`]
#[derive(Debug, Clone)]
pub struct JsonFileProfileStore {
    path: PathBuf,
}

impl JsonFileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry; a missing file is an empty store
    pub fn entries(&self) -> Result<BTreeMap<String, StoredProfile>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(EligibilityError::io(&self.path, source)),
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn write_entries(&self, entries: &BTreeMap<String, StoredProfile>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json).map_err(|source| EligibilityError::io(&self.path, source))
    }
}

impl ProfileStore for JsonFileProfileStore {
    fn get(&self, key: &str) -> Result<Option<ProfileRecord>> {
        Ok(self.entries()?.remove(key).map(|entry| entry.record))
    }

    fn set(&mut self, key: &str, record: ProfileRecord) -> Result<()> {
        let mut entries = self.entries()?;
        entries.insert(
            key.to_string(),
            StoredProfile {
                record,
                updated_at: Utc::now(),
            },
        );
        self.write_entries(&entries)?;
        debug!("Stored profile {:?} in {}", key, self.path.display());
        Ok(())
    }
}
