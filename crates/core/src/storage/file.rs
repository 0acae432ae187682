use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::traits::PreferenceStore;
use crate::errors::CoreError;

/// Current preference file format version.
pub const CURRENT_VERSION: u16 = 1;

/// On-disk layout of a preference file.
///
/// ```json
/// { "version": 1, "updated_at": "2025-01-15T10:00:00Z", "entries": { "theme": "dark" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceFile {
    pub version: u16,

    /// When the file was last written; `None` for a store never written to.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl Default for PreferenceFile {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            updated_at: None,
            entries: BTreeMap::new(),
        }
    }
}

impl PreferenceFile {
    /// Parse and version-check a preference document.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CoreError> {
        let file: PreferenceFile = serde_json::from_slice(data).map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse preference file: {e}"))
        })?;
        if file.version != CURRENT_VERSION {
            return Err(CoreError::UnsupportedVersion(file.version));
        }
        Ok(file)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec_pretty(self).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize preference file: {e}"))
        })
    }
}

/// Preferences persisted as a small JSON file (native only).
///
/// The whole file is loaded on open and rewritten on every change, going
/// through a sibling temp file and a rename so a crash never leaves a
/// half-written document behind.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    file: PreferenceFile,
}

impl FilePreferenceStore {
    /// Open the store at `path`. A missing file is an empty store; it is
    /// created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let file = match std::fs::read(&path) {
            Ok(bytes) => PreferenceFile::from_bytes(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "preference file absent, starting empty");
                PreferenceFile::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.file.updated_at
    }

    /// Write `next` to disk and adopt it only once the write succeeded, so a
    /// failed write leaves the in-memory view matching the file.
    fn commit(&mut self, mut next: PreferenceFile) -> Result<(), CoreError> {
        next.updated_at = Some(Utc::now());
        let bytes = next.to_bytes()?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        if let Err(e) = std::fs::write(&tmp, bytes) {
            warn!(path = %tmp.display(), error = %e, "failed to write preference file");
            return Err(e.into());
        }
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to replace preference file");
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(path = %self.path.display(), entries = next.entries.len(), "preference file written");
        self.file = next;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn name(&self) -> &str {
        "file"
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.file.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut next = self.file.clone();
        next.entries.insert(key.to_string(), value.to_string());
        self.commit(next)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), CoreError> {
        if !self.file.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.file.clone();
        next.entries.remove(key);
        self.commit(next)
    }
}
