//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic writes (tmp → save, old save → backup)
//! - Corruption recovery from the backup copy
//!
//! Nothing in the simulation depends on this; a game that never touches a
//! `JsonStore` keeps everything in memory.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Current envelope format version
pub const FORMAT_VERSION: u32 = 1;

/// Environment variable overriding the storage directory
pub const DATA_DIR_ENV: &str = "TOWER_BUILDER_DATA";

/// Fallback storage directory, relative to the working directory
const DEFAULT_DATA_DIR: &str = ".tower_builder";

/// Errors from reading or writing saved data
#[derive(Debug)]
pub enum PersistError {
    Io(io::Error),
    Json(serde_json::Error),
    Version { found: u32, expected: u32 },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "storage I/O error: {e}"),
            PersistError::Json(e) => write!(f, "corrupt save data: {e}"),
            PersistError::Version { found, expected } => {
                write!(f, "unsupported save version {found} (expected {expected})")
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Json(e) => Some(e),
            PersistError::Version { .. } => None,
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(err: io::Error) -> Self {
        PersistError::Io(err)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        PersistError::Json(err)
    }
}

/// On-disk wrapper around a saved value
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    payload: T,
}

/// Directory-backed JSON store, one file per key
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `$TOWER_BUILDER_DATA`, or `./.tower_builder`
    pub fn from_env() -> Self {
        match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) => Self::new(dir),
            None => Self::new(DEFAULT_DATA_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn backup_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json.bak"))
    }

    fn tmp_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json.tmp"))
    }

    /// Write `value` under `key`, keeping the previous save as a backup
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;

        let envelope = Envelope {
            version: FORMAT_VERSION,
            payload: value,
        };
        let json = serde_json::to_string_pretty(&envelope)?;

        let tmp = self.tmp_path(key);
        let path = self.path(key);
        fs::write(&tmp, json)?;
        if path.exists() {
            fs::rename(&path, self.backup_path(key))?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Read the value under `key`; `Ok(None)` when nothing was ever saved
    ///
    /// A missing or corrupt primary file falls back to the backup before
    /// giving up.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PersistError> {
        let path = self.path(key);
        if !path.exists() {
            let backup = self.backup_path(key);
            if !backup.exists() {
                return Ok(None);
            }
            // Save was interrupted between rotating the backup and promoting tmp
            log::warn!("{} missing; restoring from backup", path.display());
            return read_envelope(&backup).map(Some);
        }

        match read_envelope(&path) {
            Ok(value) => Ok(Some(value)),
            Err(primary) => {
                let backup = self.backup_path(key);
                if !backup.exists() {
                    return Err(primary);
                }
                log::warn!("{}: {}; trying backup", path.display(), primary);
                read_envelope(&backup).map(Some)
            }
        }
    }

    /// Load `key`, logging failures and falling back to `T::default()`
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.load(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                log::warn!("Could not load {key}: {e}; using defaults");
                T::default()
            }
        }
    }
}

fn read_envelope<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let text = fs::read_to_string(path)?;
    let envelope: Envelope<T> = serde_json::from_str(&text)?;
    if envelope.version != FORMAT_VERSION {
        return Err(PersistError::Version {
            found: envelope.version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(envelope.payload)
}
