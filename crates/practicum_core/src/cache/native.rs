//! File-backed cache for native targets.
//!
//! One file per key under a cache directory (default:
//! `{data_dir}/practicum`). Keys are plain identifiers from
//! [`super::keys`], so they map directly to file names.

use std::io;
use std::path::{Path, PathBuf};

use super::CacheStore;
use crate::error::{PracticumError, Result};

/// Durable [`CacheStore`] storing each key as a file.
#[derive(Debug, Clone)]
pub struct NativeCache {
    dir: PathBuf,
}

impl NativeCache {
    /// Create a cache rooted at the given directory. The directory is
    /// created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a cache at the platform default location
    /// (`{data_dir}/practicum`).
    pub fn open_default() -> Result<Self> {
        let dir = dirs::data_dir()
            .ok_or(PracticumError::NoConfigDir)?
            .join("practicum");
        Ok(Self::new(dir))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Root directory of this cache.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// ENOSPC / EDQUOT mean the device or quota is full; everything else is a
/// plain I/O failure.
fn is_quota_error(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(28) | Some(122))
}

impl CacheStore for NativeCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PracticumError::CacheRead {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let wrap = |e: io::Error, key: &str| {
            if is_quota_error(&e) {
                PracticumError::CacheQuota {
                    key: key.to_string(),
                }
            } else {
                PracticumError::CacheWrite {
                    key: key.to_string(),
                    source: e,
                }
            }
        };

        std::fs::create_dir_all(&self.dir).map_err(|e| wrap(e, key))?;
        std::fs::write(self.path_for(key), value).map_err(|e| wrap(e, key))
    }

    fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PracticumError::CacheWrite {
                key: key.to_string(),
                source: e,
            }),
        }
    }
}
