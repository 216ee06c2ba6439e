//! In-memory cache implementation for testing.

use std::collections::HashMap;
use std::sync::RwLock;

use super::CacheStore;
use crate::error::{PracticumError, Result};

/// In-memory [`CacheStore`].
///
/// Optionally enforces a byte quota across all values so tests can exercise
/// the quota-exceeded path without filling a disk.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryCache {
    /// Create an unbounded in-memory cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache that rejects writes once total stored bytes would
    /// exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap();

        if let Some(quota) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > quota {
                return Err(PracticumError::CacheQuota {
                    key: key.to_string(),
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_remove() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("k").unwrap(), None);

        cache.set("k", "v").unwrap();
        assert_eq!(cache.get("k").unwrap(), Some("v".to_string()));

        cache.remove("k").unwrap();
        assert_eq!(cache.get("k").unwrap(), None);
    }

    #[test]
    fn test_quota_exceeded() {
        let cache = MemoryCache::with_quota(8);
        cache.set("k", "v").unwrap();

        let err = cache.set("big", "0123456789").unwrap_err();
        assert!(err.is_quota());

        // The failed write must not disturb existing entries.
        assert_eq!(cache.get("k").unwrap(), Some("v".to_string()));
    }
}
