//! Local durable cache abstraction.
//!
//! A small key-value store on the client device, durable across reloads but
//! not across devices. The engine uses it for three separate purposes, kept
//! apart by key: the content snapshot for instant first paint, the favorites
//! id list, and UI preferences. Cache writes can legitimately fail when the
//! device is out of space; implementations surface that as
//! [`crate::error::PracticumError::CacheQuota`] so the engine can notify
//! instead of crash.

pub mod memory;
#[cfg(not(target_arch = "wasm32"))]
pub mod native;

pub use memory::MemoryCache;
#[cfg(not(target_arch = "wasm32"))]
pub use native::NativeCache;

use crate::error::Result;

/// Cache key space, partitioned by purpose so writers can't clobber each
/// other. The admin-session flag is deliberately absent: it is session-scoped
/// and lives only in memory.
pub mod keys {
    /// Denormalized `{categories, articles, timestamp}` snapshot.
    pub const SNAPSHOT: &str = "gpt-practicum-cache";
    /// JSON array of favorited item ids.
    pub const FAVORITES: &str = "gpt-practicum-favorites";
    /// Color scheme preference (`"light"` / `"dark"`).
    pub const THEME: &str = "theme";
    /// Sidebar collapsed flag (`"true"` when collapsed).
    pub const SIDEBAR_COLLAPSED: &str = "sidebar_collapsed";
    /// Set once the onboarding tour has been seen.
    pub const ONBOARDING_COMPLETED: &str = "onboarding_completed";
}

/// Abstraction over the durable key-value store.
///
/// Implementations: [`NativeCache`] (file per key) on native targets,
/// [`MemoryCache`] for tests and ephemeral sessions.
pub trait CacheStore: Send + Sync {
    /// Read a value; `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, overwriting any existing one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key; absent keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
