//! Key/Value Settings Storage Abstraction
//!
//! Abstracts the host platform's application-scoped preferences
//! mechanism:
//! - Desktop: SQLite-backed store (`bridge-desktop`)
//! - iOS: UserDefaults
//! - Android: SharedPreferences/DataStore
//!
//! The bridge core uses this store for small durable records such as
//! the per-installation client identifier. Values are strings; anything
//! richer belongs in the engine's own database, not here.

use async_trait::async_trait;

use crate::error::Result;

/// Application-scoped durable key/value store.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Store a string value under `key`, replacing any previous value.
    ///
    /// The write must be durable before this returns.
    async fn set_string(&self, key: &str, value: &str) -> Result<()>;

    /// Retrieve the string value stored under `key`, if any.
    async fn get_string(&self, key: &str) -> Result<Option<String>>;

    /// Remove the value stored under `key`. Removing an absent key is
    /// not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check whether a value exists under `key`.
    async fn has_key(&self, key: &str) -> Result<bool>;
}
