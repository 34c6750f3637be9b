//! # Desktop Bridge Implementations
//!
//! Default implementations of the host-side bridge traits for desktop
//! platforms (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `SettingsStore` using a SQLite-backed key-value store
//! - Storage-root resolution using platform app-data directories
//!
//! Mobile hosts ship their own adapters (SharedPreferences on Android,
//! UserDefaults on iOS); nothing in this crate is referenced from the
//! bridge core except through the traits.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{default_storage_root, SqliteSettingsStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let root = default_storage_root("my-app");
//!     let settings = SqliteSettingsStore::new(root.join("settings.db"))
//!         .await
//!         .expect("settings store");
//! }
//! ```

mod settings;

pub use settings::SqliteSettingsStore;

use std::path::PathBuf;

/// Resolve the application-private storage root for a desktop app.
///
/// This is the desktop analog of the mobile app-files directory: the
/// bridge core derives its data and temp directories beneath it.
pub fn default_storage_root(app_id: &str) -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local")
                .join("share")
        })
        .join(app_id)
}
