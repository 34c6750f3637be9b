//! # Bridge Configuration
//!
//! Builder-pattern configuration for the bridge service. The service is
//! constructed once at application start from an explicit dependency
//! bundle; there are no process-wide statics. Fail-fast validation
//! ensures every required capability is present before any call can be
//! submitted.
//!
//! ## Required Dependencies
//!
//! - `Engine` - the native engine vendor's adapter (always injected)
//! - `SettingsStore` - durable key/value storage for the client
//!   identifier
//!
//! When the `desktop-shims` feature is enabled,
//! [`build_with_desktop_defaults`](BridgeConfigBuilder::build_with_desktop_defaults)
//! injects the SQLite-backed settings store automatically if none was
//! provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_bridge::BridgeConfig;
//! use std::sync::Arc;
//!
//! let config = BridgeConfig::builder()
//!     .base_dir("/path/to/app-data")
//!     .engine(Arc::new(MyEngine))
//!     .settings_store(Arc::new(MySettingsStore))
//!     .build()?;
//! # Ok::<(), core_bridge::CoreError>(())
//! ```

use bridge_traits::{Engine, SettingsStore};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{CoreError, Result};

/// Configuration for a [`BridgeService`](crate::BridgeService).
#[derive(Clone)]
pub struct BridgeConfig {
    /// Application-private storage root. The bridge derives its data
    /// and temp directories beneath it.
    pub base_dir: PathBuf,

    /// Durable key/value storage for the client identifier (required).
    pub settings_store: Arc<dyn SettingsStore>,

    /// The native engine adapter (required).
    pub engine: Arc<dyn Engine>,

    /// Purge a temp directory left over from a prior run before the
    /// engine opens. Default: true.
    pub purge_stale_temp: bool,
}

impl std::fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("base_dir", &self.base_dir)
            .field("settings_store", &"SettingsStore { ... }")
            .field("engine", &"Engine { ... }")
            .field("purge_stale_temp", &self.purge_stale_temp)
            .finish()
    }
}

impl BridgeConfig {
    /// Creates a new builder for constructing a `BridgeConfig`.
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::default()
    }
}

fn engine_missing_error() -> CoreError {
    CoreError::CapabilityMissing {
        capability: "Engine".to_string(),
        message: "An Engine implementation is required. \
                 Inject the engine vendor's adapter with .engine()."
            .to_string(),
    }
}

fn settings_store_missing_error() -> CoreError {
    CoreError::CapabilityMissing {
        capability: "SettingsStore".to_string(),
        message: "A SettingsStore implementation is required for the client identifier. \
                 Desktop: enable the 'desktop-shims' feature and use build_with_desktop_defaults(), \
                 or inject SqliteSettingsStore. \
                 Mobile: inject platform-native settings (UserDefaults/SharedPreferences)."
            .to_string(),
    }
}

/// Builder for [`BridgeConfig`] instances.
#[derive(Default)]
pub struct BridgeConfigBuilder {
    base_dir: Option<PathBuf>,
    settings_store: Option<Arc<dyn SettingsStore>>,
    engine: Option<Arc<dyn Engine>>,
    purge_stale_temp: Option<bool>,
}

impl BridgeConfigBuilder {
    /// Sets the application-private storage root (required).
    pub fn base_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.base_dir = Some(path.into());
        self
    }

    /// Sets the settings store implementation.
    pub fn settings_store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.settings_store = Some(store);
        self
    }

    /// Sets the engine implementation (required).
    pub fn engine(mut self, engine: Arc<dyn Engine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Controls whether a stale temp directory is purged before the
    /// engine opens. Defaults to true; disable only if the engine is
    /// known to tolerate reusing its own scratch files.
    pub fn purge_stale_temp(mut self, purge: bool) -> Self {
        self.purge_stale_temp = Some(purge);
        self
    }

    /// Builds the final `BridgeConfig`, validating that every required
    /// dependency was provided.
    pub fn build(self) -> Result<BridgeConfig> {
        let base_dir = self.base_dir.ok_or_else(|| {
            CoreError::Config("Base directory is required. Use .base_dir() to set it.".to_string())
        })?;

        if base_dir.as_os_str().is_empty() {
            return Err(CoreError::Config(
                "Base directory cannot be empty".to_string(),
            ));
        }

        let engine = self.engine.ok_or_else(engine_missing_error)?;
        let settings_store = self.settings_store.ok_or_else(settings_store_missing_error)?;

        Ok(BridgeConfig {
            base_dir,
            settings_store,
            engine,
            purge_stale_temp: self.purge_stale_temp.unwrap_or(true),
        })
    }

    /// Like [`build`](Self::build), but injects the SQLite-backed
    /// settings store when none was provided. The store lives at
    /// `<base_dir>/replicant/settings.db`.
    #[cfg(feature = "desktop-shims")]
    pub async fn build_with_desktop_defaults(mut self) -> Result<BridgeConfig> {
        use bridge_desktop::SqliteSettingsStore;

        if self.settings_store.is_none() {
            let base_dir = self.base_dir.as_deref().ok_or_else(|| {
                CoreError::Config(
                    "Base directory is required. Use .base_dir() to set it.".to_string(),
                )
            })?;

            let db_path = crate::paths::bridge_root(base_dir).join("settings.db");
            let store = SqliteSettingsStore::new(db_path).await.map_err(|err| {
                CoreError::Internal(format!("Failed to initialize default SettingsStore: {}", err))
            })?;
            self.settings_store = Some(Arc::new(store));
        }

        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::{error::BridgeError, EngineConnection, EngineError, OpenRequest};

    struct MockEngine;

    impl Engine for MockEngine {
        fn open(&self, _request: &OpenRequest) -> std::result::Result<Arc<dyn EngineConnection>, EngineError> {
            Err(EngineError::Open("mock".to_string()))
        }
    }

    struct MockSettingsStore;

    #[async_trait::async_trait]
    impl SettingsStore for MockSettingsStore {
        async fn set_string(&self, _key: &str, _value: &str) -> std::result::Result<(), BridgeError> {
            Ok(())
        }
        async fn get_string(&self, _key: &str) -> std::result::Result<Option<String>, BridgeError> {
            Ok(None)
        }
        async fn delete(&self, _key: &str) -> std::result::Result<(), BridgeError> {
            Ok(())
        }
        async fn has_key(&self, _key: &str) -> std::result::Result<bool, BridgeError> {
            Ok(false)
        }
    }

    #[test]
    fn builder_requires_base_dir() {
        let result = BridgeConfig::builder()
            .engine(Arc::new(MockEngine))
            .settings_store(Arc::new(MockSettingsStore))
            .build();

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Base directory is required"));
    }

    #[test]
    fn builder_rejects_empty_base_dir() {
        let result = BridgeConfig::builder()
            .base_dir("")
            .engine(Arc::new(MockEngine))
            .settings_store(Arc::new(MockSettingsStore))
            .build();

        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn builder_requires_engine() {
        let result = BridgeConfig::builder()
            .base_dir("/data")
            .settings_store(Arc::new(MockSettingsStore))
            .build();

        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("Engine"));
        assert!(msg.contains("vendor"));
    }

    #[test]
    fn builder_requires_settings_store() {
        let result = BridgeConfig::builder()
            .base_dir("/data")
            .engine(Arc::new(MockEngine))
            .build();

        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("SettingsStore"));
        assert!(msg.contains("client identifier"));
    }

    #[test]
    fn builder_with_all_required_fields() {
        let config = BridgeConfig::builder()
            .base_dir("/data")
            .engine(Arc::new(MockEngine))
            .settings_store(Arc::new(MockSettingsStore))
            .build()
            .unwrap();

        assert_eq!(config.base_dir, PathBuf::from("/data"));
        assert!(config.purge_stale_temp);
    }

    #[test]
    fn purge_can_be_disabled() {
        let config = BridgeConfig::builder()
            .base_dir("/data")
            .engine(Arc::new(MockEngine))
            .settings_store(Arc::new(MockSettingsStore))
            .purge_stale_temp(false)
            .build()
            .unwrap();

        assert!(!config.purge_stale_temp);
    }

    #[cfg(feature = "desktop-shims")]
    #[tokio::test]
    async fn desktop_defaults_inject_settings_store() {
        let base = tempfile::tempdir().unwrap();

        let config = BridgeConfig::builder()
            .base_dir(base.path())
            .engine(Arc::new(MockEngine))
            .build_with_desktop_defaults()
            .await
            .unwrap();

        config
            .settings_store
            .set_string("probe", "ok")
            .await
            .unwrap();
        assert_eq!(
            config.settings_store.get_string("probe").await.unwrap(),
            Some("ok".to_string())
        );
    }
}
