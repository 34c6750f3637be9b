//! Client Identity Provisioning
//!
//! Every installation is identified to the engine by a stable,
//! globally-unique client identifier. The identifier is generated once,
//! persisted in the host's settings store, and never mutated after
//! creation. Persistence failures are non-fatal: the engine still gets
//! a usable identifier for the current process, and the failure is
//! surfaced through logs.

use bridge_traits::SettingsStore;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};
use uuid::Uuid;

/// Settings key under which the client identifier is persisted.
pub const CLIENT_ID_KEY: &str = "clientID";

/// Lazily provisions and caches the per-installation client identifier.
pub struct IdentityStore {
    settings: Arc<dyn SettingsStore>,
    client_id: OnceCell<String>,
}

impl IdentityStore {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            settings,
            client_id: OnceCell::new(),
        }
    }

    /// Return the persisted client identifier, generating and persisting
    /// a new one on first use.
    ///
    /// Concurrent first calls are serialized by the cell: exactly one
    /// identifier is generated and every caller observes the same value
    /// for the lifetime of this store.
    pub async fn get_or_create(&self) -> String {
        self.client_id
            .get_or_init(|| async {
                match self.settings.get_string(CLIENT_ID_KEY).await {
                    Ok(Some(id)) => return id,
                    Ok(None) => {}
                    Err(err) => {
                        // An unreadable store is treated as "not present".
                        warn!(error = %err, "Could not read persisted client ID; generating a new one");
                    }
                }

                let id = Uuid::new_v4().to_string();
                match self.settings.set_string(CLIENT_ID_KEY, &id).await {
                    Ok(()) => info!(client_id = %id, "Generated and saved new client ID"),
                    Err(err) => {
                        warn!(
                            error = %err,
                            client_id = %id,
                            "Could not persist client ID; it will only be stable for this process"
                        );
                    }
                }
                id
            })
            .await
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::BridgeError;
    use mockall::mock;
    use mockall::predicate::eq;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    mock! {
        Settings {}

        #[async_trait::async_trait]
        impl SettingsStore for Settings {
            async fn set_string(&self, key: &str, value: &str) -> Result<(), BridgeError>;
            async fn get_string(&self, key: &str) -> Result<Option<String>, BridgeError>;
            async fn delete(&self, key: &str) -> Result<(), BridgeError>;
            async fn has_key(&self, key: &str) -> Result<bool, BridgeError>;
        }
    }

    /// In-memory store that counts writes, for the concurrency tests.
    struct MemorySettings {
        values: Mutex<HashMap<String, String>>,
        writes: AtomicUsize,
    }

    impl MemorySettings {
        fn new() -> Self {
            Self {
                values: Mutex::new(HashMap::new()),
                writes: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl SettingsStore for MemorySettings {
        async fn set_string(&self, key: &str, value: &str) -> Result<(), BridgeError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn get_string(&self, key: &str) -> Result<Option<String>, BridgeError> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn delete(&self, key: &str) -> Result<(), BridgeError> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }

        async fn has_key(&self, key: &str) -> Result<bool, BridgeError> {
            Ok(self.values.lock().unwrap().contains_key(key))
        }
    }

    #[tokio::test]
    async fn returns_persisted_value_unchanged() {
        let mut settings = MockSettings::new();
        settings
            .expect_get_string()
            .with(eq(CLIENT_ID_KEY))
            .times(1)
            .returning(|_| Ok(Some("existing-id".to_string())));
        settings.expect_set_string().never();

        let store = IdentityStore::new(Arc::new(settings));
        assert_eq!(store.get_or_create().await, "existing-id");
    }

    #[tokio::test]
    async fn generates_and_persists_when_absent() {
        let mut settings = MockSettings::new();
        settings
            .expect_get_string()
            .with(eq(CLIENT_ID_KEY))
            .times(1)
            .returning(|_| Ok(None));
        settings
            .expect_set_string()
            .withf(|key, value| key == CLIENT_ID_KEY && Uuid::parse_str(value).is_ok())
            .times(1)
            .returning(|_, _| Ok(()));

        let store = IdentityStore::new(Arc::new(settings));
        let id = store.get_or_create().await;
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[tokio::test]
    async fn read_failure_falls_through_to_generation() {
        let mut settings = MockSettings::new();
        settings
            .expect_get_string()
            .times(1)
            .returning(|_| Err(BridgeError::DatabaseError("corrupt".to_string())));
        settings
            .expect_set_string()
            .times(1)
            .returning(|_, _| Ok(()));

        let store = IdentityStore::new(Arc::new(settings));
        let id = store.get_or_create().await;
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[tokio::test]
    async fn write_failure_is_non_fatal() {
        let mut settings = MockSettings::new();
        settings.expect_get_string().times(1).returning(|_| Ok(None));
        settings
            .expect_set_string()
            .times(1)
            .returning(|_, _| Err(BridgeError::DatabaseError("disk full".to_string())));

        let store = IdentityStore::new(Arc::new(settings));
        // The identifier is still usable for this process.
        let id = store.get_or_create().await;
        assert!(Uuid::parse_str(&id).is_ok());
        // And stable for repeat callers.
        assert_eq!(store.get_or_create().await, id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_calls_generate_exactly_one_id() {
        let settings = Arc::new(MemorySettings::new());
        let store = Arc::new(IdentityStore::new(settings.clone()));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.get_or_create().await }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }

        assert_eq!(settings.writes.load(Ordering::SeqCst), 1);
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(
            settings.get_string(CLIENT_ID_KEY).await.unwrap().as_deref(),
            Some(ids[0].as_str())
        );
    }
}
