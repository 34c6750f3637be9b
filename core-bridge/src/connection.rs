//! Connection Management
//!
//! Owns the single lazily-created handle to the native engine. The
//! check-and-create sequence runs under a once-cell so concurrent first
//! calls cannot open the engine twice, and a failed open leaves the
//! cell empty so the next call retries instead of observing a poisoned
//! half-open state.
//!
//! There is no close or reopen operation: the connection's lifetime is
//! the lifetime of the owning service.

use bridge_traits::{Engine, EngineConnection, OpenRequest};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tokio::task;
use tracing::info;

use crate::error::{CoreError, Result};
use crate::identity::IdentityStore;
use crate::paths::{StoragePaths, TempDirGuard};

struct OpenConnection {
    conn: Arc<dyn EngineConnection>,
    // Keeps best-effort temp cleanup tied to the connection lifetime.
    _temp_guard: TempDirGuard,
}

pub(crate) struct ConnectionManager {
    engine: Arc<dyn Engine>,
    identity: IdentityStore,
    base_dir: PathBuf,
    purge_stale_temp: bool,
    conn: OnceCell<OpenConnection>,
}

impl ConnectionManager {
    pub(crate) fn new(
        engine: Arc<dyn Engine>,
        identity: IdentityStore,
        base_dir: PathBuf,
        purge_stale_temp: bool,
    ) -> Self {
        Self {
            engine,
            identity,
            base_dir,
            purge_stale_temp,
            conn: OnceCell::new(),
        }
    }

    /// Return the open engine connection, opening it on first use.
    ///
    /// Identity and path provisioning happen here rather than at
    /// service construction so that construction stays cheap and a
    /// transient failure never wedges the service.
    pub(crate) async fn get_or_open(&self) -> Result<Arc<dyn EngineConnection>> {
        let open = self
            .conn
            .get_or_try_init(|| async {
                let client_id = self.identity.get_or_create().await;
                let (paths, temp_guard) =
                    StoragePaths::provision(&self.base_dir, self.purge_stale_temp).await?;

                let request = OpenRequest {
                    data_dir: paths.data_dir.clone(),
                    client_id,
                    temp_dir: paths.temp_dir.clone(),
                };

                info!(data_dir = ?paths.data_dir, temp_dir = ?paths.temp_dir, "Opening engine database");

                let engine = Arc::clone(&self.engine);
                let conn = task::spawn_blocking(move || engine.open(&request))
                    .await
                    .map_err(|err| {
                        CoreError::Connection(format!("engine open panicked: {}", err))
                    })?
                    .map_err(|err| CoreError::Connection(err.to_string()))?;

                Ok::<_, CoreError>(OpenConnection {
                    conn,
                    _temp_guard: temp_guard,
                })
            })
            .await?;

        Ok(Arc::clone(&open.conn))
    }
}
