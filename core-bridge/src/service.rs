//! # Bridge Service
//!
//! The caller-facing façade over the engine. One instance owns the
//! identity store, the connection manager, and the two serial execution
//! queues; nothing about it is process-global, so independent instances
//! (and tests) never share state.
//!
//! ## Call Flow
//!
//! 1. The payload is normalized (absent becomes empty).
//! 2. The method name routes the call to the sync queue or the general
//!    queue.
//! 3. The queue worker opens the engine on first use, dispatches the
//!    call on the blocking pool, and fires the result back over a
//!    single-use channel.
//!
//! Every call resolves exactly once. If the worker is gone before or
//! after submission, the caller gets [`CoreError::Terminated`] rather
//! than a hang.

use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;

use crate::config::BridgeConfig;
use crate::connection::ConnectionManager;
use crate::error::{CoreError, Result};
use crate::identity::IdentityStore;
use crate::marshal;
use crate::queue::CallQueue;
use crate::router::{self, QueueKind};

/// Handle to a running bridge.
///
/// Cheap to share: clone the surrounding `Arc` rather than the service.
/// Dropping the service closes both queues; calls already submitted
/// drain, and later calls fail with [`CoreError::Terminated`].
pub struct BridgeService {
    manager: Arc<ConnectionManager>,
    general: CallQueue,
    sync: CallQueue,
}

impl BridgeService {
    /// Construct a service from a validated configuration.
    ///
    /// Spawns the two queue workers, so this must be called from within
    /// a Tokio runtime. No storage or engine work happens here; the
    /// engine opens lazily on the first call.
    pub fn new(config: BridgeConfig) -> Self {
        let identity = IdentityStore::new(Arc::clone(&config.settings_store));
        let manager = Arc::new(ConnectionManager::new(
            Arc::clone(&config.engine),
            identity,
            config.base_dir.clone(),
            config.purge_stale_temp,
        ));

        Self {
            manager,
            general: CallQueue::new("general"),
            sync: CallQueue::new("sync"),
        }
    }

    /// Invoke a named engine method.
    ///
    /// An absent payload is passed to the engine as an empty byte
    /// sequence. Calls with the same queue assignment execute in
    /// submission order; a long-running synchronization never delays
    /// calls on the general queue.
    pub async fn call(&self, method: &str, payload: Option<Bytes>) -> Result<Bytes> {
        let payload = marshal::normalize_payload(payload);
        let kind = router::route(method);
        debug!(method, queue = kind.as_str(), len = payload.len(), "Submitting call");

        let (result_tx, result_rx) = oneshot::channel();
        let manager = Arc::clone(&self.manager);
        let method = method.to_string();

        let queue = match kind {
            QueueKind::General => &self.general,
            QueueKind::Sync => &self.sync,
        };

        let accepted = queue.submit(Self::run(manager, method, payload, result_tx));
        if !accepted {
            return Err(CoreError::Terminated);
        }

        // A worker that dies mid-call drops the sender; the caller sees
        // a terminal error, never a hang.
        result_rx.await.unwrap_or(Err(CoreError::Terminated))
    }

    async fn run(
        manager: Arc<ConnectionManager>,
        method: String,
        payload: Bytes,
        result_tx: oneshot::Sender<Result<Bytes>>,
    ) {
        let result = Self::execute(&manager, method, payload).await;
        // The receiver may have been dropped by a caller that went
        // away; delivery is fire-and-forget.
        let _ = result_tx.send(result);
    }

    async fn execute(manager: &ConnectionManager, method: String, payload: Bytes) -> Result<Bytes> {
        let conn = manager.get_or_open().await?;
        marshal::invoke(conn, method, payload).await
    }
}
