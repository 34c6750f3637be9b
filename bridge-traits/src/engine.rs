//! Native Engine Seam
//!
//! The synchronization engine is an external component reached through
//! exactly two primitives: `open` and `dispatch`. Both model blocking,
//! FFI-style native calls and are deliberately synchronous; callers must
//! keep them off the async executor (the bridge core runs them under
//! `tokio::task::spawn_blocking`).
//!
//! The bridge does not interpret or validate payload contents. Method
//! names and byte payloads are a stable binary contract whose semantics
//! belong entirely to the engine; a zero-length result is a valid
//! success, not an error.

use bytes::Bytes;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Failure raised by the native engine.
///
/// Engine failures carry opaque human-readable messages. The bridge
/// passes them through to the caller unchanged and never retries.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine could not open its database.
    #[error("engine open failed: {0}")]
    Open(String),

    /// A dispatched method failed inside the engine.
    #[error("engine dispatch failed: {0}")]
    Dispatch(String),
}

/// Parameters for opening an engine instance.
#[derive(Debug, Clone)]
pub struct OpenRequest {
    /// Directory holding the persistent engine database.
    pub data_dir: PathBuf,

    /// Durable, installation-scoped client identifier.
    pub client_id: String,

    /// Pre-provisioned writable scratch directory. Must exist before
    /// the engine opens.
    pub temp_dir: PathBuf,
}

/// An open engine instance.
///
/// The connection is safe for concurrent use from multiple threads; the
/// engine provides its own internal concurrency control.
pub trait EngineConnection: Send + Sync {
    /// Invoke a named engine method with a byte-encoded argument.
    ///
    /// Blocks the calling thread until the engine responds.
    fn dispatch(&self, method: &str, payload: &[u8]) -> Result<Bytes, EngineError>;
}

/// Factory for engine connections.
///
/// Implemented by the engine vendor's adapter. The bridge core opens at
/// most one connection per service instance.
pub trait Engine: Send + Sync {
    /// Open the engine database described by `request`.
    ///
    /// Blocks the calling thread until the database is open.
    fn open(&self, request: &OpenRequest) -> Result<Arc<dyn EngineConnection>, EngineError>;
}
