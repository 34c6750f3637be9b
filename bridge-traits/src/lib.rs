//! # Host Bridge Traits
//!
//! Contracts between the bridge core and the two parties it mediates:
//! the host platform and the native synchronization engine.
//!
//! ## Overview
//!
//! The bridge core never talks to a concrete platform API or a concrete
//! engine build. Instead it is wired, by dependency injection, against
//! the traits in this crate:
//!
//! - [`SettingsStore`](storage::SettingsStore) - durable, application-scoped
//!   key/value storage supplied by the host (SQLite on desktop,
//!   UserDefaults/SharedPreferences on mobile)
//! - [`Engine`](engine::Engine) / [`EngineConnection`](engine::EngineConnection) -
//!   the native engine's `open`/`dispatch` primitives
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` so implementations can be shared
//! across async tasks behind an `Arc`.
//!
//! ## Error Handling
//!
//! Host adapters report failures through [`BridgeError`](error::BridgeError);
//! the engine seam has its own [`EngineError`](engine::EngineError) since
//! engine failures are opaque messages passed through to callers rather
//! than conditions the bridge can act on.

pub mod engine;
pub mod error;
pub mod storage;

pub use engine::{Engine, EngineConnection, EngineError, OpenRequest};
pub use error::BridgeError;
pub use storage::SettingsStore;
