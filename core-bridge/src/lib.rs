//! Bridge core for embedding the replicant sync engine in a host
//! application.
//!
//! The host hands calls to [`BridgeService::call`] as a method name plus
//! an opaque byte payload and awaits the engine's byte result. The
//! service owns everything between the host and the engine: a durable
//! per-installation client identifier, provisioning of the engine's
//! data and temp directories, a single lazily-opened engine connection,
//! and two serial execution queues so a long-running synchronization
//! never delays ordinary calls.
//!
//! Hosts inject their platform pieces through [`BridgeConfig`]: a
//! [`SettingsStore`](bridge_traits::SettingsStore) for the identifier
//! and an [`Engine`](bridge_traits::Engine) adapter for the native
//! engine library. Desktop apps typically enable the `desktop-shims`
//! feature, which supplies a SQLite-backed settings store from
//! `bridge-desktop`.

pub mod config;
pub mod error;
pub mod identity;
pub mod logging;
pub mod paths;
pub mod router;
pub mod service;

mod connection;
mod marshal;
mod queue;

pub use config::{BridgeConfig, BridgeConfigBuilder};
pub use error::{CoreError, Result};
pub use identity::{IdentityStore, CLIENT_ID_KEY};
pub use paths::{StoragePaths, TempDirGuard};
pub use router::{route, QueueKind, SYNC_METHOD};
pub use service::BridgeService;
