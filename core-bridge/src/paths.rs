//! Storage Path Provisioning
//!
//! Derives the engine's data and temp directories under an
//! application-private base directory and makes sure both exist before
//! the engine opens. Mobile hosts cannot create directories in the
//! global tmp location, so the bridge owns a private scratch directory
//! next to the data directory.
//!
//! A temp directory left over from a prior abnormal exit is purged and
//! recreated: stale scratch files must never be interpreted as valid
//! engine state.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{CoreError, Result};

const BRIDGE_DIR: &str = "replicant";
const DATA_DIR: &str = "data";
const TEMP_DIR: &str = "temp";

/// Root of everything the bridge owns under the application-private
/// base directory.
pub(crate) fn bridge_root(base_dir: &Path) -> PathBuf {
    base_dir.join(BRIDGE_DIR)
}

/// The directory pair the engine is opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    /// Holds the persistent engine database.
    pub data_dir: PathBuf,
    /// Writable scratch directory, guaranteed to exist.
    pub temp_dir: PathBuf,
}

/// Best-effort removal of the temp directory when the owning service
/// shuts down. Cleanup is not a correctness requirement; a missed
/// cleanup is handled by the purge on next startup.
#[derive(Debug)]
pub struct TempDirGuard {
    temp_dir: PathBuf,
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_dir_all(&self.temp_dir) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = ?self.temp_dir, error = %err, "Could not remove temp directory");
            }
        }
    }
}

impl StoragePaths {
    /// Provision the data and temp directories under `base_dir`.
    ///
    /// Idempotent. When `purge_stale_temp` is set (the default policy),
    /// a pre-existing temp directory is removed before being recreated.
    pub async fn provision(
        base_dir: &Path,
        purge_stale_temp: bool,
    ) -> Result<(StoragePaths, TempDirGuard)> {
        let root = bridge_root(base_dir);
        let data_dir = root.join(DATA_DIR);
        let temp_dir = root.join(TEMP_DIR);

        fs::create_dir_all(&data_dir).await.map_err(|err| {
            CoreError::StorageUnavailable(format!(
                "could not create data directory {}: {}",
                data_dir.display(),
                err
            ))
        })?;

        if purge_stale_temp {
            match fs::remove_dir_all(&temp_dir).await {
                Ok(()) => debug!(path = ?temp_dir, "Purged stale temp directory"),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => {
                    return Err(CoreError::StorageUnavailable(format!(
                        "could not clear stale temp directory {}: {}",
                        temp_dir.display(),
                        err
                    )));
                }
            }
        }

        fs::create_dir_all(&temp_dir).await.map_err(|err| {
            CoreError::StorageUnavailable(format!(
                "could not create temp directory {}: {}",
                temp_dir.display(),
                err
            ))
        })?;

        debug!(data_dir = ?data_dir, temp_dir = ?temp_dir, "Provisioned storage directories");

        let guard = TempDirGuard {
            temp_dir: temp_dir.clone(),
        };
        Ok((StoragePaths { data_dir, temp_dir }, guard))
    }
}
