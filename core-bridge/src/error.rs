use thiserror::Error;

/// Caller-visible failure classes of the bridge.
///
/// Every call resolves with exactly one outcome; these are the failure
/// halves. Engine messages are passed through opaquely.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    /// Data or temp directory could not be provisioned. Fatal to the
    /// current connection attempt; a later call may retry once the
    /// underlying condition (disk space, permissions) is resolved.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The engine failed to open. The connection manager retains no
    /// partial state, so a subsequent call retries the open.
    #[error("Could not open engine database: {0}")]
    Connection(String),

    /// A dispatched engine method failed. Not retried automatically.
    #[error("Engine error: {0}")]
    Engine(String),

    /// The service's worker queues have shut down; the call was not
    /// completed and will not be.
    #[error("Bridge is shut down")]
    Terminated,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_human_readable() {
        let err = CoreError::StorageUnavailable("could not create temp dir".to_string());
        assert_eq!(
            err.to_string(),
            "Storage unavailable: could not create temp dir"
        );

        let err = CoreError::Engine("unknown method: frob".to_string());
        assert_eq!(err.to_string(), "Engine error: unknown method: frob");

        let err = CoreError::Terminated;
        assert_eq!(err.to_string(), "Bridge is shut down");
    }
}
