//! Call Routing
//!
//! Classifies an inbound call by method name and assigns it to one of
//! the two serial execution queues. Synchronization can legitimately
//! run for seconds; isolating it on its own queue bounds the latency
//! impact of an in-flight sync on the short request/response calls a
//! responsive UI issues continuously. The engine connection itself is
//! safe for concurrent use from both queues - the split exists to bound
//! caller-visible latency and keep same-class operations predictable,
//! not to protect the connection.

/// The long-running synchronization method name.
pub const SYNC_METHOD: &str = "sync";

/// The serial execution queue a call is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueKind {
    /// Default queue for short request/response calls.
    General,
    /// Reserved for the synchronization method.
    Sync,
}

impl QueueKind {
    /// Queue name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Sync => "sync",
        }
    }
}

/// Select the queue for a method. Exactly one method name is
/// special-cased; everything else runs on the general queue.
pub fn route(method: &str) -> QueueKind {
    if method == SYNC_METHOD {
        QueueKind::Sync
    } else {
        QueueKind::General
    }
}
