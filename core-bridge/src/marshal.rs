//! Call Marshaling
//!
//! Bridges the async call surface and the engine's synchronous
//! byte-payload calling convention. Payload contents are passed through
//! unchanged; an absent argument normalizes to an empty byte sequence.
//! The blocking native call runs on the blocking pool so a slow engine
//! never stalls the queue workers' executor threads.

use bridge_traits::EngineConnection;
use bytes::Bytes;
use std::sync::Arc;
use tokio::task;

use crate::error::{CoreError, Result};

/// Normalize an optional argument to the engine's calling convention.
pub(crate) fn normalize_payload(payload: Option<Bytes>) -> Bytes {
    payload.unwrap_or_default()
}

/// Invoke the engine's dispatch entry point.
///
/// Engine failures pass through as opaque messages; no retry happens at
/// this layer. A panicking engine is contained and reported as an error
/// instead of taking the worker down with it.
pub(crate) async fn invoke(
    conn: Arc<dyn EngineConnection>,
    method: String,
    payload: Bytes,
) -> Result<Bytes> {
    match task::spawn_blocking(move || conn.dispatch(&method, &payload)).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(err)) => Err(CoreError::Engine(err.to_string())),
        Err(err) => Err(CoreError::Engine(format!("engine dispatch panicked: {}", err))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::EngineError;
    use std::result::Result;

    struct EchoConnection;

    impl EngineConnection for EchoConnection {
        fn dispatch(&self, method: &str, payload: &[u8]) -> Result<Bytes, EngineError> {
            match method {
                "echo" => Ok(Bytes::copy_from_slice(payload)),
                "empty" => Ok(Bytes::new()),
                "panic" => panic!("engine blew up"),
                other => Err(EngineError::Dispatch(format!("unknown method: {}", other))),
            }
        }
    }

    #[test]
    fn absent_payload_normalizes_to_empty() {
        assert!(normalize_payload(None).is_empty());
        assert_eq!(normalize_payload(Some(Bytes::from_static(b"x"))).as_ref(), b"x");
    }

    #[tokio::test]
    async fn payload_passes_through_unchanged() {
        let conn: Arc<dyn EngineConnection> = Arc::new(EchoConnection);
        let result = invoke(conn, "echo".to_string(), Bytes::from_static(b"\x00\xffraw"))
            .await
            .unwrap();
        assert_eq!(result.as_ref(), b"\x00\xffraw");
    }

    #[tokio::test]
    async fn zero_length_result_is_success() {
        let conn: Arc<dyn EngineConnection> = Arc::new(EchoConnection);
        let result = invoke(conn, "empty".to_string(), Bytes::new()).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn engine_failure_maps_to_engine_error() {
        let conn: Arc<dyn EngineConnection> = Arc::new(EchoConnection);
        let err = invoke(conn, "frob".to_string(), Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Engine(_)));
        assert!(err.to_string().contains("unknown method: frob"));
    }

    #[tokio::test]
    async fn engine_panic_is_contained() {
        let conn: Arc<dyn EngineConnection> = Arc::new(EchoConnection);
        let err = invoke(conn, "panic".to_string(), Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Engine(_)));
    }
}
