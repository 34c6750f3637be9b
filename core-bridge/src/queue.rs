//! Serial Execution Queues
//!
//! Each queue is a long-lived worker task fed by an unbounded channel.
//! The worker awaits one job at a time, so jobs submitted to the same
//! queue execute in submission order with no interleaving. There is no
//! ordering guarantee across queues, and no cancellation: a submitted
//! job runs to completion.

use futures_util::future::BoxFuture;
use std::future::Future;
use tokio::sync::mpsc;
use tracing::{debug, warn};

type Job = BoxFuture<'static, ()>;

/// A named serial execution queue.
///
/// Dropping the queue closes the channel; the worker drains what was
/// already submitted and then stops.
pub(crate) struct CallQueue {
    name: &'static str,
    tx: mpsc::UnboundedSender<Job>,
}

impl CallQueue {
    /// Spawn the worker task for a new queue.
    ///
    /// Must be called from within a Tokio runtime.
    pub(crate) fn new(name: &'static str) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();

        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                job.await;
            }
            debug!(queue = name, "Queue worker stopped");
        });

        Self { name, tx }
    }

    /// Submit a job for serial execution.
    ///
    /// Returns `false` if the worker has stopped, in which case the job
    /// will never run and the submitter must fail the pending call
    /// itself.
    pub(crate) fn submit<F>(&self, job: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let accepted = self.tx.send(Box::pin(job)).is_ok();
        if !accepted {
            warn!(queue = self.name, "Queue worker is gone; job rejected");
        }
        accepted
    }
}
