//! Unbounded FIFO queue between the input producer and the log consumer.
//!
//! Modeled as a typed channel with an explicit finished signal: the
//! producer half enqueues raw messages and is consumed by `finish()`,
//! which makes enqueue-after-finish unrepresentable; the consumer half
//! blocks on `dequeue()` until a message arrives or the queue is both
//! empty and finished.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Shared counters, visible from both halves of the queue.
#[derive(Debug, Default)]
pub struct QueueMetrics {
    enqueued: AtomicU64,
    dequeued: AtomicU64,
    finished: AtomicBool,
}

impl QueueMetrics {
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    pub fn dequeued(&self) -> u64 {
        self.dequeued.load(Ordering::Relaxed)
    }

    /// Messages enqueued but not yet dequeued.
    pub fn pending(&self) -> u64 {
        self.enqueued().saturating_sub(self.dequeued())
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}

pub struct MessageQueue;

impl MessageQueue {
    /// Create the queue and split it into its producer and consumer halves.
    pub fn unbounded() -> (QueueProducer, QueueConsumer) {
        let (tx, rx) = mpsc::unbounded_channel();
        let metrics = Arc::new(QueueMetrics::default());
        (
            QueueProducer {
                tx,
                metrics: metrics.clone(),
            },
            QueueConsumer { rx, metrics },
        )
    }
}

/// Producer half. Exactly one exists per queue; it is not `Clone`, so the
/// single-producer discipline holds by construction.
#[derive(Debug)]
pub struct QueueProducer {
    tx: UnboundedSender<String>,
    metrics: Arc<QueueMetrics>,
}

impl QueueProducer {
    /// Append a message at the tail, waking the consumer if it is waiting.
    ///
    /// The consumer outlives the producer in this design, so a closed
    /// channel here is a contract violation and panics rather than being
    /// surfaced as a recoverable error.
    pub fn enqueue(&self, message: String) {
        self.tx
            .send(message)
            .expect("consumer dropped before the queue was finished");
        self.metrics.enqueued.fetch_add(1, Ordering::Relaxed);
    }

    /// Mark the queue finished and wake the consumer so it can drain the
    /// remaining messages and terminate.
    ///
    /// Consumes the producer: no enqueue can follow. Dropping the producer
    /// without calling this has the same effect, so end-of-input and the
    /// exit sentinel behave identically.
    pub fn finish(self) {
        drop(self);
    }

    pub fn metrics(&self) -> Arc<QueueMetrics> {
        self.metrics.clone()
    }
}

impl Drop for QueueProducer {
    fn drop(&mut self) {
        // The sender half closes when it drops, which wakes the consumer.
        self.metrics.finished.store(true, Ordering::Release);
    }
}

/// Consumer half: strict FIFO dequeue with blocking wait.
#[derive(Debug)]
pub struct QueueConsumer {
    rx: UnboundedReceiver<String>,
    metrics: Arc<QueueMetrics>,
}

impl QueueConsumer {
    /// Wait until a message is available (returned in FIFO order) or the
    /// queue is empty and finished, in which case this returns `None` and
    /// keeps returning `None` on every later call.
    pub async fn dequeue(&mut self) -> Option<String> {
        let message = self.rx.recv().await;
        if message.is_some() {
            self.metrics.dequeued.fetch_add(1, Ordering::Relaxed);
        }
        message
    }

    pub fn metrics(&self) -> Arc<QueueMetrics> {
        self.metrics.clone()
    }
}
