use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info};

use crate::error::SubmitError;
use crate::metrics::{DELIVERY_FAILURES, DELIVERY_LATENCY};
use crate::models::ContactMessage;
use crate::submit::Submitter;

pub const QUEUE_CAPACITY: usize = 100;

// Queued delivery - holds the message + response channel
pub struct DeliveryJob {
    pub message: ContactMessage,
    pub reply_tx: oneshot::Sender<Result<(), SubmitError>>,
}

/// Background worker: hands queued messages to `sink` one at a time.
pub async fn delivery_worker(mut rx: mpsc::Receiver<DeliveryJob>, sink: Arc<dyn Submitter>) {
    info!("Delivery worker started - forwarding messages sequentially");

    while let Some(job) = rx.recv().await {
        let start = Instant::now();
        let result = sink.submit(&job.message).await;
        DELIVERY_LATENCY.observe(start.elapsed().as_secs_f64());

        if let Err(e) = &result {
            DELIVERY_FAILURES.inc();
            error!("[Worker] delivery failed: {}", e);
        }
        // The caller may have gone away; nothing to do then
        let _ = job.reply_tx.send(result);
    }

    info!("Delivery worker stopped");
}

// Submitter front for the worker queue
#[derive(Clone)]
pub struct QueuedSubmitter {
    tx: mpsc::Sender<DeliveryJob>,
}

impl QueuedSubmitter {
    pub fn new(tx: mpsc::Sender<DeliveryJob>) -> Self {
        Self { tx }
    }

    /// Channel + spawned worker in one go.
    pub fn spawn(sink: Arc<dyn Submitter>) -> Self {
        let (tx, rx) = mpsc::channel::<DeliveryJob>(QUEUE_CAPACITY);
        tokio::spawn(delivery_worker(rx, sink));
        Self { tx }
    }
}

#[async_trait]
impl Submitter for QueuedSubmitter {
    async fn submit(&self, message: &ContactMessage) -> Result<(), SubmitError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job = DeliveryJob {
            message: message.clone(),
            reply_tx,
        };

        self.tx
            .send(job)
            .await
            .map_err(|_| SubmitError::QueueClosed)?;

        reply_rx.await.map_err(|_| SubmitError::WorkerGone)?
    }
}
