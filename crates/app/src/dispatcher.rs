//! Command dispatcher — best-effort, non-blocking delivery of color commands.
//!
//! Callers enqueue with [`Dispatcher::dispatch`], which never waits. A fixed
//! pool of worker tasks drains the bounded queue and calls the
//! [`CommandSender`] port under a timeout. Delivery failures are logged and
//! dropped here; they never reach the caller and never touch the registry.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};

use signalhub_domain::address::Address;
use signalhub_domain::color::Color;

use crate::ports::CommandSender;

/// One color command for one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub address: Address,
    pub color: Color,
}

/// Sizing and timeout of the dispatch worker pool.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Number of concurrent deliveries.
    pub workers: usize,
    /// Commands buffered before new ones are dropped.
    pub queue_capacity: usize,
    /// Upper bound on a single delivery.
    pub timeout: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            queue_capacity: 256,
            timeout: Duration::from_millis(500),
        }
    }
}

/// Cheaply cloneable handle used to enqueue commands.
///
/// The workers stop once every handle has been dropped and the queue is
/// drained.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    queue: mpsc::Sender<Command>,
}

impl Dispatcher {
    /// Start the worker pool on the current tokio runtime.
    pub fn spawn<S>(sender: S, config: &DispatcherConfig) -> Self
    where
        S: CommandSender + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));
        let sender = Arc::new(sender);

        for worker in 0..config.workers.max(1) {
            tokio::spawn(run_worker(
                worker,
                Arc::clone(&sender),
                Arc::clone(&rx),
                config.timeout,
            ));
        }

        tracing::info!(
            workers = config.workers,
            queue_capacity = config.queue_capacity,
            timeout_ms = config.timeout.as_millis(),
            "dispatcher started"
        );

        Self { queue: tx }
    }

    /// Enqueue `color` for `address` and return immediately.
    ///
    /// When the queue is full the command is dropped.
    pub fn dispatch(&self, address: Address, color: Color) {
        match self.queue.try_send(Command { address, color }) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(cmd)) => {
                tracing::warn!(address = %cmd.address, color = %cmd.color, "dispatch queue full, dropping command");
            }
            Err(mpsc::error::TrySendError::Closed(cmd)) => {
                tracing::warn!(address = %cmd.address, color = %cmd.color, "dispatcher stopped, dropping command");
            }
        }
    }
}

async fn run_worker<S>(
    worker: usize,
    sender: Arc<S>,
    queue: Arc<Mutex<mpsc::Receiver<Command>>>,
    timeout: Duration,
) where
    S: CommandSender + Send + Sync,
{
    loop {
        let next = queue.lock().await.recv().await;
        let Some(cmd) = next else {
            break;
        };
        deliver(sender.as_ref(), &cmd, timeout).await;
    }
    tracing::debug!(worker, "dispatch worker stopped");
}

async fn deliver<S: CommandSender>(sender: &S, cmd: &Command, timeout: Duration) {
    match tokio::time::timeout(timeout, sender.send(&cmd.address, cmd.color)).await {
        Ok(Ok(())) => {
            tracing::trace!(address = %cmd.address, color = %cmd.color, "command delivered");
        }
        Ok(Err(err)) => {
            tracing::debug!(%err, address = %cmd.address, color = %cmd.color, "command delivery failed");
        }
        Err(_) => {
            tracing::debug!(address = %cmd.address, color = %cmd.color, "command delivery timed out");
        }
    }
}
