//! Routes spawned reads back to the view that owns them.
//!
//! Reads run as tokio tasks so the owner stays responsive; their results come
//! back through a channel and are applied by the owner one at a time. Each
//! read is tagged with the generation it was issued under, so the owner can
//! tell a current result from a superseded one.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::api::{decode, FetchError, FetchFailure, Fetcher, RequestDescriptor};

/// A settled read.
#[derive(Debug)]
pub struct Completion<T> {
    pub generation: u64,
    pub outcome: Result<T, FetchFailure>,
}

/// Reads still running are aborted when the slot is dropped.
pub struct FetchSlot<T> {
    fetcher: Arc<dyn Fetcher>,
    generation: u64,
    sender: mpsc::UnboundedSender<Completion<T>>,
    receiver: mpsc::UnboundedReceiver<Completion<T>>,
    reads: Vec<AbortHandle>,
}

impl<T: DeserializeOwned + Send + 'static> FetchSlot<T> {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            fetcher,
            generation: 0,
            sender,
            receiver,
            reads: Vec::new(),
        }
    }

    /// Generation of the most recently issued or superseded read.
    pub fn current(&self) -> u64 {
        self.generation
    }

    /// Supersede whatever is outstanding and start reading `descriptor`.
    ///
    /// Every issued read reports back exactly once, even if the fetcher
    /// panics; a read that dies that way settles as a network failure.
    /// Must be called from within a tokio runtime.
    pub fn issue(&mut self, descriptor: RequestDescriptor) -> u64 {
        let generation = self.supersede();
        let fetcher = self.fetcher.clone();
        let sender = self.sender.clone();

        let read = tokio::spawn(async move {
            fetcher.fetch(&descriptor).await.and_then(decode::<T>)
        });
        self.reads.retain(|handle| !handle.is_finished());
        self.reads.push(read.abort_handle());

        tokio::spawn(async move {
            let result = match read.await {
                Ok(result) => result,
                Err(err) if err.is_cancelled() => {
                    tracing::trace!(generation, "read aborted with its owner");
                    return;
                }
                Err(err) => {
                    tracing::error!(generation, "read task panicked: {}", err);
                    Err(FetchError::Network {
                        message: "request did not complete".to_string(),
                    })
                }
            };
            let outcome = result.map_err(|err| {
                tracing::debug!(generation, kind = err.kind().as_str(), "read failed: {}", err);
                FetchFailure::from(err)
            });
            if sender.send(Completion { generation, outcome }).is_err() {
                tracing::trace!(generation, "read settled after its owner was dropped");
            }
        });

        tracing::debug!(generation, "read issued");
        generation
    }

    /// Invalidate any outstanding read without starting a new one.
    pub fn supersede(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Whether `completion` belongs to the current generation.
    pub fn is_current(&self, completion: &Completion<T>) -> bool {
        completion.generation == self.generation
    }

    /// Wait for the next settled read, current or not.
    pub async fn next(&mut self) -> Option<Completion<T>> {
        self.receiver.recv().await
    }

    /// Take a settled read if one is already waiting.
    pub fn try_next(&mut self) -> Option<Completion<T>> {
        self.receiver.try_recv().ok()
    }
}

impl<T> Drop for FetchSlot<T> {
    fn drop(&mut self) {
        for read in &self.reads {
            read.abort();
        }
    }
}
