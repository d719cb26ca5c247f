use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::api::{Fetcher, RequestDescriptor};
use crate::mvi::Reducer;

use super::intent::ResourceIntent;
use super::reducer::ResourceReducer;
use super::slot::{Completion, FetchSlot};
use super::state::ResourceState;

/// A single-resource read bound to a changing descriptor.
///
/// Holding a `Resource` is the equivalent of a view mounting a data hook:
/// setting a new descriptor issues a read, and only the read for the latest
/// descriptor can change the state. Dropping the `Resource` discards every
/// outstanding result.
pub struct Resource<T> {
    slot: FetchSlot<T>,
    descriptor: Option<RequestDescriptor>,
    state: ResourceState<T>,
}

impl<T> Resource<T>
where
    T: DeserializeOwned + Clone + PartialEq + Send + 'static,
{
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            slot: FetchSlot::new(fetcher),
            descriptor: None,
            state: ResourceState::default(),
        }
    }

    /// Point the resource at `descriptor`.
    ///
    /// `None` means a required input is not available yet: nothing is
    /// fetched and any outstanding read is superseded. An unchanged
    /// descriptor does not trigger a new read; use [`refetch`](Self::refetch).
    pub fn set_descriptor(&mut self, descriptor: Option<RequestDescriptor>) {
        if descriptor == self.descriptor {
            return;
        }
        self.descriptor = descriptor;
        match self.descriptor.clone() {
            Some(descriptor) => self.issue(descriptor),
            None => {
                let generation = self.slot.supersede();
                self.dispatch(ResourceIntent::Cancel { generation });
            }
        }
    }

    /// Reissue the read for the current descriptor, keeping any data shown.
    pub fn refetch(&mut self) {
        if let Some(descriptor) = self.descriptor.clone() {
            self.issue(descriptor);
        }
    }

    /// Apply settled reads until the current one has landed.
    ///
    /// Returns immediately when nothing is loading.
    pub async fn settle(&mut self) -> &ResourceState<T> {
        while self.state.is_loading {
            match self.slot.next().await {
                Some(completion) => self.apply(completion),
                None => break,
            }
        }
        &self.state
    }

    /// Apply every settled read that is already waiting. Returns how many
    /// were received, including discarded ones.
    pub fn poll_completions(&mut self) -> usize {
        let mut received = 0;
        while let Some(completion) = self.slot.try_next() {
            self.apply(completion);
            received += 1;
        }
        received
    }

    pub fn descriptor(&self) -> Option<&RequestDescriptor> {
        self.descriptor.as_ref()
    }

    pub fn state(&self) -> &ResourceState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        self.state.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error_message()
    }

    fn issue(&mut self, descriptor: RequestDescriptor) {
        let generation = self.slot.issue(descriptor);
        self.dispatch(ResourceIntent::Issue { generation });
    }

    fn apply(&mut self, completion: Completion<T>) {
        if !self.slot.is_current(&completion) {
            tracing::debug!(
                generation = completion.generation,
                current = self.slot.current(),
                "discarding superseded result"
            );
        }
        self.dispatch(ResourceIntent::Settled {
            generation: completion.generation,
            outcome: completion.outcome,
        });
    }

    fn dispatch(&mut self, intent: ResourceIntent<T>) {
        let state = std::mem::take(&mut self.state);
        self.state = ResourceReducer::reduce(state, intent);
    }
}
