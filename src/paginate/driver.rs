use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::api::{Fetcher, FetchFailure, Page, RequestDescriptor};
use crate::mvi::Reducer;
use crate::resource::{Completion, FetchSlot};

use super::identified::Identified;
use super::intent::PaginatorIntent;
use super::reducer::PaginatorReducer;
use super::state::{PaginatorState, Phase};

type DescriptorFactory = Box<dyn Fn(u32, u32) -> RequestDescriptor + Send>;

/// A "load more" list view over one paginated collection.
///
/// The factory turns `(page, limit)` into the descriptor for that page; it
/// captures the filter context (collection, locale, tab). Replacing it with
/// [`set_factory`](Self::set_factory) is a filter change: the list resets
/// before page 1 is requested.
pub struct PaginatedList<T: Identified> {
    slot: FetchSlot<Page<T>>,
    factory: DescriptorFactory,
    page_size: u32,
    state: PaginatorState<T>,
}

impl<T> PaginatedList<T>
where
    T: Identified + DeserializeOwned + Clone + PartialEq + Send + 'static,
{
    /// Create an idle list. Nothing is fetched until [`start`](Self::start).
    pub fn new<F>(fetcher: Arc<dyn Fetcher>, factory: F, page_size: u32) -> Self
    where
        F: Fn(u32, u32) -> RequestDescriptor + Send + 'static,
    {
        Self {
            slot: FetchSlot::new(fetcher),
            factory: Box::new(factory),
            page_size: page_size.max(1),
            state: PaginatorState::default(),
        }
    }

    /// Reset and request page 1.
    pub fn start(&mut self) {
        self.reset();
        self.request(1);
    }

    /// Drop all accumulated items and supersede any outstanding read.
    pub fn reset(&mut self) {
        let generation = self.slot.supersede();
        self.dispatch(PaginatorIntent::Reset { generation });
    }

    /// Switch to a different filtered collection and load its first page.
    pub fn set_factory<F>(&mut self, factory: F)
    where
        F: Fn(u32, u32) -> RequestDescriptor + Send + 'static,
    {
        self.factory = Box::new(factory);
        self.start();
    }

    /// Request the page after the last merged one.
    ///
    /// Does nothing (and returns false) while a read is outstanding, after a
    /// failure (use [`retry`](Self::retry)), or when every item is loaded.
    pub fn load_more(&mut self) -> bool {
        if self.state.phase != Phase::Loaded || !self.state.has_more() {
            return false;
        }
        let next = self.state.list.current_page().saturating_add(1);
        self.request(next);
        true
    }

    /// Re-request the page whose read failed.
    pub fn retry(&mut self) -> bool {
        match (self.state.phase, self.state.pending_page) {
            (Phase::Failed, Some(page)) => {
                self.request(page);
                true
            }
            _ => false,
        }
    }

    /// Re-request the current page. Items already held are not duplicated.
    pub fn refetch(&mut self) {
        match self.state.phase {
            Phase::Empty => self.start(),
            Phase::Failed => {
                self.retry();
            }
            Phase::Loading | Phase::LoadingMore | Phase::Loaded => {
                let page = self
                    .state
                    .pending_page
                    .unwrap_or_else(|| self.state.list.current_page());
                self.request(page);
            }
        }
    }

    /// Apply settled reads until the outstanding page has landed.
    pub async fn settle(&mut self) -> &PaginatorState<T> {
        while self.state.phase.is_loading() {
            match self.slot.next().await {
                Some(completion) => self.apply(completion),
                None => break,
            }
        }
        &self.state
    }

    /// Apply every settled read that is already waiting.
    pub fn poll_completions(&mut self) -> usize {
        let mut received = 0;
        while let Some(completion) = self.slot.try_next() {
            self.apply(completion);
            received += 1;
        }
        received
    }

    pub fn state(&self) -> &PaginatorState<T> {
        &self.state
    }

    pub fn items(&self) -> &[T] {
        self.state.list.items()
    }

    pub fn total(&self) -> Option<u64> {
        self.state.list.total()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_loading(&self) -> bool {
        self.state.phase.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error_message()
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        self.state.error.as_ref()
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn request(&mut self, page: u32) {
        let descriptor = (self.factory)(page, self.page_size);
        let generation = self.slot.issue(descriptor);
        self.dispatch(PaginatorIntent::Request { generation, page });
    }

    fn apply(&mut self, completion: Completion<Page<T>>) {
        if !self.slot.is_current(&completion) {
            tracing::debug!(
                generation = completion.generation,
                current = self.slot.current(),
                "discarding superseded page"
            );
        }
        self.dispatch(PaginatorIntent::Settled {
            generation: completion.generation,
            outcome: completion.outcome,
        });
    }

    fn dispatch(&mut self, intent: PaginatorIntent<T>) {
        let state = std::mem::take(&mut self.state);
        self.state = PaginatorReducer::reduce(state, intent);
    }
}
