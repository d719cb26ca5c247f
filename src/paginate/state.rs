use crate::api::FetchFailure;
use crate::mvi::UiState;

use super::identified::Identified;
use super::list::AccumulatedList;

/// Where a paginated view is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Empty,
    /// First page requested, nothing to show yet.
    Loading,
    Loaded,
    /// A further page requested while earlier items stay visible.
    LoadingMore,
    /// The last request failed; earlier items stay visible.
    Failed,
}

impl Phase {
    pub fn is_loading(self) -> bool {
        matches!(self, Phase::Loading | Phase::LoadingMore)
    }
}

/// Snapshot of a paginated view for one filter context.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatorState<T: Identified> {
    pub list: AccumulatedList<T>,
    pub phase: Phase,
    pub error: Option<FetchFailure>,
    /// Page requested by the outstanding (or last failed) read.
    pub pending_page: Option<u32>,
    /// Generation whose result will be applied.
    pub generation: u64,
}

impl<T: Identified> Default for PaginatorState<T> {
    fn default() -> Self {
        Self {
            list: AccumulatedList::default(),
            phase: Phase::Empty,
            error: None,
            pending_page: None,
            generation: 0,
        }
    }
}

impl<T> UiState for PaginatorState<T> where T: Identified + Clone + PartialEq + Send + 'static {}

impl<T: Identified> PaginatorState<T> {
    pub fn has_more(&self) -> bool {
        self.list.has_more()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}
