use crate::api::FetchFailure;
use crate::mvi::UiState;

/// Snapshot of a single-resource read.
///
/// After a settled read exactly one of `data`/`error` describes the outcome
/// of that read; `data` from an earlier success is kept when a later read
/// fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<FetchFailure>,
    /// Generation whose result will be applied. 0 before the first read.
    pub generation: u64,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T: Clone + PartialEq + Send + 'static> UiState for ResourceState<T> {}

impl<T> ResourceState<T> {
    /// Surfaced error message, if the last read failed.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}
