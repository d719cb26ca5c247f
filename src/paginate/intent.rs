use crate::api::{FetchFailure, Page};
use crate::mvi::Intent;

/// Events that drive a [`PaginatorState`](super::PaginatorState).
#[derive(Debug, Clone)]
pub enum PaginatorIntent<T> {
    /// The filtered collection changed; drop everything accumulated.
    Reset { generation: u64 },

    /// A page was requested and is now the outstanding read.
    Request { generation: u64, page: u32 },

    /// The outstanding read settled.
    Settled {
        generation: u64,
        outcome: Result<Page<T>, FetchFailure>,
    },
}

impl<T: Send + 'static> Intent for PaginatorIntent<T> {}
