use crate::api::FetchFailure;
use crate::mvi::Intent;

/// Events that drive a [`ResourceState`](super::ResourceState).
#[derive(Debug, Clone)]
pub enum ResourceIntent<T> {
    /// A read was issued and is now the current one.
    Issue { generation: u64 },

    /// A read settled.
    Settled {
        generation: u64,
        outcome: Result<T, FetchFailure>,
    },

    /// Nothing should be fetched any more (sentinel descriptor or teardown).
    Cancel { generation: u64 },
}

impl<T: Send + 'static> Intent for ResourceIntent<T> {}
