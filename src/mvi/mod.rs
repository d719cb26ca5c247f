//! Reducer plumbing shared by the fetch-backed views.
//!
//! `resource` and `paginate` both keep their state behind a pure reducer and
//! only change it by dispatching intents. Everything asynchronous (spawned
//! reads, completion channels) lives in the drivers; the reducers never see a
//! future, so the race guard, page merging and reset rules are plain
//! synchronous code.
//!
//! ```text
//! driver ── intent ──→ Reducer::reduce ──→ new state ──→ view
//!   ↑                                                      │
//!   └──── set_descriptor / load_more / settled read ───────┘
//! ```

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
