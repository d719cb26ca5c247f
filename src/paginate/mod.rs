//! Incremental Paginator: merges successive pages of a collection into one
//! de-duplicated, insertion-ordered list with a "load more" action.
//!
//! # Architecture
//!
//! - `identified.rs` - how items expose their identity
//! - `list.rs` - the accumulated list and its invariants
//! - `state.rs` / `intent.rs` / `reducer.rs` - the paginated view state machine
//! - `driver.rs` - the `PaginatedList` a view holds
//!
//! ```text
//! Empty ─→ Loading ─→ Loaded(has_more) ⇄ LoadingMore
//!             │                             │
//!             └────────→ Failed ←───────────┘
//! ```
//!
//! A filter change returns to `Empty` from any phase.

mod driver;
mod identified;
mod intent;
mod list;
mod reducer;
mod state;

pub use driver::PaginatedList;
pub use identified::{EntityId, Identified};
pub use intent::PaginatorIntent;
pub use list::AccumulatedList;
pub use reducer::PaginatorReducer;
pub use state::{PaginatorState, Phase};
