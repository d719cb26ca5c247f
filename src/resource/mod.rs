//! Fetch Resource: one outstanding read per descriptor, exposed as
//! loading/error/data state.
//!
//! # Architecture
//!
//! Uses the MVI pattern:
//! - `state.rs` - tri-state snapshot of the read
//! - `intent.rs` - issue / settle / cancel events
//! - `reducer.rs` - transitions, including the stale-result guard
//! - `slot.rs` - spawns reads and routes their completions back to the owner
//! - `driver.rs` - the `Resource` a view holds

mod driver;
mod intent;
mod reducer;
mod slot;
mod state;

pub use driver::Resource;
pub use intent::ResourceIntent;
pub use reducer::ResourceReducer;
pub use slot::{Completion, FetchSlot};
pub use state::ResourceState;
