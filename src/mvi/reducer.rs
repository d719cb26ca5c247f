use super::intent::Intent;
use super::state::UiState;

/// The only place a view's state changes.
///
/// `reduce` takes the state by value and returns the next one. It must not
/// spawn, block or read the clock; drivers call it with `std::mem::take` on
/// their current state.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
