use std::marker::PhantomData;

use crate::mvi::Reducer;

use super::identified::Identified;
use super::intent::PaginatorIntent;
use super::state::{PaginatorState, Phase};

/// Reducer for the paginated view state machine.
pub struct PaginatorReducer<T>(PhantomData<T>);

impl<T> Reducer for PaginatorReducer<T>
where
    T: Identified + Clone + PartialEq + Send + 'static,
{
    type State = PaginatorState<T>;
    type Intent = PaginatorIntent<T>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PaginatorIntent::Reset { generation } => PaginatorState {
                generation,
                ..PaginatorState::default()
            },

            PaginatorIntent::Request { generation, page } => {
                let phase = if state.list.is_empty() {
                    Phase::Loading
                } else {
                    Phase::LoadingMore
                };
                PaginatorState {
                    phase,
                    error: None,
                    pending_page: Some(page),
                    generation,
                    ..state
                }
            }

            PaginatorIntent::Settled {
                generation,
                outcome,
            } => {
                if generation != state.generation || !state.phase.is_loading() {
                    return state;
                }
                let Some(requested) = state.pending_page else {
                    return state;
                };

                match outcome {
                    Ok(page) => {
                        let mut list = state.list;
                        list.append_page(page);
                        // The counter moves only once the requested page is merged.
                        while list.current_page() < requested {
                            list.load_more();
                        }
                        PaginatorState {
                            list,
                            phase: Phase::Loaded,
                            error: None,
                            pending_page: None,
                            generation,
                        }
                    }
                    Err(failure) => PaginatorState {
                        phase: Phase::Failed,
                        error: Some(failure),
                        ..state
                    },
                }
            }
        }
    }
}
