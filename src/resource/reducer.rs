use std::marker::PhantomData;

use crate::mvi::Reducer;

use super::intent::ResourceIntent;
use super::state::ResourceState;

/// Reducer for single-resource reads.
pub struct ResourceReducer<T>(PhantomData<T>);

impl<T: Clone + PartialEq + Send + 'static> Reducer for ResourceReducer<T> {
    type State = ResourceState<T>;
    type Intent = ResourceIntent<T>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ResourceIntent::Issue { generation } => ResourceState {
                generation,
                is_loading: true,
                error: None,
                ..state
            },

            ResourceIntent::Settled {
                generation,
                outcome,
            } => {
                // Last descriptor wins, not last response.
                if generation != state.generation || !state.is_loading {
                    return state;
                }
                match outcome {
                    Ok(data) => ResourceState {
                        data: Some(data),
                        is_loading: false,
                        error: None,
                        generation,
                    },
                    Err(failure) => ResourceState {
                        is_loading: false,
                        error: Some(failure),
                        ..state
                    },
                }
            }

            ResourceIntent::Cancel { generation } => ResourceState {
                generation,
                is_loading: false,
                ..state
            },
        }
    }
}
