//! Reducer for carousel rotation.

use crate::ui::mvi::Reducer;

use super::intent::RotationIntent;
use super::state::RotationState;

pub struct RotationReducer;

impl Reducer for RotationReducer {
    type State = RotationState;
    type Intent = RotationIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match (state, intent) {
            // Debounce: a held carousel ignores navigation entirely.
            (state @ RotationState::Rotating { hold: true, .. }, RotationIntent::Next)
            | (state @ RotationState::Rotating { hold: true, .. }, RotationIntent::Previous) => state,

            (RotationState::Rotating { index, len, .. }, RotationIntent::Next) => {
                RotationState::Rotating {
                    index: (index + 1) % len,
                    len,
                    hold: true,
                }
            }
            (RotationState::Rotating { index, len, .. }, RotationIntent::Previous) => {
                RotationState::Rotating {
                    index: (index + len - 1) % len,
                    len,
                    hold: true,
                }
            }
            (RotationState::Rotating { index, len, .. }, RotationIntent::ReleaseHold) => {
                RotationState::Rotating {
                    index,
                    len,
                    hold: false,
                }
            }
            (RotationState::Idle, _) => RotationState::Idle,
        }
    }
}
