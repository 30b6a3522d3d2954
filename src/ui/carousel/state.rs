//! Rotation state of a carousel.

use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RotationState {
    /// Zero or one item: static render, nothing rotates.
    #[default]
    Idle,
    Rotating {
        /// Position of the current item, always `< len`.
        index: usize,
        len: usize,
        /// Set after a transition until the settle window elapses.
        hold: bool,
    },
}

impl UiState for RotationState {}

impl RotationState {
    /// Initial state for a carousel with `len` items.
    pub fn for_len(len: usize) -> Self {
        if len < 2 {
            Self::Idle
        } else {
            Self::Rotating {
                index: 0,
                len,
                hold: false,
            }
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Rotating { index, .. } => *index,
        }
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self, Self::Rotating { .. })
    }

    pub fn is_held(&self) -> bool {
        matches!(self, Self::Rotating { hold: true, .. })
    }
}
