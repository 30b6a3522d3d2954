use crate::ui::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationIntent {
    /// Pointer on the right affordance, `advance` signal or auto-advance.
    Next,
    /// Pointer on the left affordance.
    Previous,
    /// Settle window elapsed.
    ReleaseHold,
}

impl Intent for RotationIntent {}
