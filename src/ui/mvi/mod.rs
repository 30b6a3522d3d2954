//! Model-View-Intent (MVI) primitives for widget state machines.
//!
//! Widgets keep their navigational state in a [`UiState`] value and change it
//! only through a [`Reducer`]. Side effects on the node tree are applied by
//! the widget after comparing the state before and after the reduction.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ node tree effects
//!    ↑                                 │
//!    └──── pointer / timer events ─────┘
//! ```

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
