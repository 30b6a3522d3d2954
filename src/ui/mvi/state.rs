//! Base trait for widget state.

/// Marker trait for widget state objects.
///
/// States are cloned to compare before/after a reduction, so they should stay
/// small and self-contained.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
