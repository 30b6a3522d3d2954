//! Base trait for intents (user/system actions).

/// Marker trait for intent objects.
///
/// Intents represent pointer input, timer expiry and custom signals
/// delivered to a widget.
pub trait Intent: Send + 'static {}
