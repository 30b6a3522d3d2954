//! Events delivered to view listeners.

use std::fmt;

use super::NodeId;

/// Kind of event a listener reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseDown,
    MouseEnter,
    MouseLeave,
    Change,
    KeyUp,
    Click,
    KeyDown,
    /// Application-defined signal, e.g. a carousel's `advance`.
    Custom(String),
}

impl EventKind {
    pub fn name(&self) -> &str {
        match self {
            EventKind::MouseDown => "mousedown",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::Change => "change",
            EventKind::KeyUp => "keyup",
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
            EventKind::Custom(name) => name,
        }
    }

    /// Maps an event name to its kind; unknown names become [`EventKind::Custom`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "mousedown" => EventKind::MouseDown,
            "mouseenter" => EventKind::MouseEnter,
            "mouseleave" => EventKind::MouseLeave,
            "change" => EventKind::Change,
            "keyup" => EventKind::KeyUp,
            "click" => EventKind::Click,
            "keydown" => EventKind::KeyDown,
            other => EventKind::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An event fired at a node. It bubbles from `target` up through its ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
    /// Free-form payload, e.g. the key for key events or the new value for `change`.
    pub detail: Option<String>,
}

impl Event {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            detail: None,
        }
    }

    pub fn custom(name: &str, target: NodeId) -> Self {
        Self::new(EventKind::Custom(name.to_string()), target)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
