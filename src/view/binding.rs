//! Declarative event binding.
//!
//! Rendered markup names handlers through `on-<event>` attributes. Names are
//! resolved against a [`HandlerTable`] when the node is bound, producing
//! [`Listener`]s that [`dispatch`] walks when an event fires.

use std::collections::HashMap;
use std::fmt;

use crate::dom::{Event, EventKind, NodeId};

use super::error::ViewError;
use super::View;

/// Binding attributes recognised on rendered markup.
pub const BINDING_ATTRIBUTES: [&str; 7] = [
    "on-mousedown",
    "on-mouseenter",
    "on-mouseleave",
    "on-change",
    "on-keyup",
    "on-click",
    "on-keydown",
];

/// Handler invoked with the owning widget, the event and the owning item node.
pub type Handler<H> = fn(&mut H, &Event, NodeId) -> Result<(), ViewError>;

/// Named handlers a widget exposes to its markup.
pub struct HandlerTable<H> {
    handlers: HashMap<String, Handler<H>>,
}

impl<H> HandlerTable<H> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Builder-style registration.
    pub fn on(mut self, name: &str, handler: Handler<H>) -> Self {
        self.register(name, handler);
        self
    }

    pub fn register(&mut self, name: &str, handler: Handler<H>) {
        self.handlers.insert(name.to_string(), handler);
    }

    pub fn resolve(&self, name: &str) -> Option<Handler<H>> {
        self.handlers.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<H> Default for HandlerTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for HandlerTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("HandlerTable").field("handlers", &names).finish()
    }
}

/// A handler attached to one node for one event kind.
pub struct Listener<H> {
    pub node: NodeId,
    pub kind: EventKind,
    pub handler: Handler<H>,
    /// Item the node belongs to; passed to the handler.
    pub item: NodeId,
}

impl<H> fmt::Debug for Listener<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("node", &self.node)
            .field("kind", &self.kind)
            .field("item", &self.item)
            .finish()
    }
}

/// A type that owns a [`View`] whose handlers take the type itself.
pub trait Widget: Sized {
    type Renderer;

    fn view(&self) -> &View<Self::Renderer, Self>;
}

/// Delivers `event` to every matching listener, bubbling from the target up
/// through its ancestors. Listeners on one node run in registration order.
///
/// Returns how many handlers ran. The first handler error stops delivery.
pub fn dispatch<W: Widget>(widget: &mut W, event: &Event) -> Result<usize, ViewError> {
    let targets: Vec<(NodeId, Handler<W>, NodeId)> = {
        let view = widget.view();
        let document = view.document();
        let mut path = Vec::new();
        let mut current = Some(event.target);
        while let Some(node) = current {
            path.push(node);
            current = document.parent(node);
        }
        path.iter()
            .flat_map(|node| {
                view.listeners()
                    .iter()
                    .filter(move |l| l.node == *node && l.kind == event.kind)
                    .map(|l| (l.node, l.handler, l.item))
            })
            .collect()
    };

    let mut ran = 0;
    for (node, handler, item) in targets {
        // An earlier handler may have removed this node.
        if !widget.view().document().contains(node) {
            continue;
        }
        handler(widget, event, item)?;
        ran += 1;
    }
    tracing::trace!(kind = %event.kind, handlers = ran, "Event dispatched");
    Ok(ran)
}
