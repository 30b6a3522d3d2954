//! Rendering and event-delegation base shared by all widgets.
//!
//! A [`View`] binds to a container element, renders models through its
//! [`Renderer`], tags every rendered root as a view item and wires the
//! `on-<event>` attributes found in the rendered markup to named handlers.
//! Every render replaces or appends whole nodes; nothing is diffed.

mod api;
mod binding;
mod error;
mod model;

use std::sync::Arc;

use crate::dom::{Document, EventKind, NodeId};
use crate::resource::Resource;

pub use api::{build_api, ApiArgs, ApiDescriptor, ApiFuture, ApiTable, Endpoint};
pub use binding::{dispatch, Handler, HandlerTable, Listener, Widget, BINDING_ATTRIBUTES};
pub use error::ViewError;
pub use model::{Renderer, ViewModel};

/// Marker attribute carried by every addressable top-level rendered node.
pub const ITEM_ATTRIBUTE: &str = "view-item";

pub struct View<R, H> {
    document: Document,
    root: NodeId,
    renderer: R,
    handlers: HandlerTable<H>,
    listeners: Vec<Listener<H>>,
    api: ApiTable,
    next_item_id: u64,
}

impl<R, H> View<R, H> {
    /// Binds to the element with id `root_id` and wires up any items that
    /// were rendered before the view existed.
    pub fn attach(
        document: Document,
        root_id: &str,
        renderer: R,
        handlers: HandlerTable<H>,
    ) -> Result<Self, ViewError> {
        let root = document
            .element_by_id(root_id)
            .ok_or_else(|| ViewError::RootNotFound {
                id: root_id.to_string(),
            })?;

        let mut view = Self {
            document,
            root,
            renderer,
            handlers,
            listeners: Vec::new(),
            api: ApiTable::default(),
            next_item_id: 0,
        };

        let existing = view.items();
        for item in existing {
            view.next_item_id += 1;
            view.bind_events(item);
        }
        tracing::debug!(root = root_id, items = view.next_item_id, "View attached");
        Ok(view)
    }

    /// Builds the api table from `descriptors`.
    pub fn with_api(mut self, descriptors: &[ApiDescriptor], resource: Arc<dyn Resource>) -> Self {
        self.api = build_api(descriptors, resource);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Consumes the view, handing back its document.
    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn api(&self) -> &ApiTable {
        &self.api
    }

    pub fn listeners(&self) -> &[Listener<H>] {
        &self.listeners
    }

    /// Replaces every child of the container with one item per model, in order.
    ///
    /// All models are rendered before the container is touched, so a render
    /// failure leaves the existing children in place.
    pub fn render_list<M>(&mut self, models: &[M]) -> Result<Vec<NodeId>, ViewError>
    where
        R: Renderer<M>,
    {
        let nodes = self.render_all(models)?;
        self.remove_all_items();
        self.append_nodes(&nodes);
        Ok(nodes)
    }

    /// Appends one item per model after the existing children.
    pub fn append_list<M>(&mut self, models: &[M]) -> Result<Vec<NodeId>, ViewError>
    where
        R: Renderer<M>,
    {
        let nodes = self.render_all(models)?;
        self.append_nodes(&nodes);
        Ok(nodes)
    }

    /// Replaces every child of the container with a single rendered item.
    ///
    /// Sequences are refused with [`ViewError::SequenceModel`] before anything
    /// is rendered.
    pub fn render_single<M>(&mut self, model: &M) -> Result<NodeId, ViewError>
    where
        M: ViewModel + ?Sized,
        R: Renderer<M>,
    {
        if model.is_sequence() {
            return Err(ViewError::SequenceModel {
                type_name: std::any::type_name::<M>(),
            });
        }
        let node = self.render_node(model)?;
        self.remove_all_items();
        self.append_item(node);
        Ok(node)
    }

    /// Renders `model` into a detached, tagged node without inserting it.
    pub fn render_node<M>(&mut self, model: &M) -> Result<NodeId, ViewError>
    where
        M: ?Sized,
        R: Renderer<M>,
    {
        let markup = self.renderer.render_item(model)?;
        let mut nodes = self.document.parse_fragment(&markup)?.into_iter();
        let Some(node) = nodes.next() else {
            return Err(ViewError::EmptyMarkup);
        };

        let extra: Vec<NodeId> = nodes.collect();
        if !extra.is_empty() {
            tracing::error!(
                roots = extra.len() + 1,
                "Template must have exactly one root node; keeping the first"
            );
            for node in extra {
                self.document.remove(node);
            }
        }

        if self.document.tag(node).is_some() && !self.document.has_attribute(node, ITEM_ATTRIBUTE) {
            self.next_item_id += 1;
            let id = self.next_item_id.to_string();
            self.document.set_attribute(node, ITEM_ATTRIBUTE, &id);
        }
        Ok(node)
    }

    fn render_all<M>(&mut self, models: &[M]) -> Result<Vec<NodeId>, ViewError>
    where
        R: Renderer<M>,
    {
        let mut nodes = Vec::with_capacity(models.len());
        for model in models {
            match self.render_node(model) {
                Ok(node) => nodes.push(node),
                Err(err) => {
                    for node in nodes {
                        self.document.remove(node);
                    }
                    return Err(err);
                }
            }
        }
        Ok(nodes)
    }

    fn append_nodes(&mut self, nodes: &[NodeId]) {
        for node in nodes {
            self.append_item(*node);
        }
    }

    /// Appends a rendered node to the container and binds its events.
    pub fn append_item(&mut self, node: NodeId) {
        self.document.append_child(self.root, node);
        self.bind_events(node);
    }

    /// Every marked item below the container, in document order.
    pub fn items(&self) -> Vec<NodeId> {
        self.document.query_attribute(self.root, ITEM_ATTRIBUTE, None)
    }

    pub fn item(&self, id: &str) -> Option<NodeId> {
        self.document
            .query_attribute(self.root, ITEM_ATTRIBUTE, Some(id))
            .into_iter()
            .next()
    }

    pub fn item_id(&self, node: NodeId) -> Option<&str> {
        self.document.attribute(node, ITEM_ATTRIBUTE)
    }

    pub fn remove_item(&mut self, id: &str) -> Result<(), ViewError> {
        let node = self.item(id).ok_or_else(|| ViewError::ItemNotFound { id: id.to_string() })?;
        self.remove_node(node);
        Ok(())
    }

    /// Clears the container, including children that are not view items.
    pub fn remove_all_items(&mut self) {
        let freed = self.document.remove_children(self.root);
        self.forget(&freed);
    }

    /// Removes any node (and its subtree) along with its listeners.
    pub fn remove_node(&mut self, node: NodeId) {
        let freed = self.document.remove(node);
        self.forget(&freed);
    }

    fn forget(&mut self, freed: &[NodeId]) {
        if freed.is_empty() {
            return;
        }
        self.listeners.retain(|l| !freed.contains(&l.node));
    }

    /// Scans `item` and its descendants for binding attributes and registers
    /// a listener for each one whose handler name is known.
    ///
    /// Returns the number of listeners added.
    pub fn bind_events(&mut self, item: NodeId) -> usize {
        let mut added = 0;
        for attribute in BINDING_ATTRIBUTES {
            let kind = EventKind::from_name(&attribute[3..]);
            let mut nodes = Vec::new();
            if self.document.has_attribute(item, attribute) {
                nodes.push(item);
            }
            nodes.extend(self.document.query_attribute(item, attribute, None));

            for node in nodes {
                let Some(name) = self.document.attribute(node, attribute) else {
                    continue;
                };
                match self.handlers.resolve(name) {
                    Some(handler) => {
                        self.listeners.push(Listener {
                            node,
                            kind: kind.clone(),
                            handler,
                            item,
                        });
                        added += 1;
                    }
                    None => {
                        tracing::warn!(handler = name, event = %kind, "No handler registered; binding skipped");
                    }
                }
            }
        }
        added
    }

    /// Registers a listener directly, outside the attribute scan.
    pub fn add_listener(&mut self, node: NodeId, kind: EventKind, handler: Handler<H>, item: NodeId) {
        self.listeners.push(Listener {
            node,
            kind,
            handler,
            item,
        });
    }
}
