//! Retained node tree that views render into.
//!
//! A [`Document`] owns every node in an arena. Nodes are addressed by
//! [`NodeId`], which carries a generation so that ids of removed nodes never
//! alias a node created later in the same slot.
//!
//! ```text
//! body
//!  └── div#root-node           <- view container
//!       ├── div[view-item=1]   <- view item
//!       └── div[view-item=2]
//! ```

pub mod event;
pub mod markup;

pub use event::{Event, EventKind};
pub use markup::{MarkupError, MarkupNode};

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Content of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<NodeData>,
}

/// Arena-backed node tree with a permanent `body` root.
#[derive(Debug)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut document = Self {
            slots: Vec::new(),
            free: Vec::new(),
            body: NodeId {
                index: 0,
                generation: 0,
            },
        };
        document.body = document.create_element("body");
        document
    }

    /// The root `body` element. It is never removed.
    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.insert(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.insert(NodeKind::Text(text.to_string()))
    }

    fn insert(&mut self, kind: NodeKind) -> NodeId {
        let data = NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(data);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(data),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Whether `id` still refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|n| &n.kind)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Whether `node` is `ancestor` or lies below it.
    pub fn is_inclusive_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first. Appending a node under itself is ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) {
            return;
        }
        if self.is_inclusive_descendant(parent, child) {
            return;
        }
        self.detach(child);
        if let Some(data) = self.node_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = self.node_mut(parent) {
            data.children.push(child);
        }
    }

    /// Unlinks `id` from its parent. The subtree stays alive.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(data) = self.node_mut(parent) {
            data.children.retain(|c| *c != id);
        }
        if let Some(data) = self.node_mut(id) {
            data.parent = None;
        }
    }

    /// Detaches and frees `id` and its whole subtree.
    ///
    /// Returns every freed id (pre-order). Removing the body is refused.
    pub fn remove(&mut self, id: NodeId) -> Vec<NodeId> {
        if id == self.body || !self.contains(id) {
            return Vec::new();
        }
        self.detach(id);
        let mut freed = vec![id];
        freed.extend(self.descendants(id));
        for node in &freed {
            let slot = &mut self.slots[node.index as usize];
            slot.node = None;
            self.free.push(node.index);
        }
        freed
    }

    /// Frees every child of `id`, returning the freed ids.
    pub fn remove_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = self.children(id).to_vec();
        children.into_iter().flat_map(|c| self.remove(c)).collect()
    }

    /// All nodes below `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.node(id)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(NodeData {
            kind: NodeKind::Element { attributes, .. },
            ..
        }) = self.node_mut(id)
        {
            match attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(NodeData {
            kind: NodeKind::Element { attributes, .. },
            ..
        }) = self.node_mut(id)
        {
            attributes.retain(|(key, _)| key != name);
        }
    }

    /// First element at or below the body whose `id` attribute matches.
    pub fn element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|node| self.attribute(*node, "id") == Some(element_id))
    }

    /// Elements below `scope` carrying `name`, optionally with an exact value.
    pub fn query_attribute(&self, scope: NodeId, name: &str, value: Option<&str>) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| match (self.attribute(*node, name), value) {
                (Some(_), None) => true,
                (Some(found), Some(wanted)) => found == wanted,
                (None, _) => false,
            })
            .collect()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        let list = match self.attribute(id, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attribute(id, "class", &list);
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        let Some(existing) = self.attribute(id, "class") else {
            return;
        };
        let list = existing
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(id, "class", &list);
    }

    /// Reads one declaration from the inline `style` attribute.
    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        parse_style(self.attribute(id, "style")?)
            .into_iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value)
    }

    /// Sets one declaration in the inline `style` attribute, keeping the others.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        let mut declarations = self
            .attribute(id, "style")
            .map(parse_style)
            .unwrap_or_default();
        match declarations.iter_mut().find(|(key, _)| key == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => declarations.push((property.to_string(), value.to_string())),
        }
        let style = declarations
            .iter()
            .map(|(key, value)| format!("{key}: {value};"))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(id, "style", &style);
    }

    /// Concatenated text of `id` and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut nodes = vec![id];
        nodes.extend(self.descendants(id));
        nodes
            .into_iter()
            .filter_map(|node| match self.kind(node) {
                Some(NodeKind::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Parses `source` and builds detached nodes for each top-level node.
    pub fn parse_fragment(&mut self, source: &str) -> Result<Vec<NodeId>, MarkupError> {
        let parsed = markup::parse(source)?;
        Ok(parsed.iter().map(|node| self.build(node)).collect())
    }

    /// Parses `source` and appends the resulting nodes under `parent`.
    pub fn append_markup(&mut self, parent: NodeId, source: &str) -> Result<Vec<NodeId>, MarkupError> {
        let nodes = self.parse_fragment(source)?;
        for node in &nodes {
            self.append_child(parent, *node);
        }
        Ok(nodes)
    }

    fn build(&mut self, node: &MarkupNode) -> NodeId {
        match node {
            MarkupNode::Text(text) => self.create_text(text),
            MarkupNode::Element {
                tag,
                attributes,
                children,
            } => {
                let id = self.create_element(tag);
                for (name, value) in attributes {
                    self.set_attribute(id, name, value);
                }
                for child in children {
                    let child_id = self.build(child);
                    self.append_child(id, child_id);
                }
                id
            }
        }
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_html(*child, &mut out);
        }
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            Some(NodeKind::Text(text)) => out.push_str(&markup::escape_text(text)),
            Some(NodeKind::Element { tag, attributes }) => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&markup::escape_attribute(value));
                    out.push('"');
                }
                out.push('>');
                if markup::is_void(tag) {
                    return;
                }
                for child in self.children(id) {
                    self.write_html(*child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            None => {}
        }
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|declaration| {
            let (key, value) = declaration.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}
