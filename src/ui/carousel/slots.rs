//! Three-slot ring holding the previous, current and next item nodes.

use crate::dom::NodeId;

/// Horizontal placement of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    Previous,
    Current,
    Next,
}

impl Offset {
    /// Value written to the slot's inline `left` style.
    pub fn css(self) -> &'static str {
        match self {
            Offset::Previous => "-100%",
            Offset::Current => "0%",
            Offset::Next => "100%",
        }
    }
}

/// Fixed ring of three node handles. Rotating moves `head` and overwrites
/// the one slot that left the window; the other two keep their nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRing {
    nodes: [NodeId; 3],
    head: usize,
}

impl SlotRing {
    pub fn new(previous: NodeId, current: NodeId, next: NodeId) -> Self {
        Self {
            nodes: [previous, current, next],
            head: 0,
        }
    }

    pub fn previous(&self) -> NodeId {
        self.nodes[self.head]
    }

    pub fn current(&self) -> NodeId {
        self.nodes[(self.head + 1) % 3]
    }

    pub fn next(&self) -> NodeId {
        self.nodes[(self.head + 2) % 3]
    }

    /// Current becomes previous, next becomes current and `entering` becomes
    /// next. Returns the discarded previous node.
    pub fn rotate_forward(&mut self, entering: NodeId) -> NodeId {
        let leaving = self.nodes[self.head];
        self.nodes[self.head] = entering;
        self.head = (self.head + 1) % 3;
        leaving
    }

    /// Current becomes next, previous becomes current and `entering` becomes
    /// previous. Returns the discarded next node.
    pub fn rotate_backward(&mut self, entering: NodeId) -> NodeId {
        let slot = (self.head + 2) % 3;
        let leaving = self.nodes[slot];
        self.nodes[slot] = entering;
        self.head = slot;
        leaving
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn nodes(count: usize) -> Vec<NodeId> {
        let mut doc = Document::new();
        (0..count).map(|_| doc.create_element("div")).collect()
    }

    #[test]
    fn forward_relabels_without_copying() {
        let n = nodes(4);
        let mut ring = SlotRing::new(n[0], n[1], n[2]);
        let leaving = ring.rotate_forward(n[3]);
        assert_eq!(leaving, n[0]);
        assert_eq!((ring.previous(), ring.current(), ring.next()), (n[1], n[2], n[3]));
    }

    #[test]
    fn backward_relabels_without_copying() {
        let n = nodes(4);
        let mut ring = SlotRing::new(n[0], n[1], n[2]);
        let leaving = ring.rotate_backward(n[3]);
        assert_eq!(leaving, n[2]);
        assert_eq!((ring.previous(), ring.current(), ring.next()), (n[3], n[0], n[1]));
    }

    #[test]
    fn forward_then_backward_restores_current() {
        let n = nodes(5);
        let mut ring = SlotRing::new(n[0], n[1], n[2]);
        ring.rotate_forward(n[3]);
        ring.rotate_backward(n[4]);
        assert_eq!(ring.current(), n[1]);
        assert_eq!(ring.next(), n[2]);
        assert_eq!(ring.previous(), n[4]);
    }
}
