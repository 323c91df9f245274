//! Stylesheet tree: insert, remove, splice, walk.

use std::collections::VecDeque;

use slotmap::{new_key_type, SecondaryMap, SlotMap};

use super::model::{NodeKind, Rule};

new_key_type! {
    /// Unique identifier for a stylesheet node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// A parsed stylesheet, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps, so replacing a rule is a splice on its parent's child
/// list and no node ever holds a reference to another.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    nodes: SlotMap<NodeId, NodeKind>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: NodeId,
}

impl Stylesheet {
    /// Create a stylesheet holding only its root container.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeKind::Root);
        let mut children = SecondaryMap::new();
        children.insert(root, Vec::new());
        Self {
            nodes,
            children,
            parent: SecondaryMap::new(),
            root,
        }
    }

    /// The root container.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a node as the last child of `parent`.
    ///
    /// Returns `None` if `parent` does not exist.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> Option<NodeId> {
        let index = self.children.get(parent)?.len();
        self.insert_at(parent, index, kind)
    }

    /// Insert a node as a child of `parent` at `index` (clamped to the child count).
    ///
    /// Returns `None` if `parent` does not exist.
    pub fn insert_at(&mut self, parent: NodeId, index: usize, kind: NodeKind) -> Option<NodeId> {
        if !self.children.contains_key(parent) {
            return None;
        }
        let id = self.nodes.insert(kind);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        let siblings = self.children.get_mut(parent)?;
        let index = index.min(siblings.len());
        siblings.insert(index, id);
        Some(id)
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the data for the removed node, or `None` if it didn't exist.
    /// The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeKind> {
        if id == self.root || !self.nodes.contains_key(id) {
            return None;
        }

        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed = data;
            }
        }

        removed
    }

    /// Replace `id` with zero or more new nodes at the position it occupied.
    ///
    /// The replacements keep their relative order. Returns the new ids, or
    /// `None` if `id` is the root or has no parent.
    pub fn replace(
        &mut self,
        id: NodeId,
        replacements: impl IntoIterator<Item = NodeKind>,
    ) -> Option<Vec<NodeId>> {
        let parent = self.parent(id)?;
        let position = self.index_in_parent(id)?;
        self.remove(id)?;
        replacements
            .into_iter()
            .enumerate()
            .map(|(offset, kind)| self.insert_at(parent, position + offset, kind))
            .collect()
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Position of `id` among its parent's children.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&child| child == id)
    }

    /// Get the children of a node. Returns an empty slice if the node has no children
    /// or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeKind> {
        self.nodes.get_mut(id)
    }

    /// Borrow the rule stored at `id`, if that node is a rule.
    pub fn rule(&self, id: NodeId) -> Option<&Rule> {
        self.get(id).and_then(NodeKind::as_rule)
    }

    /// Mutably borrow the rule stored at `id`, if that node is a rule.
    pub fn rule_mut(&mut self, id: NodeId) -> Option<&mut Rule> {
        self.get_mut(id).and_then(NodeKind::as_rule_mut)
    }

    /// Every rule container (root first, then nested at-rules) in document order.
    ///
    /// `@keyframes` and declaration-only at-rules are not containers.
    pub fn containers(&self) -> Vec<NodeId> {
        let mut result = Vec::new();
        self.collect_containers(self.root, &mut result);
        result
    }

    fn collect_containers(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if !self.get(id).is_some_and(NodeKind::is_rule_container) {
            return;
        }
        out.push(id);
        for &child in self.children(id) {
            self.collect_containers(child, out);
        }
    }

    /// Every style rule in document order, paired with its parent container.
    pub fn walk_rules(&self) -> Vec<(NodeId, NodeId)> {
        let mut result = Vec::new();
        self.collect_rules(self.root, &mut result);
        result
    }

    fn collect_rules(&self, container: NodeId, out: &mut Vec<(NodeId, NodeId)>) {
        for &child in self.children(container) {
            match self.get(child) {
                Some(NodeKind::Rule(_)) => out.push((container, child)),
                Some(kind) if kind.is_rule_container() => self.collect_rules(child, out),
                _ => {}
            }
        }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root has no children.
    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    /// Whether the stylesheet contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}
