//! Arena-backed XML document and its mutation/query API

use crate::error::{Error, Result, TreeError};
use crate::xml::node::{Attribute, NodeData, NodeId, NodeKind, NodeType};

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    data: Option<NodeData>,
}

/// An XML document: a node arena, an optional root element and the outcome
/// of the parse that produced it.
///
/// Nodes are created unattached and live until they are freed, either
/// explicitly or together with an ancestor. A parse that fails still yields
/// a document; it keeps whatever tree was built before the first error.
#[derive(Debug, Clone, Default)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: Option<NodeId>,
    error: Option<Error>,
}

impl Document {
    /// Create an empty document with no root and no error
    pub fn new() -> Self {
        Self::default()
    }

    // Construction

    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let data = NodeData::new(kind);
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.data = Some(data);
                return NodeId {
                    index,
                    generation: slot.generation,
                };
            }
        }

        self.slots.push(Slot {
            generation: 0,
            data: Some(data),
        });
        NodeId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.create_node(NodeKind::element(name))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.create_node(NodeKind::Text(text.into()))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.create_node(NodeKind::Comment(text.into()))
    }

    pub fn create_cdata(&mut self, data: impl Into<String>) -> NodeId {
        self.create_node(NodeKind::CData(data.into()))
    }

    /// Create a comment, CDATA or text node from marker-wrapped markup such
    /// as `<!--note-->` or `<![CDATA[raw]]>`.
    pub fn create_from_markup(&mut self, raw: &str) -> NodeId {
        self.create_node(NodeKind::from_markup(raw))
    }

    // Root

    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Make `node` the document root, freeing the previous root subtree.
    pub fn set_root(&mut self, node: NodeId) -> Result<()> {
        let data = self.data(node).ok_or(TreeError::InvalidNode)?;
        if !matches!(data.kind, NodeKind::Element { .. }) {
            return Err(TreeError::NotAnElement.into());
        }
        if data.parent.is_some() {
            return Err(TreeError::AlreadyParented.into());
        }
        if self.root == Some(node) {
            return Ok(());
        }

        if let Some(old) = self.root.take() {
            self.release_subtree(old);
        }
        self.root = Some(node);
        Ok(())
    }

    // Node properties

    /// Kind of the node, or [`NodeType::Unknown`] for a stale handle
    pub fn node_type(&self, node: NodeId) -> NodeType {
        self.data(node)
            .map_or(NodeType::Unknown, |d| d.kind.node_type())
    }

    pub fn node_kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.data(node).map(|d| &d.kind)
    }

    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        match self.node_kind(node)? {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn set_node_name(&mut self, node: NodeId, new_name: impl Into<String>) -> Result<()> {
        match &mut self.data_mut(node)?.kind {
            NodeKind::Element { name, .. } => {
                *name = new_name.into();
                Ok(())
            }
            _ => Err(TreeError::NotAnElement.into()),
        }
    }

    /// Text carried directly by the node
    ///
    /// For an element this is its own character data (not that of its
    /// descendants); for comments and CDATA sections it is the payload
    /// without markers.
    pub fn node_text(&self, node: NodeId) -> Option<&str> {
        match self.node_kind(node)? {
            NodeKind::Element { text, .. } => text.as_deref(),
            NodeKind::Text(s) | NodeKind::Comment(s) | NodeKind::CData(s) => Some(s),
        }
    }

    /// Replace the text of an element or text node.
    ///
    /// Comment and CDATA payloads are fixed at construction.
    pub fn set_node_text(&mut self, node: NodeId, value: impl Into<String>) -> Result<()> {
        match &mut self.data_mut(node)?.kind {
            NodeKind::Element { text, .. } => {
                *text = Some(value.into());
                Ok(())
            }
            NodeKind::Text(s) => {
                *s = value.into();
                Ok(())
            }
            NodeKind::Comment(_) => Err(TreeError::WrongNodeType("COMMENT").into()),
            NodeKind::CData(_) => Err(TreeError::WrongNodeType("CDATA").into()),
        }
    }

    /// All character data in the subtree, in document order
    ///
    /// Comments contribute nothing.
    pub fn full_text(&self, node: NodeId) -> Option<String> {
        self.data(node)?;
        let mut out = String::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(data) = self.data(id) else {
                continue;
            };
            match &data.kind {
                NodeKind::Element { text, .. } => {
                    if let Some(text) = text {
                        out.push_str(text);
                    }
                }
                NodeKind::Text(s) | NodeKind::CData(s) => out.push_str(s),
                NodeKind::Comment(_) => {}
            }
            stack.extend(data.children.iter().rev());
        }
        Some(out)
    }

    // Attributes

    pub fn attribute_count(&self, node: NodeId) -> usize {
        self.attribute_list(node).map_or(0, <[Attribute]>::len)
    }

    pub fn attributes(&self, node: NodeId) -> impl Iterator<Item = &Attribute> + '_ {
        self.attribute_list(node).unwrap_or_default().iter()
    }

    pub fn attribute_at(&self, node: NodeId, index: usize) -> Option<&Attribute> {
        self.attribute_list(node)?.get(index)
    }

    pub fn attribute_name(&self, node: NodeId, index: usize) -> Option<&str> {
        self.attribute_at(node, index).map(|a| a.name.as_str())
    }

    pub fn attribute_value(&self, node: NodeId, index: usize) -> Option<&str> {
        self.attribute_at(node, index).map(|a| a.value.as_str())
    }

    /// Value of the first attribute called `name`
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attribute_list(node)?
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Update the first attribute called `name`, or add a new one in front
    /// of the existing attributes.
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        let value = value.into();
        let attributes = self.attribute_list_mut(node)?;
        match attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => attributes.insert(0, Attribute::new(name, value)),
        }
        Ok(())
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<()> {
        let attributes = self.attribute_list_mut(node)?;
        let index = attributes
            .iter()
            .position(|a| a.name == name)
            .ok_or_else(|| TreeError::AttributeNotFound(name.to_string()))?;
        attributes.remove(index);
        Ok(())
    }

    // Navigation

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.data(node)
            .map(|d| d.children.as_slice())
            .unwrap_or_default()
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    pub fn child(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.children(node).get(index).copied()
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).first().copied()
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|&c| c == node)?;
        siblings.get(index + 1).copied()
    }

    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|&c| c == node)?;
        index.checked_sub(1).and_then(|i| siblings.get(i).copied())
    }

    // Mutation

    /// Append `child` as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_attachable(parent, child)?;
        self.link(parent, child, None);
        Ok(())
    }

    /// Insert `child` at `index` among the children of `parent`. An index
    /// past the end appends.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()> {
        self.check_attachable(parent, child)?;
        self.link(parent, child, Some(index));
        Ok(())
    }

    /// Detach `child` from `parent`. The detached subtree stays alive and can
    /// be re-attached or freed by the caller.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.data(child).ok_or(TreeError::InvalidNode)?;
        let position = self
            .data(parent)
            .ok_or(TreeError::InvalidNode)?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(TreeError::NotAChild)?;

        self.data_mut(parent)?.children.remove(position);
        self.data_mut(child)?.parent = None;
        Ok(())
    }

    pub fn remove_and_free_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.remove_child(parent, child)?;
        self.release_subtree(child);
        Ok(())
    }

    /// Detach every child of `node`, freeing them when `free` is set.
    pub fn remove_all_children(&mut self, node: NodeId, free: bool) -> Result<()> {
        let children = std::mem::take(&mut self.data_mut(node)?.children);
        for child in children {
            if free {
                self.release_subtree(child);
            } else if let Some(data) = self.data_mut_opt(child) {
                data.parent = None;
            }
        }
        Ok(())
    }

    /// Free a detached node and all of its descendants.
    ///
    /// Freeing the root leaves the document without one.
    pub fn free_node(&mut self, node: NodeId) -> Result<()> {
        if self.data(node).ok_or(TreeError::InvalidNode)?.parent.is_some() {
            return Err(TreeError::AlreadyParented.into());
        }
        if self.root == Some(node) {
            self.root = None;
        }
        self.release_subtree(node);
        Ok(())
    }

    /// Deep copy of `node`: name, text, attributes in their current order and
    /// all descendants. The copy has no parent.
    pub fn clone_node(&mut self, node: NodeId) -> Result<NodeId> {
        let kind = self.data(node).ok_or(TreeError::InvalidNode)?.kind.clone();
        let copy = self.create_node(kind);

        let mut pending = vec![(node, copy)];
        while let Some((source, target)) = pending.pop() {
            let children = self.children(source).to_vec();
            for child in children {
                let Some(kind) = self.data(child).map(|d| d.kind.clone()) else {
                    continue;
                };
                let child_copy = self.create_node(kind);
                self.link(target, child_copy, None);
                pending.push((child, child_copy));
            }
        }
        Ok(copy)
    }

    // Search

    /// First element child of `node` called `name`
    pub fn find_child(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .find(|&c| self.node_name(c) == Some(name))
    }

    /// Every element child of `node` called `name`, in order
    pub fn find_children(&self, node: NodeId, name: &str) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|&c| self.node_name(c) == Some(name))
            .collect()
    }

    /// Follow a `/`-separated chain of child names starting at `node`.
    ///
    /// Each segment takes the first matching child; empty segments are
    /// ignored, so an empty path yields `node` itself.
    pub fn find_by_path(&self, node: NodeId, path: &str) -> Option<NodeId> {
        if self.node_type(node) != NodeType::Element {
            return None;
        }
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(node, |current, segment| self.find_child(current, segment))
    }

    /// Number of live nodes, attached or not
    pub fn node_count(&self) -> usize {
        self.slots.iter().filter(|s| s.data.is_some()).count()
    }

    // Parse outcome

    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub const fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(Error::message)
    }

    /// Line of the first parse error, 0 when there is none
    pub fn error_line(&self) -> usize {
        self.error
            .as_ref()
            .and_then(Error::location)
            .map_or(0, |l| l.line)
    }

    /// Column of the first parse error, 0 when there is none
    pub fn error_column(&self) -> usize {
        self.error
            .as_ref()
            .and_then(Error::location)
            .map_or(0, |l| l.column)
    }

    // Crate internals

    /// Record a parse error; only the first one sticks
    pub(crate) fn set_error(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub(crate) fn replace_root(&mut self, node: NodeId) {
        self.root = Some(node);
    }

    /// Attach without validation; the parser only links fresh nodes
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        if let Some(data) = self.data_mut_opt(parent) {
            match index {
                Some(i) if i < data.children.len() => data.children.insert(i, child),
                _ => data.children.push(child),
            }
        }
        if let Some(data) = self.data_mut_opt(child) {
            data.parent = Some(parent);
        }
    }

    pub(crate) fn append_text(&mut self, node: NodeId, more: &str) {
        if let Some(NodeKind::Element { text, .. }) = self.data_mut_opt(node).map(|d| &mut d.kind) {
            text.get_or_insert_with(String::new).push_str(more);
        }
    }

    pub(crate) fn attribute_list(&self, node: NodeId) -> Option<&[Attribute]> {
        match self.node_kind(node)? {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    fn attribute_list_mut(&mut self, node: NodeId) -> Result<&mut Vec<Attribute>> {
        match &mut self.data_mut(node)?.kind {
            NodeKind::Element { attributes, .. } => Ok(attributes),
            _ => Err(TreeError::NotAnElement.into()),
        }
    }

    fn check_attachable(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_data = self.data(parent).ok_or(TreeError::InvalidNode)?;
        let child_data = self.data(child).ok_or(TreeError::InvalidNode)?;
        if !matches!(parent_data.kind, NodeKind::Element { .. }) {
            return Err(TreeError::NotAnElement.into());
        }
        if child_data.parent.is_some() {
            return Err(TreeError::AlreadyParented.into());
        }

        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                return Err(TreeError::CycleDetected.into());
            }
            ancestor = self.parent(id);
        }

        if self.root == Some(child) {
            return Err(TreeError::RootNotMovable.into());
        }
        Ok(())
    }

    /// Unlink `node` from its parent (if any) and free its subtree
    fn release_subtree(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node) {
            if let Some(data) = self.data_mut_opt(parent) {
                data.children.retain(|&c| c != node);
            }
        }
        if self.root == Some(node) {
            self.root = None;
        }

        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(slot) = self.live_slot_mut(id) else {
                continue;
            };
            if let Some(data) = slot.data.take() {
                stack.extend(data.children);
            }
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.index);
        }
    }

    pub(crate) fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.slots
            .get(node.index)
            .filter(|s| s.generation == node.generation)
            .and_then(|s| s.data.as_ref())
    }

    fn data_mut_opt(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.live_slot_mut(node).and_then(|s| s.data.as_mut())
    }

    fn data_mut(&mut self, node: NodeId) -> Result<&mut NodeData> {
        self.data_mut_opt(node)
            .ok_or_else(|| Error::new(TreeError::InvalidNode))
    }

    fn live_slot_mut(&mut self, node: NodeId) -> Option<&mut Slot> {
        self.slots
            .get_mut(node.index)
            .filter(|s| s.generation == node.generation && s.data.is_some())
    }
}
