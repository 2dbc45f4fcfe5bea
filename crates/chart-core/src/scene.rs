// File: crates/chart-core/src/scene.rs
// Summary: Retained SVG scene tree (the canvas): nodes, attributes, classes, listeners,
// exit transitions and SVG serialization.

use std::fmt::Write as _;
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::config::Transition;
use crate::error::Result;

/// Handle to a node in a [`Scene`]. Stays valid until the node is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Pointer events a node can listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    MouseEnter,
    MouseLeave,
}

/// Event callback; receives the node the listener is attached to.
pub type Listener = Rc<dyn Fn(NodeId)>;

pub struct Node {
    tag: String,
    attrs: IndexMap<String, String>,
    classes: Vec<String>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    key: Option<String>,
    transition: Option<Transition>,
    exiting: bool,
    listeners: Vec<(EventKind, Listener)>,
}

impl Node {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: IndexMap::new(),
            classes: Vec::new(),
            text: None,
            parent,
            children: Vec::new(),
            key: None,
            transition: None,
            exiting: false,
            listeners: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str { &self.tag }
    pub fn classes(&self) -> &[String] { &self.classes }
    pub fn text(&self) -> Option<&str> { self.text.as_deref() }
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Arena-backed tree rooted at an `<svg>` element.
pub struct Scene {
    nodes: Vec<Option<Node>>,
    root: NodeId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let mut root = Node::new("svg", None);
        root.attrs.insert("xmlns".into(), "http://www.w3.org/2000/svg".into());
        Self { nodes: vec![Some(root)], root: NodeId(0) }
    }

    pub fn root(&self) -> NodeId { self.root }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn alloc(&mut self, tag: &str, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(tag, Some(parent))));
        id
    }

    /// Append a new `tag` element as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.alloc(tag, parent);
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        id
    }

    /// Insert a new `tag` element as the first child of `parent`.
    pub fn prepend(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.alloc(tag, parent);
        if let Some(p) = self.node_mut(parent) {
            p.children.insert(0, id);
        }
        id
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).and_then(|n| n.attrs.get(name)).map(String::as_str)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl ToString) {
        if let Some(n) = self.node_mut(id) {
            n.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(n) = self.node_mut(id) {
            n.attrs.shift_remove(name);
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(n) = self.node_mut(id) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(n) = self.node_mut(id) {
            n.classes.retain(|c| c != class);
        }
    }

    pub fn set_class(&mut self, id: NodeId, class: &str, on: bool) {
        if on { self.add_class(id, class) } else { self.remove_class(id, class) }
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(n) = self.node_mut(id) {
            n.text = Some(text.into());
        }
    }

    /// Join key bound by the reconciler.
    pub fn key(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.key.as_deref())
    }

    pub fn set_key(&mut self, id: NodeId, key: impl Into<String>) {
        if let Some(n) = self.node_mut(id) {
            n.key = Some(key.into());
        }
    }

    /// First child of `parent` carrying `class` (and `key`, when given) that is not exiting.
    pub fn find_child(&self, parent: NodeId, class: &str, key: Option<&str>) -> Option<NodeId> {
        self.children(parent).iter().copied().find(|&c| {
            self.has_class(c, class) && !self.is_exiting(c) && key.map_or(true, |k| self.key(c) == Some(k))
        })
    }

    /// All descendants of `from` (pre-order, `from` excluded) carrying `class`.
    pub fn select_all(&self, from: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(from).into_iter().filter(|&id| self.has_class(id, class)).collect()
    }

    /// All descendants of `from` whose attribute `name` equals `value`.
    pub fn select_by_attr(&self, from: NodeId, name: &str, value: &str) -> Vec<NodeId> {
        self.descendants(from).into_iter().filter(|&id| self.attr(id, name) == Some(value)).collect()
    }

    /// Descendant with `id="<element_id>"`.
    pub fn by_element_id(&self, element_id: &str) -> Option<NodeId> {
        self.select_by_attr(self.root, "id", element_id).into_iter().next()
    }

    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(from).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Closest node (self included) carrying `class`.
    pub fn closest(&self, id: NodeId, class: &str) -> Option<NodeId> {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if self.has_class(c, class) {
                return Some(c);
            }
            cur = self.parent(c);
        }
        None
    }

    /// Detach and drop `id` and its whole subtree. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root || !self.contains(id) {
            return;
        }
        if let Some(parent) = self.parent(id) {
            if let Some(p) = self.node_mut(parent) {
                p.children.retain(|c| *c != id);
            }
        }
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(cur.0).and_then(Option::take) {
                stack.extend(node.children);
            }
        }
    }

    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.children(id).to_vec() {
            self.remove(child);
        }
    }

    pub fn set_transition(&mut self, id: NodeId, transition: Transition) {
        if let Some(n) = self.node_mut(id) {
            n.transition = (!transition.is_instant()).then_some(transition);
        }
    }

    pub fn transition(&self, id: NodeId) -> Option<Transition> {
        self.node(id).and_then(|n| n.transition)
    }

    pub fn is_exiting(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.exiting)
    }

    /// Remove `id`, fading it out first when `transition` takes time.
    /// A faded node stays in the tree until [`Scene::complete_transitions`].
    pub fn exit(&mut self, id: NodeId, transition: Transition) {
        if transition.is_instant() {
            self.remove(id);
            return;
        }
        self.set_attr(id, "opacity", 0);
        self.remove_attr(id, "pointer-events");
        if let Some(n) = self.node_mut(id) {
            n.exiting = true;
            n.transition = Some(transition);
            n.listeners.clear();
        }
    }

    /// Finish every running transition: exiting nodes are dropped, the rest settle.
    /// Returns how many nodes were removed.
    pub fn complete_transitions(&mut self) -> usize {
        let exiting: Vec<NodeId> = (0..self.nodes.len())
            .map(NodeId)
            .filter(|&id| self.is_exiting(id))
            .collect();
        for id in &exiting {
            self.remove(*id);
        }
        for node in self.nodes.iter_mut().flatten() {
            node.transition = None;
        }
        exiting.len()
    }

    /// Attach `listener` for `kind`, replacing any previous one.
    pub fn on(&mut self, id: NodeId, kind: EventKind, listener: Listener) {
        if let Some(n) = self.node_mut(id) {
            n.listeners.retain(|(k, _)| *k != kind);
            n.listeners.push((kind, listener));
        }
    }

    pub fn off(&mut self, id: NodeId, kind: EventKind) {
        if let Some(n) = self.node_mut(id) {
            n.listeners.retain(|(k, _)| *k != kind);
        }
    }

    pub fn listener(&self, id: NodeId, kind: EventKind) -> Option<Listener> {
        self.node(id)?.listeners.iter().find(|(k, _)| *k == kind).map(|(_, l)| Rc::clone(l))
    }

    /// Serialize the live tree as SVG markup.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        self.write_node(&mut out, self.root, 0);
        out
    }

    pub fn write_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_svg())?;
        Ok(())
    }

    fn write_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let Some(node) = self.node(id) else { return };
        let pad = "  ".repeat(depth);
        let _ = write!(out, "{pad}<{}", node.tag);
        if !node.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&node.classes.join(" ")));
        }
        for (k, v) in &node.attrs {
            let _ = write!(out, " {k}=\"{}\"", escape(v));
        }
        if node.children.is_empty() && node.text.is_none() {
            out.push_str("/>\n");
            return;
        }
        out.push('>');
        if let Some(text) = &node.text {
            out.push_str(&escape(text));
        }
        if !node.children.is_empty() {
            out.push('\n');
            for child in &node.children {
                self.write_node(out, *child, depth + 1);
            }
            out.push_str(&pad);
        }
        let _ = writeln!(out, "</{}>", node.tag);
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
