//! Headless element model used as the gated subtree.
//!
//! An [`ElementTree`] is an arena of elements with parent links. Its root is
//! the subtree boundary: a [`ClickListener`] passed to
//! [`ElementTree::dispatch_click`] sits there and sees every click in the
//! capture phase, before any element handler runs in the bubble phase.

use serde::{Deserialize, Serialize};

/// A single element: its kind, class names and an optional action
/// description used when the gate blocks a click on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    tag: String,
    #[serde(default)]
    classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            classes: Vec::new(),
            action: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn with_classes<I, S>(self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        classes.into_iter().fold(self, |element, class| element.with_class(class))
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Parse a compact node spec: `button.btn-primary.large`
    pub fn parse_spec(spec: &str) -> Option<Self> {
        let mut parts = spec.trim().split('.');
        let tag = parts.next().filter(|tag| !tag.is_empty())?;
        let mut element = Element::new(tag);
        for class in parts {
            if class.is_empty() {
                return None;
            }
            element = element.with_class(class);
        }
        Some(element)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(usize);

pub type ClickHandler = Box<dyn FnMut(&ClickEvent)>;

struct Node {
    element: Element,
    parent: Option<NodeId>,
    handler: Option<ClickHandler>,
}

/// A click travelling through the tree
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub target: NodeId,
    /// Elements from the click origin up to and including the boundary
    pub path: Vec<Element>,
    /// Nodes whose handlers ran, in bubble order
    pub handled_by: Vec<NodeId>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl ClickEvent {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Whether the click was blocked before reaching any handler
    pub fn suppressed(&self) -> bool {
        self.default_prevented && self.propagation_stopped
    }
}

/// A listener attached at the subtree boundary
pub trait ClickListener {
    fn on_click(&mut self, event: &mut ClickEvent);
}

pub struct ElementTree {
    nodes: Vec<Node>,
}

impl ElementTree {
    /// Create a tree whose root is the subtree boundary
    pub fn new(root: Element) -> Self {
        Self {
            nodes: vec![Node {
                element: root,
                parent: None,
                handler: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        debug_assert!(parent.0 < self.nodes.len(), "parent node out of range");
        self.nodes.push(Node {
            element,
            parent: Some(parent),
            handler: None,
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn on_click(&mut self, node: NodeId, handler: impl FnMut(&ClickEvent) + 'static) {
        self.nodes[node.0].handler = Some(Box::new(handler));
    }

    pub fn element(&self, node: NodeId) -> &Element {
        &self.nodes[node.0].element
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Node ids from `target` up to the root
    pub fn path(&self, target: NodeId) -> Vec<NodeId> {
        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path
    }

    /// Dispatch a click on `target`. The boundary listener (if any) runs first;
    /// element handlers then run from the target upwards unless the listener
    /// stopped propagation.
    pub fn dispatch_click(
        &mut self,
        target: NodeId,
        listener: Option<&mut dyn ClickListener>,
    ) -> ClickEvent {
        let ids = self.path(target);
        let mut event = ClickEvent {
            target,
            path: ids.iter().map(|id| self.element(*id).clone()).collect(),
            handled_by: Vec::new(),
            default_prevented: false,
            propagation_stopped: false,
        };

        if let Some(listener) = listener {
            listener.on_click(&mut event);
        }

        for id in ids {
            if event.propagation_stopped {
                break;
            }
            if let Some(handler) = self.nodes[id.0].handler.as_mut() {
                handler(&event);
                event.handled_by.push(id);
            }
        }

        event
    }
}

impl std::fmt::Debug for ElementTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementTree")
            .field("nodes", &self.nodes.len())
            .finish()
    }
}
