//! Render node tree handed to the host engine.

use serde::Serialize;
use slotwire_core::{Attributes, ElementRef, NodeRef};

/// A node of composite output.
///
/// Serialized as `{type: "element", tag, ref?, attributes, children}` or
/// `{type: "text", value}` so JavaScript can map component tags onto real
/// Astro components.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// An element or component invocation.
    Element {
        /// Tag or component name.
        tag: ElementRef,
        /// Host ref forwarded from the caller (root only).
        #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
        node_ref: Option<NodeRef>,
        /// Attributes in emission order.
        attributes: Attributes,
        /// Child nodes.
        children: Vec<Node>,
    },
    /// Plain text content.
    Text {
        /// Unescaped text.
        value: String,
    },
}

impl Node {
    /// Creates an empty element.
    pub fn element(tag: impl Into<ElementRef>) -> Self {
        Node::Element {
            tag: tag.into(),
            node_ref: None,
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Creates a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    /// Sets an attribute. No-op on text nodes.
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        if let Node::Element { attributes, .. } = &mut self {
            attributes.set(name, value);
        }
        self
    }

    /// Sets every attribute in `attrs`. No-op on text nodes.
    pub fn attrs(mut self, attrs: &Attributes) -> Self {
        if let Node::Element { attributes, .. } = &mut self {
            attributes.extend(attrs.iter());
        }
        self
    }

    /// Appends a child. No-op on text nodes.
    pub fn child(mut self, node: Node) -> Self {
        if let Node::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    /// Returns the element's attributes.
    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Node::Element { attributes, .. } => Some(attributes),
            Node::Text { .. } => None,
        }
    }

    /// Returns the element's children (empty for text).
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text { .. } => &[],
        }
    }

    /// Depth-first search for the first element with attribute `name` = `value`.
    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<&Node> {
        if self.attributes().and_then(|a| a.get(name)) == Some(value) {
            return Some(self);
        }
        self.children()
            .iter()
            .find_map(|child| child.find_by_attr(name, value))
    }

    /// Concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text { value } => value.clone(),
            Node::Element { children, .. } => children.iter().map(Node::text_content).collect(),
        }
    }
}
