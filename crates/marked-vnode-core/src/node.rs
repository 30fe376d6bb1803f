//! Render node tree handed to the host UI layer.
//!
//! A [`RenderNode`] describes one UI element independent of any rendering
//! framework: a tag (or a transparent fragment), attributes, and either child
//! nodes or a text/HTML payload. Each node is owned by its parent.

use indexmap::IndexMap;

/// Element kind of a render node
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "type", content = "tag"))]
pub enum NodeKind {
    /// A concrete element such as `p` or `h2`
    Element(String),
    /// A transparent grouping node that renders only its children
    Fragment,
}

/// An attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl AttrValue {
    /// String form of the value, `None` for booleans
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Int(value as i64)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// Content of a render node
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "type", content = "value"))]
pub enum Children {
    #[default]
    Empty,
    /// Literal text; the host escapes it when rendering
    Text(String),
    /// Trusted inner HTML, injected verbatim
    Html(String),
    /// Ordered child nodes
    Nodes(Vec<RenderNode>),
}

/// A generic UI element description
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderNode {
    pub kind: NodeKind,
    pub attrs: IndexMap<String, AttrValue>,
    pub children: Children,
}

impl RenderNode {
    /// Create an element node with no attributes and no content
    pub fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element(tag.to_string()),
            attrs: IndexMap::new(),
            children: Children::Empty,
        }
    }

    /// Create a fragment wrapping `children`
    pub fn fragment(children: Vec<RenderNode>) -> Self {
        Self {
            kind: NodeKind::Fragment,
            attrs: IndexMap::new(),
            children: Children::Nodes(children),
        }
    }

    /// Create a `span` carrying a text payload
    pub fn span(text: &str) -> Self {
        Self::element("span").with_text(text)
    }

    /// Set an attribute, replacing any previous value
    pub fn with_attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set a text payload
    pub fn with_text(mut self, text: &str) -> Self {
        self.children = Children::Text(text.to_string());
        self
    }

    /// Set a trusted inner-HTML payload
    pub fn with_html(mut self, html: &str) -> Self {
        self.children = Children::Html(html.to_string());
        self
    }

    /// Set child nodes
    pub fn with_children(mut self, children: Vec<RenderNode>) -> Self {
        self.children = Children::Nodes(children);
        self
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: impl Into<AttrValue>) {
        self.attrs.insert(name.to_string(), value.into());
    }

    /// Append a child node, converting any text payload away
    pub fn add_child(&mut self, child: RenderNode) {
        match self.children {
            Children::Nodes(ref mut nodes) => nodes.push(child),
            _ => self.children = Children::Nodes(vec![child]),
        }
    }

    /// Tag name, `None` for fragments
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(tag) => Some(tag),
            NodeKind::Fragment => None,
        }
    }

    pub fn is_fragment(&self) -> bool {
        self.kind == NodeKind::Fragment
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Child nodes; empty for text, HTML or empty content
    pub fn child_nodes(&self) -> &[RenderNode] {
        match &self.children {
            Children::Nodes(nodes) => nodes,
            _ => &[],
        }
    }

    /// Text payload, if the node carries one
    pub fn text(&self) -> Option<&str> {
        match &self.children {
            Children::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants
    ///
    /// HTML payloads are included as written.
    pub fn text_content(&self) -> String {
        match &self.children {
            Children::Empty => String::new(),
            Children::Text(text) | Children::Html(text) => text.clone(),
            Children::Nodes(nodes) => nodes.iter().map(RenderNode::text_content).collect(),
        }
    }
}
