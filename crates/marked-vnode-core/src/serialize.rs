//! Render node serialization
//!
//! Writes render node trees out as HTML, for hosts without a virtual DOM.

use crate::node::{AttrValue, Children, NodeKind, RenderNode};

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Serialize a sequence of render nodes to an HTML string
pub fn to_html(nodes: &[RenderNode]) -> String {
    let mut output = String::with_capacity(1024);
    for node in nodes {
        serialize_node(node, &mut output);
    }
    output
}

fn serialize_node(node: &RenderNode, out: &mut String) {
    match &node.kind {
        NodeKind::Fragment => serialize_children(&node.children, out),

        NodeKind::Element(tag) => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in &node.attrs {
                serialize_attr(name, value, out);
            }
            out.push('>');

            // Void elements never carry content
            if is_void(tag) {
                return;
            }

            serialize_children(&node.children, out);
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn serialize_children(children: &Children, out: &mut String) {
    match children {
        Children::Empty => {}
        Children::Text(text) => escape_into(text, out),
        Children::Html(html) => out.push_str(html),
        Children::Nodes(nodes) => {
            for node in nodes {
                serialize_node(node, out);
            }
        }
    }
}

fn serialize_attr(name: &str, value: &AttrValue, out: &mut String) {
    match value {
        AttrValue::Bool(false) => {}
        AttrValue::Bool(true) => {
            out.push(' ');
            out.push_str(name);
        }
        AttrValue::Int(n) => {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&n.to_string());
            out.push('"');
        }
        AttrValue::Str(s) => {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(s, out);
            out.push('"');
        }
    }
}

/// Entity replacing an HTML special character, `None` for any other character
pub fn html_entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match html_entity(c) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
}
