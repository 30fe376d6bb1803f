//! marked-vnode-core - Markdown tokens and render nodes
//!
//! This crate provides the data structures shared by the `marked-vnode`
//! compiler and its hosts: the token tree an external Markdown lexer produces,
//! and the generic render node tree the compiler hands to a UI layer.
//!
//! # Architecture
//!
//! ```text
//!                     ┌──────────────┐
//! Lexer tokens ─────▶ │   compiler   │ ──▶ RenderNode tree ──▶ host UI
//! (or JSON, `json`)   └──────────────┘          │
//!                                               └──▶ to_html() ──▶ HTML String
//! ```
//!
//! # Example
//!
//! ```rust
//! use marked_vnode_core::{to_html, RenderNode};
//!
//! let p = RenderNode::element("p").with_children(vec![
//!     RenderNode::span("This is "),
//!     RenderNode::element("strong").with_children(vec![RenderNode::span("bold")]),
//! ]);
//!
//! assert_eq!(
//!     to_html(&[p]),
//!     "<p><span>This is </span><strong><span>bold</span></strong></p>"
//! );
//! ```

#[cfg(feature = "json")]
mod json;
mod node;
mod serialize;
mod token;

#[cfg(feature = "json")]
pub use json::{parse_tokens, tokens_from_value, JsonError};
pub use node::{AttrValue, Children, NodeKind, RenderNode};
pub use serialize::{html_entity, is_void, to_html, VOID_ELEMENTS};
pub use token::{
    Align, Blockquote, Br, Code, Codespan, CustomToken, Del, Em, Escape, Heading, Hr, Html,
    Image, Link, List, ListItem, Paragraph, Space, Strong, Table, TableCell, Text, Token,
};
