//! Node construction rules, one per token kind.
//!
//! [`TokenCompiler`] decides which rule applies to a token; a builder only
//! knows how to turn that one token into one render node, calling back into
//! the compiler to recurse into children.
//!
//! Inline rules live in [`InlineBuilder`] so that a text-only builder can stand
//! in for them; block rules extend it in [`BlockBuilder`].

mod node;
mod plain;

pub use node::{EscapeFn, NodeBuilder, SanitizeFn};
pub use plain::PlainNodeBuilder;

use marked_vnode_core::{
    Blockquote, Br, Code, Codespan, Del, Em, Escape, Heading, Hr, Html, Image, Link, List,
    ListItem, Paragraph, RenderNode, Strong, Table, TableCell, Text,
};

use crate::compiler::TokenCompiler;
use crate::Result;

/// Construction rules for inline tokens
pub trait InlineBuilder {
    fn escape(&self, token: &Escape, compiler: &TokenCompiler) -> Result<RenderNode>;

    /// Raw HTML, block or inline
    fn html(&self, token: &Html, compiler: &TokenCompiler) -> Result<RenderNode>;

    fn link(&self, token: &Link, compiler: &TokenCompiler) -> Result<RenderNode>;

    fn image(&self, token: &Image, compiler: &TokenCompiler) -> Result<RenderNode>;

    fn strong(&self, token: &Strong, compiler: &TokenCompiler) -> Result<RenderNode>;

    fn em(&self, token: &Em, compiler: &TokenCompiler) -> Result<RenderNode>;

    fn codespan(&self, token: &Codespan, compiler: &TokenCompiler) -> Result<RenderNode>;

    fn br(&self, token: &Br, compiler: &TokenCompiler) -> Result<RenderNode>;

    fn del(&self, token: &Del, compiler: &TokenCompiler) -> Result<RenderNode>;

    /// Plain text, block or inline
    fn text(&self, token: &Text, compiler: &TokenCompiler) -> Result<RenderNode>;
}

/// Construction rules for block tokens
pub trait BlockBuilder: InlineBuilder {
    fn hr(&self, token: &Hr, compiler: &TokenCompiler) -> Result<RenderNode>;

    fn heading(&self, token: &Heading, compiler: &TokenCompiler) -> Result<RenderNode>;

    fn code(&self, token: &Code, compiler: &TokenCompiler) -> Result<RenderNode>;

    fn table(&self, token: &Table, compiler: &TokenCompiler) -> Result<RenderNode>;

    /// Wrap already built cells in a row
    fn table_row(&self, cells: Vec<RenderNode>) -> RenderNode;

    fn table_cell(
        &self,
        cell: &TableCell,
        header: bool,
        compiler: &TokenCompiler,
    ) -> Result<RenderNode>;

    fn blockquote(&self, token: &Blockquote, compiler: &TokenCompiler) -> Result<RenderNode>;

    fn list(&self, token: &List, compiler: &TokenCompiler) -> Result<RenderNode>;

    fn list_item(&self, item: &ListItem, compiler: &TokenCompiler) -> Result<RenderNode>;

    /// Marker for task list items
    fn checkbox(&self, checked: bool) -> RenderNode;

    fn paragraph(&self, token: &Paragraph, compiler: &TokenCompiler) -> Result<RenderNode>;
}
