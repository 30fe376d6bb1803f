//! Rich construction rules producing fully styled render nodes.

use std::fmt;

use marked_vnode_core::{
    Blockquote, Br, Code, Codespan, Del, Em, Escape, Heading, Hr, Html, Image, Link, List,
    ListItem, Paragraph, RenderNode, Strong, Table, TableCell, Text,
};

use super::{BlockBuilder, InlineBuilder};
use crate::compiler::TokenCompiler;
use crate::utilities::{code_language, escape, normalize_trailing_newline, sanitize_url};
use crate::Result;

/// URL cleaning function; `None` rejects the URL
pub type SanitizeFn = fn(&str) -> Option<String>;

/// HTML escaping function; the flag requests escaping of every `&`
pub type EscapeFn = fn(&str, bool) -> String;

/// The default builder: one styled node per token.
///
/// URL sanitizing and HTML escaping are delegated to plain functions so a
/// host can plug in its own policy.
#[derive(Clone, Copy)]
pub struct NodeBuilder {
    sanitize_url: SanitizeFn,
    escape: EscapeFn,
    task_checkboxes: bool,
}

impl NodeBuilder {
    /// Create a builder using the crate's escaping and URL cleaning
    pub fn new() -> Self {
        Self {
            sanitize_url,
            escape,
            task_checkboxes: false,
        }
    }

    /// Use a different URL cleaning function
    pub fn with_sanitizer(mut self, sanitize_url: SanitizeFn) -> Self {
        self.sanitize_url = sanitize_url;
        self
    }

    /// Use a different escaping function for code blocks
    pub fn with_escaper(mut self, escape: EscapeFn) -> Self {
        self.escape = escape;
        self
    }

    /// Prepend a [`checkbox`](BlockBuilder::checkbox) to task list items.
    ///
    /// Off by default: items render only their compiled children.
    pub fn with_task_checkboxes(mut self, enabled: bool) -> Self {
        self.task_checkboxes = enabled;
        self
    }
}

impl Default for NodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeBuilder")
            .field("task_checkboxes", &self.task_checkboxes)
            .finish_non_exhaustive()
    }
}

impl InlineBuilder for NodeBuilder {
    fn escape(&self, token: &Escape, _: &TokenCompiler) -> Result<RenderNode> {
        // Rendered exactly like a plain run of text
        Ok(RenderNode::span(&token.text))
    }

    fn html(&self, token: &Html, _: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::element("span").with_html(&token.text))
    }

    fn link(&self, token: &Link, compiler: &TokenCompiler) -> Result<RenderNode> {
        let content = compiler.compile_inline(&token.tokens)?;

        let Some(href) = (self.sanitize_url)(&token.href) else {
            return Ok(RenderNode::element("span").with_children(content));
        };

        let mut node = RenderNode::element("a").with_attr("href", href);
        if let Some(title) = token.title.as_deref().filter(|t| !t.is_empty()) {
            node.set_attr("title", title);
        }
        Ok(node.with_children(content))
    }

    fn image(&self, token: &Image, _: &TokenCompiler) -> Result<RenderNode> {
        // A rejected URL still renders, with the href as written
        let src = (self.sanitize_url)(&token.href).unwrap_or_else(|| token.href.clone());

        let mut node = RenderNode::element("img").with_attr("src", src);
        if let Some(title) = &token.title {
            node.set_attr("title", title.as_str());
        }
        Ok(node.with_attr("alt", token.text.as_str()))
    }

    fn strong(&self, token: &Strong, compiler: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::element("strong")
            .with_attr("class", "font-bold")
            .with_children(compiler.compile_inline(&token.tokens)?))
    }

    fn em(&self, token: &Em, compiler: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::element("em").with_children(compiler.compile_inline(&token.tokens)?))
    }

    fn codespan(&self, token: &Codespan, _: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::element("code").with_text(&token.text))
    }

    fn br(&self, _: &Br, _: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::element("br"))
    }

    fn del(&self, token: &Del, compiler: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::element("del").with_children(compiler.compile_inline(&token.tokens)?))
    }

    fn text(&self, token: &Text, compiler: &TokenCompiler) -> Result<RenderNode> {
        match &token.tokens {
            Some(tokens) => Ok(RenderNode::fragment(compiler.compile_inline(tokens)?)),
            None => Ok(RenderNode::span(&token.text)),
        }
    }
}

impl BlockBuilder for NodeBuilder {
    fn hr(&self, _: &Hr, _: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::element("hr"))
    }

    fn heading(&self, token: &Heading, compiler: &TokenCompiler) -> Result<RenderNode> {
        let tag = format!("h{}", token.depth);
        Ok(RenderNode::element(&tag).with_children(compiler.compile_inline(&token.tokens)?))
    }

    fn code(&self, token: &Code, _: &TokenCompiler) -> Result<RenderNode> {
        let code = normalize_trailing_newline(&token.text);
        let body = if token.escaped {
            code
        } else {
            (self.escape)(&code, true)
        };

        let mut pre = RenderNode::element("pre");
        let mut inner = RenderNode::element("code").with_html(&body);

        if let Some(lang) = code_language(token.lang.as_deref()) {
            let class = format!("code--{}", (self.escape)(lang, true));
            pre.set_attr("class", class.as_str());
            inner.set_attr("class", class);
        }

        Ok(pre.with_children(vec![inner]))
    }

    fn table(&self, token: &Table, compiler: &TokenCompiler) -> Result<RenderNode> {
        let header_cells = token
            .header
            .iter()
            .map(|cell| self.table_cell(cell, true, compiler))
            .collect::<Result<Vec<_>>>()?;
        let thead = RenderNode::element("thead").with_children(vec![self.table_row(header_cells)]);

        let body_rows = token
            .rows
            .iter()
            .map(|row| -> Result<RenderNode> {
                let cells = row
                    .iter()
                    .map(|cell| self.table_cell(cell, false, compiler))
                    .collect::<Result<Vec<_>>>()?;
                Ok(self.table_row(cells))
            })
            .collect::<Result<Vec<_>>>()?;
        let tbody = RenderNode::element("tbody").with_children(body_rows);

        Ok(RenderNode::element("table").with_children(vec![thead, tbody]))
    }

    fn table_row(&self, cells: Vec<RenderNode>) -> RenderNode {
        RenderNode::element("tr").with_children(cells)
    }

    fn table_cell(
        &self,
        cell: &TableCell,
        header: bool,
        compiler: &TokenCompiler,
    ) -> Result<RenderNode> {
        let mut node = RenderNode::element(if header { "th" } else { "td" });
        if let Some(align) = cell.align {
            node.set_attr("align", align.as_str());
        }
        Ok(node.with_children(compiler.compile_inline(&cell.tokens)?))
    }

    fn blockquote(&self, token: &Blockquote, compiler: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::element("blockquote").with_children(compiler.compile_block(&token.tokens)?))
    }

    fn list(&self, token: &List, compiler: &TokenCompiler) -> Result<RenderNode> {
        let items = token
            .items
            .iter()
            .map(|item| self.list_item(item, compiler))
            .collect::<Result<Vec<_>>>()?;

        let mut node = RenderNode::element(if token.ordered { "ol" } else { "ul" });
        if token.ordered && token.start != 1 {
            node.set_attr("start", token.start);
        }
        Ok(node.with_children(items))
    }

    fn list_item(&self, item: &ListItem, compiler: &TokenCompiler) -> Result<RenderNode> {
        let mut children = Vec::with_capacity(item.tokens.len() + 1);
        if item.task && self.task_checkboxes {
            children.push(self.checkbox(item.checked.unwrap_or(false)));
        }
        // Tight items are block-compiled too; only the top-level flag differs
        children.extend(compiler.compile_block_in(&item.tokens, item.loose)?);

        Ok(RenderNode::element("li").with_children(children))
    }

    fn checkbox(&self, checked: bool) -> RenderNode {
        let mut node = RenderNode::element("input")
            .with_attr("type", "checkbox")
            .with_attr("disabled", true);
        if checked {
            node.set_attr("checked", "");
        }
        node
    }

    fn paragraph(&self, token: &Paragraph, compiler: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::element("p").with_children(compiler.compile_inline(&token.tokens)?))
    }
}
