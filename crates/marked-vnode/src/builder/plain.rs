//! Text-only inline rules.

use marked_vnode_core::{
    Br, Codespan, Del, Em, Escape, Html, Image, Link, RenderNode, Strong, Text,
};

use super::InlineBuilder;
use crate::compiler::TokenCompiler;
use crate::Result;

/// Inline rules that keep only each token's own text.
///
/// Used where a context needs bare text (alt text, accessible labels). Child
/// tokens are never compiled: their text is already flattened onto the token.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainNodeBuilder;

impl PlainNodeBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl InlineBuilder for PlainNodeBuilder {
    fn escape(&self, token: &Escape, _: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::span(&token.text))
    }

    fn html(&self, token: &Html, _: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::span(&token.text))
    }

    fn link(&self, token: &Link, _: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::span(&token.text))
    }

    fn image(&self, token: &Image, _: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::span(&token.text))
    }

    fn strong(&self, token: &Strong, _: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::span(&token.text))
    }

    fn em(&self, token: &Em, _: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::span(&token.text))
    }

    fn codespan(&self, token: &Codespan, _: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::span(&token.text))
    }

    fn br(&self, _: &Br, _: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::span(""))
    }

    fn del(&self, token: &Del, _: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::span(&token.text))
    }

    fn text(&self, token: &Text, _: &TokenCompiler) -> Result<RenderNode> {
        Ok(RenderNode::span(&token.text))
    }
}
