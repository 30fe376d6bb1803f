//! Extension callbacks and their outcomes.

use std::fmt;
use std::sync::Arc;

use marked_vnode_core::{RenderNode, Token};

use crate::compiler::{Mode, TokenCompiler};
use crate::Result;

/// Error an extension callback may raise
pub type ExtensionError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for extension render functions
pub type RenderFn = Arc<
    dyn Fn(&Token, &ExtensionContext<'_>) -> std::result::Result<ExtensionOutput, ExtensionError>
        + Send
        + Sync,
>;

/// What an extension produced for a token
#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionOutput {
    /// Not handled here; fall through to the built-in rule
    Defer,
    /// Handled, but nothing to emit
    Suppress,
    /// Replace the built-in rule with one node
    Node(RenderNode),
    /// Replace the built-in rule with several nodes, appended in order
    Nodes(Vec<RenderNode>),
    /// Replace the built-in rule with plain text, wrapped in a `span`
    Text(String),
}

impl From<RenderNode> for ExtensionOutput {
    fn from(node: RenderNode) -> Self {
        ExtensionOutput::Node(node)
    }
}

impl From<Vec<RenderNode>> for ExtensionOutput {
    fn from(nodes: Vec<RenderNode>) -> Self {
        ExtensionOutput::Nodes(nodes)
    }
}

impl From<String> for ExtensionOutput {
    fn from(text: String) -> Self {
        ExtensionOutput::Text(text)
    }
}

impl From<&str> for ExtensionOutput {
    fn from(text: &str) -> Self {
        ExtensionOutput::Text(text.to_string())
    }
}

/// What an extension callback can see besides the token
pub struct ExtensionContext<'a> {
    /// The compiler running the traversal, for recursing into children
    pub compiler: &'a TokenCompiler,
    /// Traversal the token was met in
    pub mode: Mode,
}

impl ExtensionContext<'_> {
    /// Block-compile child tokens, keeping the current top-level flag
    pub fn compile_block(&self, tokens: &[Token]) -> Result<Vec<RenderNode>> {
        let top = match self.mode {
            Mode::Block { top } => top,
            Mode::Inline => true,
        };
        self.compiler.compile_block_in(tokens, top)
    }

    /// Inline-compile child tokens with the primary builder
    pub fn compile_inline(&self, tokens: &[Token]) -> Result<Vec<RenderNode>> {
        self.compiler.compile_inline(tokens)
    }
}

/// A rendering override for one token kind
#[derive(Clone)]
pub struct Extension {
    render: RenderFn,
}

impl Extension {
    /// Create a new extension
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&Token, &ExtensionContext<'_>) -> std::result::Result<ExtensionOutput, ExtensionError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            render: Arc::new(render),
        }
    }

    /// Apply this extension to a token
    pub fn render(
        &self,
        token: &Token,
        context: &ExtensionContext<'_>,
    ) -> std::result::Result<ExtensionOutput, ExtensionError> {
        (self.render)(token, context)
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension").finish_non_exhaustive()
    }
}
