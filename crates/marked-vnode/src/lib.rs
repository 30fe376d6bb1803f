//! # marked-vnode
//!
//! Compile Markdown token trees into render nodes.
//!
//! The input is the token tree a Markdown lexer such as
//! [marked](https://github.com/markedjs/marked) produces; the output is a list
//! of [`RenderNode`]s a view layer can mount directly, or serialize with
//! [`to_html`].
//!
//! ## Design
//!
//! - [`TokenCompiler`] walks block and inline token sequences and picks a rule
//!   for each token.
//! - [`NodeBuilder`] holds the rules that turn one token into one node.
//!   [`PlainNodeBuilder`] is a text-only stand-in for inline rules.
//! - [`ExtensionRegistry`] lets callers override the rule for any token kind,
//!   including kinds the built-in rules don't know.
//!
//! ## Example
//!
//! ```rust
//! use marked_vnode::{to_html, Token, TokenCompiler};
//!
//! let compiler = TokenCompiler::new();
//! let tokens = vec![
//!     Token::heading(2, vec![Token::text("Notes")]),
//!     Token::paragraph(vec![Token::strong(vec![Token::text("Hi")])]),
//! ];
//!
//! let nodes = compiler.compile_block(&tokens).unwrap();
//! assert_eq!(
//!     to_html(&nodes),
//!     "<h2><span>Notes</span></h2><p><strong class=\"font-bold\"><span>Hi</span></strong></p>"
//! );
//! ```
//!
//! ## Example (extension)
//!
//! ```rust
//! use marked_vnode::{CompilerOptions, ExtensionRegistry, RenderNode, Token, TokenCompiler};
//!
//! let extensions = ExtensionRegistry::new().with("hr", |_, _| {
//!     Ok(RenderNode::element("hr").with_attr("class", "divider").into())
//! });
//! let compiler = TokenCompiler::with_options(CompilerOptions::default().with_extensions(extensions));
//!
//! let nodes = compiler.compile_block(&[Token::hr()]).unwrap();
//! assert_eq!(nodes[0].attr("class").and_then(|c| c.as_str()), Some("divider"));
//! ```

pub mod builder;
mod compiler;
pub mod extensions;
mod utilities;

pub use builder::{
    BlockBuilder, EscapeFn, InlineBuilder, NodeBuilder, PlainNodeBuilder, SanitizeFn,
};
pub use compiler::{CompilerOptions, Mode, TokenCompiler};
pub use extensions::{
    Extension, ExtensionContext, ExtensionError, ExtensionOutput, ExtensionRegistry, RenderFn,
};
pub use marked_vnode_core::*;
pub use utilities::{escape, sanitize_url};

/// Error type for compile operations
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Token with \"{kind}\" type was not found.")]
    UnknownToken { kind: String },

    #[error("Extension for \"{kind}\" tokens failed: {source}")]
    Extension {
        kind: String,
        source: ExtensionError,
    },
}

pub type Result<T> = std::result::Result<T, CompileError>;

/// Compile top-level block tokens with a one-off compiler
pub fn compile(tokens: &[Token], options: CompilerOptions) -> Result<Vec<RenderNode>> {
    TokenCompiler::with_options(options).compile_block(tokens)
}

/// Compile inline tokens with a one-off compiler
pub fn compile_inline(tokens: &[Token], options: CompilerOptions) -> Result<Vec<RenderNode>> {
    TokenCompiler::with_options(options).compile_inline(tokens)
}
