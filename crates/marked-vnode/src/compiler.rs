//! TokenCompiler - the main entry point for token to render node compilation.

use std::fmt;

use marked_vnode_core::{RenderNode, Token};

use crate::builder::{BlockBuilder, InlineBuilder, NodeBuilder, PlainNodeBuilder};
use crate::extensions::{ExtensionContext, ExtensionOutput, ExtensionRegistry};
use crate::{CompileError, Result};

/// Traversal a token is compiled in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Block-level traversal; `top` is false inside tight list items
    Block { top: bool },
    /// Inline-level traversal
    Inline,
}

/// Options for TokenCompiler
#[derive(Debug, Clone, Default)]
pub struct CompilerOptions {
    /// Per-kind rendering overrides, checked before the built-in rules
    pub extensions: ExtensionRegistry,

    /// Render unknown tokens as error nodes instead of failing the call
    pub silent: bool,
}

impl CompilerOptions {
    pub fn with_extensions(mut self, extensions: ExtensionRegistry) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}

/// Compiles block and inline token sequences into render nodes
pub struct TokenCompiler {
    options: CompilerOptions,
    builder: Box<dyn BlockBuilder + Send + Sync>,
    plain: PlainNodeBuilder,
}

impl TokenCompiler {
    /// Create a compiler with default options and the default builder
    pub fn new() -> Self {
        Self::with_options(CompilerOptions::default())
    }

    /// Create a compiler with custom options
    pub fn with_options(options: CompilerOptions) -> Self {
        Self::with_builder(options, NodeBuilder::new())
    }

    /// Create a compiler with a custom primary builder
    pub fn with_builder<B>(options: CompilerOptions, builder: B) -> Self
    where
        B: BlockBuilder + Send + Sync + 'static,
    {
        Self {
            options,
            builder: Box::new(builder),
            plain: PlainNodeBuilder,
        }
    }

    /// Get the current options
    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// The text-only builder, for [`compile_inline_with`](Self::compile_inline_with)
    pub fn plain_builder(&self) -> &PlainNodeBuilder {
        &self.plain
    }

    /// Compile top-level block tokens
    pub fn compile_block(&self, tokens: &[Token]) -> Result<Vec<RenderNode>> {
        self.compile_block_in(tokens, true)
    }

    /// Compile block tokens with an explicit top-level flag.
    ///
    /// List items pass their `loose` flag here; the flag reaches extensions
    /// through [`Mode::Block`].
    pub fn compile_block_in(&self, tokens: &[Token], top: bool) -> Result<Vec<RenderNode>> {
        let mode = Mode::Block { top };
        let builder = &*self.builder;
        let mut out = Vec::with_capacity(tokens.len());

        for token in tokens {
            if let Some(nodes) = self.run_extension(token, mode)? {
                out.extend(nodes);
                continue;
            }

            let node = match token {
                // Spacing between blocks is the host's concern
                Token::Space(_) => continue,
                Token::Hr(t) => builder.hr(t, self)?,
                Token::Heading(t) => builder.heading(t, self)?,
                Token::Code(t) => builder.code(t, self)?,
                Token::Table(t) => builder.table(t, self)?,
                Token::Blockquote(t) => builder.blockquote(t, self)?,
                Token::List(t) => builder.list(t, self)?,
                Token::ListItem(t) => builder.list_item(t, self)?,
                Token::Html(t) => builder.html(t, self)?,
                Token::Paragraph(t) => builder.paragraph(t, self)?,
                Token::Text(t) => builder.text(t, self)?,
                other => self.unknown_token(other.kind(), mode)?,
            };
            out.push(node);
        }

        Ok(out)
    }

    /// Compile inline tokens with the primary builder
    pub fn compile_inline(&self, tokens: &[Token]) -> Result<Vec<RenderNode>> {
        self.compile_inline_with(tokens, &*self.builder)
    }

    /// Compile inline tokens with an explicit builder.
    ///
    /// The override covers this level only. Rules that recurse into children
    /// call [`compile_inline`](Self::compile_inline), which always uses the
    /// primary builder; a builder that wants its own rules for nested tokens
    /// recurses with `compile_inline_with` itself.
    pub fn compile_inline_with<B>(&self, tokens: &[Token], builder: &B) -> Result<Vec<RenderNode>>
    where
        B: InlineBuilder + ?Sized,
    {
        let mode = Mode::Inline;
        let mut out = Vec::with_capacity(tokens.len());

        for token in tokens {
            if let Some(nodes) = self.run_extension(token, mode)? {
                out.extend(nodes);
                continue;
            }

            let node = match token {
                Token::Escape(t) => builder.escape(t, self)?,
                Token::Html(t) => builder.html(t, self)?,
                Token::Link(t) => builder.link(t, self)?,
                Token::Image(t) => builder.image(t, self)?,
                Token::Strong(t) => builder.strong(t, self)?,
                Token::Em(t) => builder.em(t, self)?,
                Token::Codespan(t) => builder.codespan(t, self)?,
                Token::Br(t) => builder.br(t, self)?,
                Token::Del(t) => builder.del(t, self)?,
                Token::Text(t) => builder.text(t, self)?,
                other => self.unknown_token(other.kind(), mode)?,
            };
            out.push(node);
        }

        Ok(out)
    }

    /// Text of inline tokens with all formatting dropped, e.g. for alt text
    pub fn plain_text(&self, tokens: &[Token]) -> Result<String> {
        let nodes = self.compile_inline_with(tokens, &self.plain)?;
        Ok(nodes.iter().map(RenderNode::text_content).collect())
    }

    /// Run the extension registered for the token's kind.
    ///
    /// `None` means no extension handled the token and the built-in rule
    /// applies.
    fn run_extension(&self, token: &Token, mode: Mode) -> Result<Option<Vec<RenderNode>>> {
        let kind = token.kind();
        let Some(extension) = self.options.extensions.get(kind) else {
            return Ok(None);
        };

        let context = ExtensionContext {
            compiler: self,
            mode,
        };
        let output = extension
            .render(token, &context)
            .map_err(|source| CompileError::Extension {
                kind: kind.to_string(),
                source,
            })?;

        let nodes = match output {
            ExtensionOutput::Defer => {
                log::trace!("extension for {kind:?} deferred to the built-in rule");
                return Ok(None);
            }
            ExtensionOutput::Suppress => Vec::new(),
            ExtensionOutput::Node(node) => vec![node],
            ExtensionOutput::Nodes(nodes) => nodes,
            ExtensionOutput::Text(text) => vec![RenderNode::span(&text)],
        };
        Ok(Some(nodes))
    }

    /// Fail, or in silent mode render a visible error node
    fn unknown_token(&self, kind: &str, mode: Mode) -> Result<RenderNode> {
        let err = CompileError::UnknownToken {
            kind: kind.to_string(),
        };
        if !self.options.silent {
            return Err(err);
        }

        let message = err.to_string();
        log::error!("{message}");
        let tag = match mode {
            Mode::Block { .. } => "div",
            Mode::Inline => "span",
        };
        Ok(RenderNode::element(tag)
            .with_attr("class", "error")
            .with_text(&message))
    }
}

impl Default for TokenCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TokenCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCompiler")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marked_vnode_core::{to_html, CustomToken, List, ListItem};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    fn custom(kind: &str) -> Token {
        Token::Custom(CustomToken::new(kind, "?"))
    }

    fn document() -> Vec<Token> {
        vec![
            Token::heading(1, vec![Token::text("Title")]),
            Token::space(),
            Token::paragraph(vec![
                Token::text("Hello "),
                Token::strong(vec![Token::text("World")]),
            ]),
            Token::hr(),
        ]
    }

    #[test]
    fn test_one_node_per_token_in_order() {
        let compiler = TokenCompiler::new();
        let nodes = compiler.compile_block(&document()).unwrap();
        let tags: Vec<_> = nodes.iter().map(|n| n.tag()).collect();
        assert_eq!(tags, vec![Some("h1"), Some("p"), Some("hr")]);
    }

    #[test]
    fn test_unknown_kind_fails_without_output() {
        let compiler = TokenCompiler::new();
        let mut tokens = document();
        tokens.insert(1, custom("foo"));

        let err = compiler.compile_block(&tokens).unwrap_err();
        assert!(matches!(err, CompileError::UnknownToken { ref kind } if kind == "foo"));
        assert_eq!(err.to_string(), "Token with \"foo\" type was not found.");
    }

    #[test]
    fn test_unknown_kind_silent_renders_error_node() {
        let compiler = TokenCompiler::with_options(CompilerOptions::default().silent(true));
        let tokens = vec![custom("foo"), Token::paragraph(vec![Token::text("after")])];

        let nodes = compiler.compile_block(&tokens).unwrap();
        assert_eq!(
            to_html(&nodes),
            "<div class=\"error\">Token with &quot;foo&quot; type was not found.</div>\
             <p><span>after</span></p>"
        );
        assert_eq!(nodes[0].text(), Some("Token with \"foo\" type was not found."));
    }

    #[test]
    fn test_unknown_inline_kind_silent_uses_span() {
        let compiler = TokenCompiler::with_options(CompilerOptions::default().silent(true));
        let nodes = compiler
            .compile_inline(&[Token::text("a"), custom("bar")])
            .unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].tag(), Some("span"));
        assert_eq!(nodes[1].attr("class").and_then(|c| c.as_str()), Some("error"));
    }

    #[test]
    fn test_block_kind_in_inline_context_is_unknown() {
        let compiler = TokenCompiler::new();
        let err = compiler.compile_inline(&[Token::hr()]).unwrap_err();
        assert_eq!(err.to_string(), "Token with \"hr\" type was not found.");

        let err = compiler.compile_block(&[Token::br()]).unwrap_err();
        assert_eq!(err.to_string(), "Token with \"br\" type was not found.");
    }

    #[test]
    fn test_nested_unknown_kind_fails_whole_call() {
        let compiler = TokenCompiler::new();
        let tokens = vec![Token::paragraph(vec![Token::text("a"), custom("foo")])];
        assert!(compiler.compile_block(&tokens).is_err());
    }

    #[test]
    fn test_extension_replaces_builtin_rule() {
        let extensions = ExtensionRegistry::new().with("strong", |token, _| {
            Ok(RenderNode::element("b").with_text(token.raw()).into())
        });
        let compiler = TokenCompiler::with_options(CompilerOptions::default().with_extensions(extensions));

        let nodes = compiler
            .compile_inline(&[Token::strong(vec![Token::text("x")])])
            .unwrap();
        assert_eq!(nodes, vec![RenderNode::element("b").with_text("**x**")]);
    }

    #[test]
    fn test_extension_defer_falls_through() {
        let extensions = ExtensionRegistry::new().with("hr", |_, _| Ok(ExtensionOutput::Defer));
        let compiler = TokenCompiler::with_options(CompilerOptions::default().with_extensions(extensions));

        let nodes = compiler.compile_block(&[Token::hr()]).unwrap();
        assert_eq!(nodes, vec![RenderNode::element("hr")]);
    }

    #[test]
    fn test_extension_suppress_emits_nothing() {
        let extensions =
            ExtensionRegistry::new().with("hr", |_, _| Ok(ExtensionOutput::Suppress));
        let compiler = TokenCompiler::with_options(CompilerOptions::default().with_extensions(extensions));

        let nodes = compiler.compile_block(&[Token::hr(), Token::hr()]).unwrap();
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_extension_nodes_are_flattened() {
        let extensions = ExtensionRegistry::new().with("callout", |_, _| {
            Ok(vec![RenderNode::element("hr"), RenderNode::element("hr")].into())
        });
        let compiler = TokenCompiler::with_options(CompilerOptions::default().with_extensions(extensions));

        let nodes = compiler
            .compile_block(&[custom("callout"), Token::hr()])
            .unwrap();
        assert_eq!(nodes.len(), 3);
    }

    #[test]
    fn test_extension_text_is_wrapped() {
        let extensions = ExtensionRegistry::new().with("mention", |token, _| {
            let Token::Custom(mention) = token else {
                return Ok(ExtensionOutput::Defer);
            };
            Ok(format!("@{}", mention.text).into())
        });
        let compiler = TokenCompiler::with_options(CompilerOptions::default().with_extensions(extensions));

        let nodes = compiler
            .compile_inline(&[Token::Custom(CustomToken::new("mention", "bob"))])
            .unwrap();
        assert_eq!(nodes, vec![RenderNode::span("@bob")]);
    }

    #[test]
    fn test_extension_can_recurse() {
        let extensions = ExtensionRegistry::new().with("callout", |token, cx| {
            let children = cx.compile_block(token.children())?;
            Ok(RenderNode::element("aside").with_children(children).into())
        });
        let compiler = TokenCompiler::with_options(CompilerOptions::default().with_extensions(extensions));

        let mut callout = CustomToken::new("callout", "");
        callout.tokens = vec![Token::paragraph(vec![Token::text("note")])];
        let nodes = compiler.compile_block(&[Token::Custom(callout)]).unwrap();
        assert_eq!(to_html(&nodes), "<aside><p><span>note</span></p></aside>");
    }

    #[test]
    fn test_extension_error_is_fatal_even_when_silent() {
        let extensions = ExtensionRegistry::new().with("hr", |_, _| Err("boom".into()));
        let options = CompilerOptions::default()
            .with_extensions(extensions)
            .silent(true);
        let compiler = TokenCompiler::with_options(options);

        let err = compiler.compile_block(&[Token::hr()]).unwrap_err();
        assert!(matches!(err, CompileError::Extension { ref kind, .. } if kind == "hr"));
        assert_eq!(err.to_string(), "Extension for \"hr\" tokens failed: boom");
    }

    #[test]
    fn test_list_item_loose_flag_reaches_extensions() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = Arc::clone(&seen);
        let extensions = ExtensionRegistry::new().with("text", move |_, cx| {
            record.lock().unwrap().push(cx.mode);
            Ok(ExtensionOutput::Defer)
        });
        let compiler = TokenCompiler::with_options(CompilerOptions::default().with_extensions(extensions));

        let list = List::new(
            false,
            1,
            vec![
                ListItem::new(vec![Token::text("tight")]),
                ListItem::new(vec![Token::text("loose")]).loose(true),
            ],
        );
        let nodes = compiler.compile_block(&[Token::List(list)]).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![Mode::Block { top: false }, Mode::Block { top: true }]
        );
        // Tight items still block-compile their children
        assert_eq!(
            to_html(&nodes),
            "<ul><li><span>tight</span></li><li><span>loose</span></li></ul>"
        );
    }

    /// Upper-cases text runs; everything else is the default rule
    struct Shouting;

    impl InlineBuilder for Shouting {
        fn escape(&self, t: &marked_vnode_core::Escape, c: &TokenCompiler) -> Result<RenderNode> {
            NodeBuilder::new().escape(t, c)
        }
        fn html(&self, t: &marked_vnode_core::Html, c: &TokenCompiler) -> Result<RenderNode> {
            NodeBuilder::new().html(t, c)
        }
        fn link(&self, t: &marked_vnode_core::Link, c: &TokenCompiler) -> Result<RenderNode> {
            NodeBuilder::new().link(t, c)
        }
        fn image(&self, t: &marked_vnode_core::Image, c: &TokenCompiler) -> Result<RenderNode> {
            NodeBuilder::new().image(t, c)
        }
        fn strong(&self, t: &marked_vnode_core::Strong, c: &TokenCompiler) -> Result<RenderNode> {
            NodeBuilder::new().strong(t, c)
        }
        fn em(&self, t: &marked_vnode_core::Em, c: &TokenCompiler) -> Result<RenderNode> {
            NodeBuilder::new().em(t, c)
        }
        fn codespan(&self, t: &marked_vnode_core::Codespan, c: &TokenCompiler) -> Result<RenderNode> {
            NodeBuilder::new().codespan(t, c)
        }
        fn br(&self, t: &marked_vnode_core::Br, c: &TokenCompiler) -> Result<RenderNode> {
            NodeBuilder::new().br(t, c)
        }
        fn del(&self, t: &marked_vnode_core::Del, c: &TokenCompiler) -> Result<RenderNode> {
            NodeBuilder::new().del(t, c)
        }
        fn text(&self, t: &marked_vnode_core::Text, _: &TokenCompiler) -> Result<RenderNode> {
            Ok(RenderNode::span(&t.text.to_uppercase()))
        }
    }

    #[test]
    fn test_explicit_builder_covers_one_level() {
        let compiler = TokenCompiler::new();
        let tokens = vec![
            Token::text("top "),
            Token::strong(vec![Token::text("nested")]),
        ];

        let nodes = compiler.compile_inline_with(&tokens, &Shouting).unwrap();
        assert_eq!(
            to_html(&nodes),
            "<span>TOP </span><strong class=\"font-bold\"><span>nested</span></strong>"
        );
    }

    #[test]
    fn test_plain_text() {
        let compiler = TokenCompiler::new();
        let tokens = vec![
            Token::text("Read "),
            Token::link("https://example.com", None, vec![Token::strong(vec![Token::text("the docs")])]),
            Token::br(),
            Token::codespan("now"),
        ];
        assert_eq!(compiler.plain_text(&tokens).unwrap(), "Read the docsnow");
    }

    #[test]
    fn test_compilers_run_on_threads() {
        let compiler = Arc::new(TokenCompiler::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let compiler = Arc::clone(&compiler);
                std::thread::spawn(move || compiler.compile_block(&document()).unwrap().len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 3);
        }
    }
}
