//! End-to-end: marked JSON token trees through the compiler to HTML.

use marked_vnode::{
    to_html, CompileError, CompilerOptions, ExtensionOutput, ExtensionRegistry, NodeBuilder,
    RenderNode, TokenCompiler,
};
use marked_vnode_core::parse_tokens;
use pretty_assertions::assert_eq;

/// Lexer output for:
///
/// ````markdown
/// # Hello *world*
///
/// Some **bold** and [a link](https://example.com "Example").
///
/// - [x] done
/// - todo
///
/// ```js
/// let x = 1 < 2;
/// ```
/// ````
const DOCUMENT: &str = r##"[
  {"type": "heading", "raw": "# Hello *world*\n\n", "depth": 1, "text": "Hello *world*", "tokens": [
    {"type": "text", "raw": "Hello ", "text": "Hello "},
    {"type": "em", "raw": "*world*", "text": "world", "tokens": [
      {"type": "text", "raw": "world", "text": "world"}
    ]}
  ]},
  {"type": "paragraph", "raw": "Some **bold** and [a link](https://example.com \"Example\").", "text": "Some **bold** and [a link](https://example.com \"Example\").", "tokens": [
    {"type": "text", "raw": "Some ", "text": "Some "},
    {"type": "strong", "raw": "**bold**", "text": "bold", "tokens": [
      {"type": "text", "raw": "bold", "text": "bold"}
    ]},
    {"type": "text", "raw": " and ", "text": " and "},
    {"type": "link", "raw": "[a link](https://example.com \"Example\")", "href": "https://example.com", "title": "Example", "text": "a link", "tokens": [
      {"type": "text", "raw": "a link", "text": "a link"}
    ]},
    {"type": "text", "raw": ".", "text": "."}
  ]},
  {"type": "space", "raw": "\n\n"},
  {"type": "list", "raw": "- [x] done\n- todo\n\n", "ordered": false, "start": "", "loose": false, "items": [
    {"type": "list_item", "raw": "- [x] done\n", "task": true, "checked": true, "loose": false, "text": "done", "tokens": [
      {"type": "text", "raw": "done", "text": "done", "tokens": [
        {"type": "text", "raw": "done", "text": "done"}
      ]}
    ]},
    {"type": "list_item", "raw": "- todo\n\n", "task": false, "loose": false, "text": "todo", "tokens": [
      {"type": "text", "raw": "todo", "text": "todo", "tokens": [
        {"type": "text", "raw": "todo", "text": "todo"}
      ]}
    ]}
  ]},
  {"type": "code", "raw": "```js\nlet x = 1 < 2;\n```", "lang": "js", "text": "let x = 1 < 2;"}
]"##;

#[test]
fn test_document_to_html() {
    let tokens = parse_tokens(DOCUMENT).unwrap();
    let nodes = TokenCompiler::new().compile_block(&tokens).unwrap();

    assert_eq!(nodes.len(), 4);
    assert_eq!(
        to_html(&nodes),
        concat!(
            "<h1><span>Hello </span><em><span>world</span></em></h1>",
            "<p><span>Some </span><strong class=\"font-bold\"><span>bold</span></strong>",
            "<span> and </span><a href=\"https://example.com\" title=\"Example\"><span>a link</span></a>",
            "<span>.</span></p>",
            "<ul><li><span>done</span></li>",
            "<li><span>todo</span></li></ul>",
            "<pre class=\"code--js\"><code class=\"code--js\">let x = 1 &lt; 2;\n</code></pre>",
        )
    );
}

#[test]
fn test_table_to_html() {
    let json = r#"[{
      "type": "table", "raw": "| a | b |\n|:-|-:|\n| 1 | 2 |\n",
      "align": ["left", "right"],
      "header": [
        {"text": "a", "tokens": [{"type": "text", "raw": "a", "text": "a"}], "header": true, "align": "left"},
        {"text": "b", "tokens": [{"type": "text", "raw": "b", "text": "b"}], "header": true, "align": "right"}
      ],
      "rows": [[
        {"text": "1", "tokens": [{"type": "text", "raw": "1", "text": "1"}], "header": false, "align": "left"},
        {"text": "2", "tokens": [{"type": "text", "raw": "2", "text": "2"}], "header": false, "align": "right"}
      ]]
    }]"#;
    let tokens = parse_tokens(json).unwrap();
    let nodes = TokenCompiler::new().compile_block(&tokens).unwrap();

    assert_eq!(
        to_html(&nodes),
        concat!(
            "<table><thead><tr><th align=\"left\"><span>a</span></th>",
            "<th align=\"right\"><span>b</span></th></tr></thead>",
            "<tbody><tr><td align=\"left\"><span>1</span></td>",
            "<td align=\"right\"><span>2</span></td></tr></tbody></table>",
        )
    );
}

#[test]
fn test_unknown_json_type_needs_extension() {
    let json = r#"[{"type": "callout", "raw": "!!! note", "text": "note"}]"#;
    let tokens = parse_tokens(json).unwrap();

    let err = TokenCompiler::new().compile_block(&tokens).unwrap_err();
    assert!(matches!(err, CompileError::UnknownToken { .. }));

    let extensions = ExtensionRegistry::new().with("callout", |token, _| {
        let node = RenderNode::element("aside").with_text(token.raw());
        Ok(ExtensionOutput::Node(node))
    });
    let nodes = marked_vnode::compile(&tokens, CompilerOptions::default().with_extensions(extensions))
        .unwrap();
    assert_eq!(to_html(&nodes), "<aside>!!! note</aside>");
}

#[test]
fn test_inline_tokens_from_json() {
    let json = r#"[
      {"type": "codespan", "raw": "`a<b`", "text": "a&lt;b"},
      {"type": "br", "raw": "  \n"},
      {"type": "del", "raw": "~~x~~", "text": "x", "tokens": [{"type": "text", "raw": "x", "text": "x"}]}
    ]"#;
    let tokens = parse_tokens(json).unwrap();
    let nodes = marked_vnode::compile_inline(&tokens, CompilerOptions::default()).unwrap();

    assert_eq!(to_html(&nodes), "<code>a&amp;lt;b</code><br><del><span>x</span></del>");
}

#[test]
fn test_task_checkboxes_are_opt_in() {
    let tokens = parse_tokens(DOCUMENT).unwrap();
    let builder = NodeBuilder::new().with_task_checkboxes(true);
    let nodes = TokenCompiler::with_builder(CompilerOptions::default(), builder)
        .compile_block(&tokens[3..4])
        .unwrap();

    assert_eq!(
        to_html(&nodes),
        "<ul><li><input type=\"checkbox\" disabled checked=\"\"><span>done</span></li>\
         <li><span>todo</span></li></ul>"
    );
}
