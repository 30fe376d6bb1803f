//! Markdown token tree
//!
//! This module defines the tokens produced by an external Markdown lexer.
//! Tokens are read-only input for the compiler: container tokens always hold
//! fully resolved child tokens and nothing downstream mutates them.

/// A token of the pre-parsed Markdown document tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "json",
    derive(serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Token {
    /// Blank lines between blocks
    Space(Space),
    /// Thematic break (horizontal rule)
    Hr(Hr),
    /// Heading with depth (1-6) and inline children
    Heading(Heading),
    /// Fenced or indented code block
    Code(Code),
    /// Table with a header row and body rows
    Table(Table),
    /// Block quote containing nested blocks
    Blockquote(Blockquote),
    /// List (ordered or unordered)
    List(List),
    /// A single list item
    ListItem(ListItem),
    /// Raw HTML, block or inline
    Html(Html),
    /// Paragraph containing inline children
    Paragraph(Paragraph),
    /// Plain text, block or inline
    Text(Text),
    /// Backslash-escaped character
    Escape(Escape),
    /// Link with inline children
    Link(Link),
    /// Image
    Image(Image),
    /// Strong emphasis (bold)
    Strong(Strong),
    /// Emphasis (italic)
    Em(Em),
    /// Inline code
    Codespan(Codespan),
    /// Hard line break
    Br(Br),
    /// Strikethrough
    Del(Del),
    /// A kind produced by a lexer extension
    #[cfg_attr(feature = "json", serde(untagged))]
    Custom(CustomToken),
}

impl Token {
    /// The lexer's kind tag for this token
    pub fn kind(&self) -> &str {
        match self {
            Token::Space(_) => "space",
            Token::Hr(_) => "hr",
            Token::Heading(_) => "heading",
            Token::Code(_) => "code",
            Token::Table(_) => "table",
            Token::Blockquote(_) => "blockquote",
            Token::List(_) => "list",
            Token::ListItem(_) => "list_item",
            Token::Html(_) => "html",
            Token::Paragraph(_) => "paragraph",
            Token::Text(_) => "text",
            Token::Escape(_) => "escape",
            Token::Link(_) => "link",
            Token::Image(_) => "image",
            Token::Strong(_) => "strong",
            Token::Em(_) => "em",
            Token::Codespan(_) => "codespan",
            Token::Br(_) => "br",
            Token::Del(_) => "del",
            Token::Custom(custom) => &custom.kind,
        }
    }

    /// Raw source text the token was lexed from
    pub fn raw(&self) -> &str {
        match self {
            Token::Space(t) => &t.raw,
            Token::Hr(t) => &t.raw,
            Token::Heading(t) => &t.raw,
            Token::Code(t) => &t.raw,
            Token::Table(t) => &t.raw,
            Token::Blockquote(t) => &t.raw,
            Token::List(t) => &t.raw,
            Token::ListItem(t) => &t.raw,
            Token::Html(t) => &t.raw,
            Token::Paragraph(t) => &t.raw,
            Token::Text(t) => &t.raw,
            Token::Escape(t) => &t.raw,
            Token::Link(t) => &t.raw,
            Token::Image(t) => &t.raw,
            Token::Strong(t) => &t.raw,
            Token::Em(t) => &t.raw,
            Token::Codespan(t) => &t.raw,
            Token::Br(t) => &t.raw,
            Token::Del(t) => &t.raw,
            Token::Custom(t) => &t.raw,
        }
    }

    /// Child tokens, for container kinds
    pub fn children(&self) -> &[Token] {
        match self {
            Token::Heading(t) => &t.tokens,
            Token::Blockquote(t) => &t.tokens,
            Token::ListItem(t) => &t.tokens,
            Token::Paragraph(t) => &t.tokens,
            Token::Text(t) => t.tokens.as_deref().unwrap_or_default(),
            Token::Link(t) => &t.tokens,
            Token::Strong(t) => &t.tokens,
            Token::Em(t) => &t.tokens,
            Token::Del(t) => &t.tokens,
            Token::Custom(t) => &t.tokens,
            _ => &[],
        }
    }

    /// Plain text token without children
    pub fn text(text: &str) -> Self {
        Token::Text(Text {
            raw: text.to_string(),
            text: text.to_string(),
            tokens: None,
            escaped: false,
        })
    }

    /// Paragraph wrapping inline tokens
    pub fn paragraph(tokens: Vec<Token>) -> Self {
        Token::Paragraph(Paragraph {
            text: concat_text(&tokens),
            raw: concat_raw(&tokens),
            tokens,
        })
    }

    /// Heading at `depth` wrapping inline tokens
    pub fn heading(depth: u8, tokens: Vec<Token>) -> Self {
        Token::Heading(Heading {
            raw: format!("{} {}", "#".repeat(depth as usize), concat_raw(&tokens)),
            depth,
            text: concat_text(&tokens),
            tokens,
        })
    }

    /// Strong emphasis wrapping inline tokens
    pub fn strong(tokens: Vec<Token>) -> Self {
        Token::Strong(Strong {
            raw: format!("**{}**", concat_raw(&tokens)),
            text: concat_text(&tokens),
            tokens,
        })
    }

    /// Emphasis wrapping inline tokens
    pub fn em(tokens: Vec<Token>) -> Self {
        Token::Em(Em {
            raw: format!("*{}*", concat_raw(&tokens)),
            text: concat_text(&tokens),
            tokens,
        })
    }

    /// Strikethrough wrapping inline tokens
    pub fn del(tokens: Vec<Token>) -> Self {
        Token::Del(Del {
            raw: format!("~~{}~~", concat_raw(&tokens)),
            text: concat_text(&tokens),
            tokens,
        })
    }

    /// Inline code span
    pub fn codespan(text: &str) -> Self {
        Token::Codespan(Codespan {
            raw: format!("`{text}`"),
            text: text.to_string(),
        })
    }

    /// Link to `href` wrapping inline tokens
    pub fn link(href: &str, title: Option<&str>, tokens: Vec<Token>) -> Self {
        Token::Link(Link {
            raw: format!("[{}]({href})", concat_raw(&tokens)),
            href: href.to_string(),
            title: title.map(str::to_string),
            text: concat_text(&tokens),
            tokens,
        })
    }

    /// Image at `href` with alt text
    pub fn image(href: &str, title: Option<&str>, alt: &str) -> Self {
        Token::Image(Image {
            raw: format!("![{alt}]({href})"),
            href: href.to_string(),
            title: title.map(str::to_string),
            text: alt.to_string(),
        })
    }

    /// Hard line break
    pub fn br() -> Self {
        Token::Br(Br {
            raw: "  \n".to_string(),
        })
    }

    /// Blank space between blocks
    pub fn space() -> Self {
        Token::Space(Space {
            raw: "\n\n".to_string(),
        })
    }

    /// Thematic break
    pub fn hr() -> Self {
        Token::Hr(Hr {
            raw: "---\n".to_string(),
        })
    }

    /// Raw HTML passthrough
    pub fn html(html: &str, block: bool) -> Self {
        Token::Html(Html {
            raw: html.to_string(),
            text: html.to_string(),
            block,
            pre: false,
        })
    }
}

fn concat_text(tokens: &[Token]) -> String {
    tokens.iter().map(plain_text).collect()
}

fn concat_raw(tokens: &[Token]) -> String {
    tokens.iter().map(Token::raw).collect()
}

fn plain_text(token: &Token) -> &str {
    match token {
        Token::Text(t) => &t.text,
        Token::Escape(t) => &t.text,
        Token::Codespan(t) => &t.text,
        Token::Strong(t) => &t.text,
        Token::Em(t) => &t.text,
        Token::Del(t) => &t.text,
        Token::Link(t) => &t.text,
        Token::Image(t) => &t.text,
        Token::Html(t) => &t.text,
        Token::Custom(t) => &t.text,
        _ => "",
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Space {
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Hr {
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Heading {
    pub raw: String,
    /// Heading level; a conformant lexer only produces 1-6
    pub depth: u8,
    pub text: String,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Code {
    pub raw: String,
    pub text: String,
    /// Info string of a fenced block; only its first word is the language
    pub lang: Option<String>,
    /// Text is already HTML-escaped
    pub escaped: bool,
}

/// Column alignment of a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Table {
    pub raw: String,
    /// Per-column alignment as the lexer reports it. Builders read the copy
    /// on each [`TableCell`]; [`Table::aligned`] keeps the two in step.
    pub align: Vec<Option<Align>>,
    pub header: Vec<TableCell>,
    pub rows: Vec<Vec<TableCell>>,
}

impl Table {
    /// Build a table from header cells and body rows of inline tokens
    pub fn new(header: Vec<Vec<Token>>, rows: Vec<Vec<Vec<Token>>>) -> Self {
        let align = vec![None; header.len()];
        Self {
            raw: String::new(),
            align,
            header: header
                .into_iter()
                .map(|tokens| TableCell::new(tokens, true))
                .collect(),
            rows: rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|tokens| TableCell::new(tokens, false))
                        .collect()
                })
                .collect(),
        }
    }

    /// Set column alignments, copying each onto the cells of its column
    pub fn aligned(mut self, align: Vec<Option<Align>>) -> Self {
        let rows = std::iter::once(&mut self.header).chain(self.rows.iter_mut());
        for row in rows {
            for (cell, column) in row.iter_mut().zip(&align) {
                cell.align = *column;
            }
        }
        self.align = align;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct TableCell {
    pub text: String,
    pub tokens: Vec<Token>,
    pub header: bool,
    pub align: Option<Align>,
}

impl TableCell {
    pub fn new(tokens: Vec<Token>, header: bool) -> Self {
        Self {
            text: concat_text(&tokens),
            tokens,
            header,
            align: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Blockquote {
    pub raw: String,
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Blockquote {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            raw: concat_raw(&tokens),
            text: concat_text(&tokens),
            tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct List {
    pub raw: String,
    pub ordered: bool,
    /// First item number; only meaningful for ordered lists
    #[cfg_attr(
        feature = "json",
        serde(
            default = "crate::json::first_list_item",
            deserialize_with = "crate::json::list_start"
        )
    )]
    pub start: u32,
    pub loose: bool,
    pub items: Vec<ListItem>,
}

impl List {
    pub fn new(ordered: bool, start: u32, items: Vec<ListItem>) -> Self {
        Self {
            raw: String::new(),
            ordered,
            start,
            loose: items.iter().any(|item| item.loose),
            items,
        }
    }
}

/// A list item containing blocks
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct ListItem {
    pub raw: String,
    pub text: String,
    /// Item starts with a `[ ]` / `[x]` marker
    pub task: bool,
    pub checked: Option<bool>,
    /// Item is separated from its siblings by blank lines
    pub loose: bool,
    pub tokens: Vec<Token>,
}

impl ListItem {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            raw: concat_raw(&tokens),
            text: String::new(),
            task: false,
            checked: None,
            loose: false,
            tokens,
        }
    }

    pub fn loose(mut self, loose: bool) -> Self {
        self.loose = loose;
        self
    }

    pub fn task(mut self, checked: bool) -> Self {
        self.task = true;
        self.checked = Some(checked);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Html {
    pub raw: String,
    pub text: String,
    pub block: bool,
    pub pre: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Paragraph {
    pub raw: String,
    pub text: String,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Text {
    pub raw: String,
    pub text: String,
    /// Nested inline tokens; `None` for a plain run of text
    pub tokens: Option<Vec<Token>>,
    pub escaped: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Escape {
    pub raw: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Link {
    pub raw: String,
    pub href: String,
    pub title: Option<String>,
    pub text: String,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Image {
    pub raw: String,
    pub href: String,
    pub title: Option<String>,
    /// Alt text
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Strong {
    pub raw: String,
    pub text: String,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Em {
    pub raw: String,
    pub text: String,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Codespan {
    pub raw: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Br {
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize), serde(default))]
pub struct Del {
    pub raw: String,
    pub text: String,
    pub tokens: Vec<Token>,
}

/// A token whose kind only an extension knows how to render
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
pub struct CustomToken {
    #[cfg_attr(
        feature = "json",
        serde(rename = "type", deserialize_with = "crate::json::extension_kind")
    )]
    pub kind: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub raw: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub text: String,
    #[cfg_attr(feature = "json", serde(default))]
    pub tokens: Vec<Token>,
}

impl CustomToken {
    pub fn new(kind: &str, text: &str) -> Self {
        Self {
            kind: kind.to_string(),
            raw: text.to_string(),
            text: text.to_string(),
            tokens: Vec::new(),
        }
    }
}
