//! JSON token tree support.
//!
//! Reads the token tree a marked-style lexer emits as JSON (objects tagged by
//! a `"type"` field) into [`Token`]s. The token types derive `Deserialize`
//! under this feature; types no built-in rule knows become
//! [`Token::Custom`] so that the compiler, not the reader, decides what to do
//! with them.

use serde::de::{Deserialize, Deserializer, Error as _};
use serde_json::Value;

use crate::token::Token;

/// Error type for JSON token reading
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("Invalid token JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JsonError>;

/// Kind tags with a dedicated [`Token`] variant
const BUILT_IN_KINDS: &[&str] = &[
    "space", "hr", "heading", "code", "table", "blockquote", "list", "list_item", "html",
    "paragraph", "text", "escape", "link", "image", "strong", "em", "codespan", "br", "del",
];

/// Parse a JSON token array into tokens.
///
/// # Example
///
/// ```rust
/// use marked_vnode_core::{parse_tokens, Token};
///
/// let tokens = parse_tokens(r#"[{"type": "hr", "raw": "---\n"}]"#).unwrap();
/// assert_eq!(tokens, vec![Token::hr()]);
/// ```
pub fn parse_tokens(json: &str) -> Result<Vec<Token>> {
    Ok(serde_json::from_str(json)?)
}

/// Read an already parsed JSON token array
pub fn tokens_from_value(value: &Value) -> Result<Vec<Token>> {
    Ok(Vec::<Token>::deserialize(value)?)
}

/// Unordered lists carry `"start": ""`
pub(crate) fn list_start<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Start {
        Number(u32),
        Blank(String),
    }

    Ok(match Option::<Start>::deserialize(deserializer)? {
        Some(Start::Number(n)) => n,
        Some(Start::Blank(_)) | None => first_list_item(),
    })
}

pub(crate) fn first_list_item() -> u32 {
    1
}

/// Kind of a [`Token::Custom`]; a built-in kind here means its token was malformed
pub(crate) fn extension_kind<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let kind = String::deserialize(deserializer)?;
    if BUILT_IN_KINDS.contains(&kind.as_str()) {
        return Err(D::Error::custom(format!("malformed \"{kind}\" token")));
    }
    Ok(kind)
}
