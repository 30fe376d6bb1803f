//! Escaping and URL helpers used by the node builders.

use marked_vnode_core::html_entity;
use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

/// Matches an HTML entity at the start of the input (`&amp;`, `&#39;`, `&#x27;`)
static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^&(#\d{1,7}|#[Xx][a-fA-F0-9]{1,6}|\w+);").unwrap());

/// URL schemes that can execute script when followed
static UNSAFE_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(javascript|vbscript|data):").unwrap());

/// Bytes `encodeURI` escapes. `%` is left alone so existing escapes survive.
const ENCODE_URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#')
    .remove(b'%');

/// Escape HTML special characters.
///
/// With `encode` set every `&` is escaped; otherwise ampersands that already
/// start an entity are left alone so pre-escaped text is not double-escaped.
pub fn escape(text: &str, encode: bool) -> String {
    let mut result = String::with_capacity(text.len());

    for (i, c) in text.char_indices() {
        if c == '&' && !encode && ENTITY.is_match(&text[i..]) {
            result.push('&');
            continue;
        }
        match html_entity(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }

    result
}

/// Clean a link or image URL.
///
/// Percent-encodes characters outside the URI character set and rejects
/// script-capable schemes. `None` means the URL must not be followed.
pub fn sanitize_url(href: &str) -> Option<String> {
    // Browsers drop tabs and newlines anywhere in a URL and leading
    // control characters before the scheme
    let stripped: String = href
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();
    let scheme = stripped.trim_start_matches(|c: char| c <= ' ');
    if UNSAFE_SCHEME.is_match(scheme) {
        return None;
    }

    Some(utf8_percent_encode(href, ENCODE_URI).to_string())
}

/// First whitespace-delimited word of a code block's info string
pub fn code_language(lang: Option<&str>) -> Option<&str> {
    lang.and_then(|lang| lang.split(char::is_whitespace).next())
        .filter(|word| !word.is_empty())
}

/// Strip trailing newlines and end the text with exactly one
pub fn normalize_trailing_newline(text: &str) -> String {
    let mut code = text.trim_end_matches('\n').to_string();
    code.push('\n');
    code
}
