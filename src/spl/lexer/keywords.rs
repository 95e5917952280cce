//! Keyword tables
//!
//! Words are scanned as generic identifiers and classified here afterwards.
//! Both tables are read-only for the lifetime of the process.

use super::tokens::{TokenKind, TokenValue};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Structural keywords, matched exactly
pub static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    [
        ("ROLE", TokenKind::Role),
        ("USER", TokenKind::User),
        ("RESOURCE", TokenKind::Resource),
        ("ALLOW", TokenKind::Allow),
        ("DENY", TokenKind::Deny),
        ("IF", TokenKind::If),
        ("ON", TokenKind::On),
        ("AND", TokenKind::And),
        ("OR", TokenKind::Or),
    ]
    .into_iter()
    .collect()
});

/// Attribute keywords, keyed by their upper-case spelling and matched case-insensitively
pub static ATTRIBUTE_KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    [
        ("CAN", TokenKind::Can),
        ("PATH", TokenKind::Path),
        ("ACTION", TokenKind::Action),
    ]
    .into_iter()
    .collect()
});

/// Classify a scanned word as keyword, attribute keyword or identifier.
pub fn classify_word(word: &str) -> (TokenKind, TokenValue) {
    if let Some(kind) = KEYWORDS.get(word) {
        return (*kind, TokenValue::Text(word.to_string()));
    }

    let upper = word.to_ascii_uppercase();
    if let Some(kind) = ATTRIBUTE_KEYWORDS.get(upper.as_str()) {
        return (*kind, TokenValue::Text(upper));
    }

    (TokenKind::Identifier, TokenValue::Text(word.to_string()))
}
