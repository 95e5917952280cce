//! Lexer module for SPL
//!
//! Tokenization is split in two passes over the same input:
//!
//! - a vanilla logos scanner ([`tokens::RawToken`]) that knows character classes only
//! - a thin driver ([`lexer_impl::Lexer`]) that classifies words against the keyword
//!   tables, decides what a `*` means from the previous token and records positions
//!
//! Keeping keywords out of the logos enum means `ROLES` or `candy` can never be split
//! into a keyword plus a tail, and the case-insensitive attribute keywords need no
//! regex gymnastics.
//!
//! The lexer never fails. Illegal characters, unterminated strings and integers that
//! overflow are reported as diagnostics and skipped, so the parser always receives the
//! best token stream the input allows.

pub mod keywords;
pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, LexOutput, Lexer};
pub use tokens::{Token, TokenKind, TokenValue};

/// Tokens only, with lexical diagnostics dropped
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
