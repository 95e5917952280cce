//! Implementation of the SPL lexer
//!
//! The raw scanning is handled entirely by logos. This module adds the parts a
//! regular scanner cannot express:
//!
//! - keyword classification of scanned words (see [`super::keywords`])
//! - `*` disambiguation through a one-token lookback: after `COLON` or `LBRACE` it
//!   is a `WILDCARD`, anywhere else a `TIMES`
//! - literal normalization (integers parsed, quotes stripped)
//! - line/column tracking and recoverable diagnostics for bad input

use super::keywords::classify_word;
use super::tokens::{RawToken, Token, TokenKind, TokenValue};
use crate::spl::diagnostics::{Diagnostic, DiagnosticKind};
use logos::Logos;

/// Lazy, context-sensitive token stream over a source string.
///
/// Iteration ends when the source is exhausted. Problems found on the way are
/// collected and can be read with [`Lexer::diagnostics`] at any point.
pub struct Lexer<'source> {
    raw: logos::Lexer<'source, RawToken>,
    source: &'source str,
    /// Byte offset of the raw scanner's input within `source`
    base: usize,
    line: usize,
    /// Byte offset where the current line starts
    line_start: usize,
    previous: Option<TokenKind>,
    diagnostics: Vec<Diagnostic>,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self::starting_at(source, 0)
    }

    /// Restart lexing at a byte offset.
    ///
    /// Line and column numbers stay relative to the whole source. The lookback is
    /// reset, so a `*` right at `offset` lexes as `TIMES`. Offsets inside a UTF-8
    /// sequence are moved back to the start of that character.
    pub fn starting_at(source: &'source str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }

        let prefix = &source[..offset];
        let line = 1 + prefix.bytes().filter(|b| *b == b'\n').count();
        let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);

        Self {
            raw: RawToken::lexer(&source[offset..]),
            source,
            base: offset,
            line,
            line_start,
            previous: None,
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics collected so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Byte offset just past the last scanned lexeme
    pub fn offset(&self) -> usize {
        self.base + self.raw.span().end
    }

    fn column_of(&self, offset: usize) -> usize {
        self.source[self.line_start..offset].chars().count() + 1
    }

    fn report(&mut self, kind: DiagnosticKind, message: String, offset: usize) {
        let column = self.column_of(offset);
        tracing::trace!(line = self.line, column, %kind, "lexer diagnostic");
        self.diagnostics
            .push(Diagnostic::new(kind, message, self.line, column));
    }

    /// Turn one raw lexeme into a token, or `None` when it produces no token
    fn accept(&mut self, raw: RawToken, start: usize) -> Option<Token> {
        let slice = self.raw.slice();

        let (kind, value) = match raw {
            RawToken::Newlines => {
                self.line += slice.len();
                self.line_start = start + slice.len();
                return None;
            }
            RawToken::Word => classify_word(slice),
            RawToken::Digits => match slice.parse::<i64>() {
                Ok(n) => (TokenKind::Number, TokenValue::Int(n)),
                Err(_) => {
                    let message = format!("integer literal {} is out of range", slice);
                    self.report(DiagnosticKind::InvalidNumber, message, start);
                    return None;
                }
            },
            RawToken::QuotedString => (
                TokenKind::String,
                TokenValue::Text(slice[1..slice.len() - 1].to_string()),
            ),
            RawToken::UnterminatedString => {
                let message = "illegal character '\"': unterminated string literal".to_string();
                self.report(DiagnosticKind::UnterminatedString, message, start);
                return None;
            }
            RawToken::Star => {
                let kind = match self.previous {
                    Some(TokenKind::Colon) | Some(TokenKind::Lbrace) => TokenKind::Wildcard,
                    _ => TokenKind::Times,
                };
                (kind, TokenValue::Text(slice.to_string()))
            }
            other => {
                let kind = other.fixed_kind()?;
                (kind, TokenValue::Text(slice.to_string()))
            }
        };

        Some(Token::new(kind, value, self.line, self.column_of(start)))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let result = self.raw.next()?;
            let start = self.base + self.raw.span().start;

            match result {
                Ok(raw) => {
                    if let Some(token) = self.accept(raw, start) {
                        self.previous = Some(token.kind);
                        return Some(token);
                    }
                }
                Err(()) => {
                    let ch = self.source[start..].chars().next().unwrap_or('\u{fffd}');
                    let message = format!("illegal character '{}'", ch);
                    self.report(DiagnosticKind::IllegalCharacter, message, start);
                }
            }
        }
    }
}

/// Eagerly lexed source: every token plus every lexical diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LexOutput {
    /// Token kinds only, handy for assertions and quick inspection
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}

/// Convenience function to tokenize a string and collect all tokens and diagnostics
pub fn tokenize(source: &str) -> LexOutput {
    let mut lexer = Lexer::new(source);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    let diagnostics = lexer.into_diagnostics();
    tracing::debug!(
        tokens = tokens.len(),
        diagnostics = diagnostics.len(),
        "tokenized source"
    );
    LexOutput {
        tokens,
        diagnostics,
    }
}
