//! Leaf parsers shared by the declaration and expression grammars.
//!
//! Every leaf carries a label, so a failure at that leaf reports exactly the
//! token (or named identifier) it wanted.

use chumsky::prelude::*;
use std::ops::Range;

use super::error::{Expectation, ParseFailure};
use crate::spl::ast::Literal;
use crate::spl::lexer::{Token, TokenKind, TokenValue};

/// Match a single token of the given kind
pub(crate) fn kind(
    expected: TokenKind,
) -> impl Parser<Token, Token, Error = ParseFailure> + Clone {
    filter_map(move |span: Range<usize>, tok: Token| {
        if tok.kind == expected {
            Ok(tok)
        } else {
            Err(ParseFailure::unexpected(span, Some(tok)))
        }
    })
    .labelled(Expectation::Token(expected))
}

/// Identifier text and its line
pub(crate) fn ident() -> impl Parser<Token, (String, usize), Error = ParseFailure> + Clone {
    kind(TokenKind::Identifier).map(|tok| (tok.value.to_string(), tok.line))
}

/// Attribute name after the dot in `object.attribute`. Attribute keywords are
/// accepted here and read back in lower case, so `resource.path` names `path`.
pub(crate) fn attribute_name() -> impl Parser<Token, String, Error = ParseFailure> + Clone {
    filter_map(move |span: Range<usize>, tok: Token| match tok.kind {
        TokenKind::Identifier => Ok(tok.value.to_string()),
        TokenKind::Can | TokenKind::Path | TokenKind::Action => {
            Ok(tok.value.to_string().to_ascii_lowercase())
        }
        _ => Err(ParseFailure::unexpected(span, Some(tok))),
    })
    .labelled(Expectation::Token(TokenKind::Identifier))
}

/// An identifier spelled `name` (ASCII case-insensitive), such as the `role` in
/// `USER Bob {role: Admin}`
pub(crate) fn ident_named(
    name: &'static str,
) -> impl Parser<Token, Token, Error = ParseFailure> + Clone {
    filter_map(move |span: Range<usize>, tok: Token| {
        let matches = tok.kind == TokenKind::Identifier
            && tok.text().is_some_and(|text| text.eq_ignore_ascii_case(name));
        if matches {
            Ok(tok)
        } else {
            Err(ParseFailure::unexpected(span, Some(tok)))
        }
    })
    .labelled(Expectation::Named(name))
}

pub(crate) fn number() -> impl Parser<Token, Literal, Error = ParseFailure> + Clone {
    filter_map(move |span: Range<usize>, tok: Token| match tok.value {
        TokenValue::Int(value) if tok.kind == TokenKind::Number => Ok(Literal::Number {
            value,
            line: tok.line,
        }),
        _ => Err(ParseFailure::unexpected(span, Some(tok))),
    })
    .labelled(Expectation::Token(TokenKind::Number))
}

pub(crate) fn string() -> impl Parser<Token, Literal, Error = ParseFailure> + Clone {
    kind(TokenKind::String).map(|tok| Literal::String {
        value: tok.value.to_string(),
        line: tok.line,
    })
}

/// Identifier or string literal, as used in action lists
pub(crate) fn name_literal() -> impl Parser<Token, Literal, Error = ParseFailure> + Clone {
    ident()
        .map(|(name, line)| Literal::Identifier { name, line })
        .or(string())
}
