//! Public API for the parser.
//!
//! The token stream is cut into chunks at every top-level keyword (`ROLE`,
//! `USER`, `RESOURCE`, `ALLOW`, `DENY`) and each chunk is parsed as exactly one
//! declaration. Those keywords cannot appear anywhere inside a well-formed
//! declaration, so a correct program splits into exactly its declarations, and a
//! broken one fails in one chunk without disturbing the next.

use chumsky::prelude::*;
use chumsky::Stream;
use std::ops::Range;

use super::declarations::declaration;
use super::error::{ParseFailure, SyntaxError};
use crate::spl::ast::{Declaration, Program};
use crate::spl::lexer::{self, Token, TokenKind};

/// Result of a recovering parse: the declarations that parsed, plus one error per
/// declaration that did not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<SyntaxError>,
}

impl ParseOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a token sequence, stopping at the first grammar mismatch
pub fn parse(tokens: &[Token]) -> Result<Program, SyntaxError> {
    let mut declarations = Vec::new();
    for chunk in chunks(tokens) {
        declarations.push(parse_declaration(tokens, chunk)?);
    }
    tracing::debug!(declarations = declarations.len(), "parsed program");
    Ok(Program::new(declarations))
}

/// Parse a token sequence, skipping each malformed declaration and collecting its error
pub fn parse_recovering(tokens: &[Token]) -> ParseOutput {
    let mut declarations = Vec::new();
    let mut errors = Vec::new();

    for chunk in chunks(tokens) {
        match parse_declaration(tokens, chunk) {
            Ok(declaration) => declarations.push(declaration),
            Err(error) => {
                tracing::trace!(line = error.line, %error, "skipping declaration");
                errors.push(error);
            }
        }
    }

    tracing::debug!(
        declarations = declarations.len(),
        errors = errors.len(),
        "parsed program with recovery"
    );
    ParseOutput {
        program: Program::new(declarations),
        errors,
    }
}

/// Lex and strictly parse `source`. Lexical diagnostics are dropped; use
/// [`crate::spl::pipeline::compile`] to keep them.
pub fn parse_source(source: &str) -> Result<Program, SyntaxError> {
    parse(&lexer::lex(source))
}

/// Token index ranges, one per declaration candidate
fn chunks(tokens: &[Token]) -> Vec<Range<usize>> {
    let mut starts: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, tok)| tok.kind.starts_declaration())
        .map(|(i, _)| i)
        .collect();
    // Leading tokens that do not start a declaration form a chunk of their own
    if !tokens.is_empty() && starts.first() != Some(&0) {
        starts.insert(0, 0);
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| start..starts.get(i + 1).copied().unwrap_or(tokens.len()))
        .collect()
}

fn parse_declaration(tokens: &[Token], chunk: Range<usize>) -> Result<Declaration, SyntaxError> {
    let eoi = chunk.end..chunk.end + 1;
    let stream = Stream::from_iter(
        eoi,
        tokens[chunk.clone()]
            .iter()
            .cloned()
            .zip(chunk.clone())
            .map(|(tok, i)| (tok, i..i + 1)),
    );

    declaration()
        .then_ignore(end())
        .parse(stream)
        .map_err(|failures| syntax_error(tokens, chunk, failures))
}

fn syntax_error(tokens: &[Token], chunk: Range<usize>, failures: Vec<ParseFailure>) -> SyntaxError {
    let context = context_of(tokens.get(chunk.start));
    // Parsing without recovery yields a single failure
    let failure = failures.into_iter().next();

    let (expected, found) = match failure {
        Some(failure) => (
            failure.expected.into_iter().collect(),
            // Running off the end of a chunk means the next declaration keyword was hit
            failure.found.or_else(|| tokens.get(chunk.end).cloned()),
        ),
        None => (Vec::new(), None),
    };

    let (line, column) = match &found {
        Some(tok) => (tok.line, tok.column),
        None => tokens
            .get(chunk.end.saturating_sub(1))
            .map_or((0, 0), |tok| (tok.line, tok.column)),
    };

    SyntaxError {
        expected,
        found,
        line,
        column,
        context,
    }
}

fn context_of(first: Option<&Token>) -> &'static str {
    match first.map(|tok| tok.kind) {
        Some(TokenKind::Role) => "role definition",
        Some(TokenKind::User) => "user definition",
        Some(TokenKind::Resource) => "resource definition",
        Some(TokenKind::Allow) | Some(TokenKind::Deny) => "policy definition",
        _ => "declaration",
    }
}
