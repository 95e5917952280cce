//! Syntax errors
//!
//! [`ParseFailure`] is the error type threaded through the chumsky combinators. It
//! keeps the expected set as token kinds so that merged alternatives read like
//! `expected ROLE, USER, RESOURCE, ALLOW or DENY`. Once a declaration has failed,
//! the driver turns it into a positioned [`SyntaxError`].

use crate::spl::diagnostics::{Diagnostic, DiagnosticKind};
use crate::spl::lexer::{Token, TokenKind};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// One thing the parser would have accepted at the failure point
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expectation {
    Token(TokenKind),
    /// An `IDENTIFIER` with fixed text, e.g. `role` in a user block
    Named(&'static str),
    EndOfDeclaration,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Token(kind) => write!(f, "{}", kind),
            Expectation::Named(name) => write!(f, "'{}'", name),
            Expectation::EndOfDeclaration => f.write_str("end of declaration"),
        }
    }
}

/// Chumsky error over [`Token`] input. Spans are token indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub span: Range<usize>,
    pub expected: BTreeSet<Expectation>,
    pub found: Option<Token>,
}

impl ParseFailure {
    pub fn unexpected(span: Range<usize>, found: Option<Token>) -> Self {
        Self {
            span,
            expected: BTreeSet::new(),
            found,
        }
    }
}

impl chumsky::Error<Token> for ParseFailure {
    type Span = Range<usize>;
    type Label = Expectation;

    fn expected_input_found<Iter: IntoIterator<Item = Option<Token>>>(
        span: Self::Span,
        expected: Iter,
        found: Option<Token>,
    ) -> Self {
        let expected = expected
            .into_iter()
            .map(|item| match item {
                Some(token) => Expectation::Token(token.kind),
                None => Expectation::EndOfDeclaration,
            })
            .collect();
        Self {
            span,
            expected,
            found,
        }
    }

    // Labels sit on leaf parsers only, where they are the whole expectation
    fn with_label(mut self, label: Self::Label) -> Self {
        self.expected = BTreeSet::from([label]);
        self
    }

    fn merge(mut self, other: Self) -> Self {
        self.expected.extend(other.expected);
        self
    }
}

/// A grammar mismatch inside one declaration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{}: expected {}, found {}",
    .context,
    expected_list(.expected),
    found_text(.found)
)]
pub struct SyntaxError {
    /// Sorted, without duplicates
    pub expected: Vec<Expectation>,
    /// `None` at end of input
    pub found: Option<Token>,
    pub line: usize,
    pub column: usize,
    /// What was being parsed, e.g. `role definition`
    pub context: &'static str,
}

impl SyntaxError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::SyntaxError,
            self.to_string(),
            self.line,
            self.column,
        )
    }
}

fn expected_list(expected: &[Expectation]) -> String {
    let names: Vec<String> = expected.iter().map(ToString::to_string).collect();
    match names.as_slice() {
        [] => "nothing".to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

fn found_text(found: &Option<Token>) -> String {
    match found {
        Some(token) => token.to_string(),
        None => "end of input".to_string(),
    }
}
