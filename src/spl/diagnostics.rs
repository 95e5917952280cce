//! Diagnostic records shared by every stage
//!
//! Lexing, parsing and semantic analysis each have their own structured error
//! types. Report generators and CLIs only need the uniform shape below: a kind
//! tag, a human-readable message and a 1-based position.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What went wrong, as a stable tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    IllegalCharacter,
    UnterminatedString,
    InvalidNumber,
    SyntaxError,
    DuplicateDeclaration,
    UndefinedReference,
    UnknownNamespace,
    UnknownAttribute,
    TypeMismatch,
    NonNumericOperand,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::IllegalCharacter => "IllegalCharacter",
            DiagnosticKind::UnterminatedString => "UnterminatedString",
            DiagnosticKind::InvalidNumber => "InvalidNumber",
            DiagnosticKind::SyntaxError => "SyntaxError",
            DiagnosticKind::DuplicateDeclaration => "DuplicateDeclaration",
            DiagnosticKind::UndefinedReference => "UndefinedReference",
            DiagnosticKind::UnknownNamespace => "UnknownNamespace",
            DiagnosticKind::UnknownAttribute => "UnknownAttribute",
            DiagnosticKind::TypeMismatch => "TypeMismatch",
            DiagnosticKind::NonNumericOperand => "NonNumericOperand",
        }
    }

    /// Lexical problems are recovered from inside the lexer
    pub fn is_lexical(self) -> bool {
        matches!(
            self,
            DiagnosticKind::IllegalCharacter
                | DiagnosticKind::UnterminatedString
                | DiagnosticKind::InvalidNumber
        )
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A located, human-readable report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub line: usize,
    /// 1-based; 0 when only the line is known
    pub column: usize,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: error[{}]: {}",
            self.line, self.column, self.kind, self.message
        )
    }
}

/// Render a diagnostic with the offending source line and a caret under the column.
pub fn render(diag: &Diagnostic, source: &str) -> String {
    let line_text = source
        .lines()
        .nth(diag.line.saturating_sub(1))
        .unwrap_or("");
    if diag.column == 0 {
        return format!("{}\n  {}", diag, line_text);
    }
    format!(
        "{}\n  {}\n  {}^",
        diag,
        line_text,
        " ".repeat(diag.column.saturating_sub(1))
    )
}
