//! Semantic errors

use crate::spl::diagnostics::{Diagnostic, DiagnosticKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The three declaration namespaces. Names only clash within one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeclKind {
    Role,
    User,
    Resource,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeclKind::Role => "role",
            DeclKind::User => "user",
            DeclKind::Resource => "resource",
        })
    }
}

/// Semantic category of an operand, used for comparison typing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Numeric,
    Categorical,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Numeric => "numeric",
            Category::Categorical => "categorical",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("duplicate {kind} '{name}' (first declared on line {first_line})")]
    DuplicateDeclaration {
        kind: DeclKind,
        name: String,
        first_line: usize,
        duplicate_line: usize,
    },

    #[error("undefined {kind} '{name}'{}", hint(.suggestion))]
    UndefinedReference {
        kind: DeclKind,
        name: String,
        line: usize,
        suggestion: Option<String>,
    },

    #[error("unknown attribute namespace '{object}'")]
    UnknownNamespace { object: String, line: usize },

    #[error("'{object}' has no attribute '{attribute}'")]
    UnknownAttribute {
        object: String,
        attribute: String,
        line: usize,
    },

    #[error("cannot compare {left} with {right}")]
    TypeMismatch {
        left: Category,
        right: Category,
        line: usize,
    },

    #[error("operator '{operator}' needs numeric operands, found {category}")]
    NonNumericOperand {
        operator: &'static str,
        category: Category,
        line: usize,
    },
}

fn hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean `{}`?)", name),
        None => String::new(),
    }
}

impl SemanticError {
    /// Line the error is reported at. For duplicates, the line of the duplicate.
    pub fn line(&self) -> usize {
        match self {
            SemanticError::DuplicateDeclaration { duplicate_line, .. } => *duplicate_line,
            SemanticError::UndefinedReference { line, .. }
            | SemanticError::UnknownNamespace { line, .. }
            | SemanticError::UnknownAttribute { line, .. }
            | SemanticError::TypeMismatch { line, .. }
            | SemanticError::NonNumericOperand { line, .. } => *line,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            SemanticError::DuplicateDeclaration { .. } => DiagnosticKind::DuplicateDeclaration,
            SemanticError::UndefinedReference { .. } => DiagnosticKind::UndefinedReference,
            SemanticError::UnknownNamespace { .. } => DiagnosticKind::UnknownNamespace,
            SemanticError::UnknownAttribute { .. } => DiagnosticKind::UnknownAttribute,
            SemanticError::TypeMismatch { .. } => DiagnosticKind::TypeMismatch,
            SemanticError::NonNumericOperand { .. } => DiagnosticKind::NonNumericOperand,
        }
    }

    /// Tree nodes only record lines, so semantic diagnostics have no column
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.kind(), self.to_string(), self.line(), 0)
    }
}
