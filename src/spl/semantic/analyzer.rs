//! The semantic passes
//!
//! 1. declaration collection into the symbol tables
//! 2. reference resolution (user -> role, policy -> resource)
//! 3. condition typing over a single [`walk`] of the tree
//!
//! Every pass appends to one error list and carries on. The tree is only read.

use super::error::{Category, DeclKind, SemanticError};
use super::registry::{AttributeRegistry, Lookup};
use super::suggest::closest;
use super::symbols::Symbols;
use crate::spl::ast::{walk, AttributeAccess, Comparison, Declaration, Expr, Literal, Node, Program};
use crate::spl::diagnostics::Diagnostic;

/// Output of analysis: the resolved symbol tables and every error found, in pass order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub symbols: Symbols,
    pub errors: Vec<SemanticError>,
}

impl Analysis {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(SemanticError::to_diagnostic).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Analyzer {
    registry: AttributeRegistry,
    suggestions: bool,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::with_registry(AttributeRegistry::default())
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: AttributeRegistry) -> Self {
        Self {
            registry,
            suggestions: true,
        }
    }

    /// Toggle "did you mean" hints on undefined references
    pub fn suggestions(mut self, enabled: bool) -> Self {
        self.suggestions = enabled;
        self
    }

    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    pub fn analyze(&self, program: &Program) -> Analysis {
        let mut errors = Vec::new();
        let symbols = collect_declarations(program, &mut errors);
        self.resolve_references(program, &symbols, &mut errors);
        self.check_conditions(program, &mut errors);

        tracing::debug!(
            roles = symbols.roles.len(),
            users = symbols.users.len(),
            resources = symbols.resources.len(),
            errors = errors.len(),
            "analyzed program"
        );
        Analysis { symbols, errors }
    }

    fn resolve_references(
        &self,
        program: &Program,
        symbols: &Symbols,
        errors: &mut Vec<SemanticError>,
    ) {
        for declaration in &program.declarations {
            let (kind, name, line) = match declaration {
                Declaration::User(user) => (DeclKind::Role, &user.role, user.line),
                Declaration::Policy(policy) => (DeclKind::Resource, &policy.resource, policy.line),
                Declaration::Role(_) | Declaration::Resource(_) => continue,
            };

            let table = symbols.table(kind);
            if table.contains(name) {
                continue;
            }
            let suggestion = if self.suggestions {
                closest(name, table.names())
            } else {
                None
            };
            push(
                errors,
                SemanticError::UndefinedReference {
                    kind,
                    name: name.clone(),
                    line,
                    suggestion,
                },
            );
        }
    }

    fn check_conditions(&self, program: &Program, errors: &mut Vec<SemanticError>) {
        walk(Node::Program(program), &mut |node| match node {
            Node::Attribute(access) => self.check_attribute(access, errors),
            Node::Comparison(comparison) => self.check_comparison(comparison, errors),
            Node::Arithmetic(expr) => self.check_arithmetic(expr, errors),
            _ => {}
        });
    }

    fn check_attribute(&self, access: &AttributeAccess, errors: &mut Vec<SemanticError>) {
        match self.registry.lookup(&access.object, &access.attribute) {
            Lookup::Found(_) => {}
            Lookup::UnknownNamespace => push(
                errors,
                SemanticError::UnknownNamespace {
                    object: access.object.clone(),
                    line: access.line,
                },
            ),
            Lookup::UnknownAttribute => push(
                errors,
                SemanticError::UnknownAttribute {
                    object: access.object.clone(),
                    attribute: access.attribute.clone(),
                    line: access.line,
                },
            ),
        }
    }

    fn check_comparison(&self, comparison: &Comparison, errors: &mut Vec<SemanticError>) {
        let left = self.category_of(&comparison.left);
        let right = self.category_of(&comparison.right);
        if let (Some(left), Some(right)) = (left, right) {
            if left != right {
                push(
                    errors,
                    SemanticError::TypeMismatch {
                        left,
                        right,
                        line: comparison.line,
                    },
                );
            }
        }
    }

    fn check_arithmetic(&self, expr: &Expr, errors: &mut Vec<SemanticError>) {
        let (operator, operands, line): (&'static str, Vec<&Expr>, usize) = match expr {
            Expr::Binary {
                op,
                left,
                right,
                line,
            } => (op.symbol(), vec![&**left, &**right], *line),
            Expr::Unary { op, operand, line } => (op.symbol(), vec![&**operand], *line),
            Expr::Attribute(_) | Expr::Literal(_) => return,
        };

        for operand in operands {
            if let Some(Category::Categorical) = self.category_of(operand) {
                push(
                    errors,
                    SemanticError::NonNumericOperand {
                        operator,
                        category: Category::Categorical,
                        line,
                    },
                );
            }
        }
    }

    /// Category of an operand, `None` when it cannot be known (an unresolved
    /// attribute). Pure: errors are reported by the walk, not here.
    fn category_of(&self, expr: &Expr) -> Option<Category> {
        match expr {
            Expr::Binary { .. } | Expr::Unary { .. } => Some(Category::Numeric),
            Expr::Attribute(access) => match self.registry.lookup(&access.object, &access.attribute) {
                Lookup::Found(category) => Some(category),
                Lookup::UnknownNamespace | Lookup::UnknownAttribute => None,
            },
            Expr::Literal(Literal::Number { .. }) => Some(Category::Numeric),
            Expr::Literal(Literal::String { .. }) | Expr::Literal(Literal::Identifier { .. }) => {
                Some(Category::Categorical)
            }
            Expr::Literal(Literal::Wildcard { .. }) => None,
        }
    }
}

fn collect_declarations(program: &Program, errors: &mut Vec<SemanticError>) -> Symbols {
    let mut symbols = Symbols::default();

    for declaration in &program.declarations {
        let (kind, name, line) = match declaration {
            Declaration::Role(role) => (DeclKind::Role, &role.name, role.line),
            Declaration::User(user) => (DeclKind::User, &user.name, user.line),
            Declaration::Resource(resource) => (DeclKind::Resource, &resource.name, resource.line),
            Declaration::Policy(_) => continue,
        };

        if let Err(first_line) = symbols.table_mut(kind).declare(name, line) {
            push(
                errors,
                SemanticError::DuplicateDeclaration {
                    kind,
                    name: name.clone(),
                    first_line,
                    duplicate_line: line,
                },
            );
        }
    }

    symbols
}

fn push(errors: &mut Vec<SemanticError>, error: SemanticError) {
    tracing::trace!(line = error.line(), %error, "semantic error");
    errors.push(error);
}

/// Analyze with the built-in attribute registry
pub fn analyze(program: &Program) -> Analysis {
    Analyzer::default().analyze(program)
}
