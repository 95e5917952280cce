//! Fluent assertion API for SPL trees

use crate::spl::ast::{
    AstNode, Declaration, Effect, PolicyDef, Program, ResourceDef, RoleDef, UserDef,
};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a program
pub fn assert_program(program: &Program) -> ProgramAssertion<'_> {
    ProgramAssertion { program }
}

// ============================================================================
// Program Assertions
// ============================================================================

pub struct ProgramAssertion<'a> {
    program: &'a Program,
}

impl<'a> ProgramAssertion<'a> {
    pub fn declaration_count(self, expected: usize) -> Self {
        let actual = self.program.declarations.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} declarations, found {}: [{}]",
            expected,
            actual,
            summarize(&self.program.declarations)
        );
        self
    }

    pub fn declaration<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(DeclarationAssertion<'a>),
    {
        assert!(
            index < self.program.declarations.len(),
            "Declaration index {} out of bounds (program has {} declarations)",
            index,
            self.program.declarations.len()
        );
        assertion(DeclarationAssertion {
            declaration: &self.program.declarations[index],
            context: format!("declarations[{}]", index),
        });
        self
    }
}

// ============================================================================
// Declaration Assertions
// ============================================================================

pub struct DeclarationAssertion<'a> {
    declaration: &'a Declaration,
    context: String,
}

impl<'a> DeclarationAssertion<'a> {
    pub fn assert_role(self) -> RoleAssertion<'a> {
        match self.declaration {
            Declaration::Role(role) => RoleAssertion {
                role,
                context: self.context,
            },
            other => panic!("{}: Expected RoleDef, found {}", self.context, describe(other)),
        }
    }

    pub fn assert_user(self) -> UserAssertion<'a> {
        match self.declaration {
            Declaration::User(user) => UserAssertion {
                user,
                context: self.context,
            },
            other => panic!("{}: Expected UserDef, found {}", self.context, describe(other)),
        }
    }

    pub fn assert_resource(self) -> ResourceAssertion<'a> {
        match self.declaration {
            Declaration::Resource(resource) => ResourceAssertion {
                resource,
                context: self.context,
            },
            other => panic!(
                "{}: Expected ResourceDef, found {}",
                self.context,
                describe(other)
            ),
        }
    }

    pub fn assert_policy(self) -> PolicyAssertion<'a> {
        match self.declaration {
            Declaration::Policy(policy) => PolicyAssertion {
                policy,
                context: self.context,
            },
            other => panic!(
                "{}: Expected PolicyDef, found {}",
                self.context,
                describe(other)
            ),
        }
    }
}

// ============================================================================
// Per-kind Assertions
// ============================================================================

pub struct RoleAssertion<'a> {
    role: &'a RoleDef,
    context: String,
}

impl RoleAssertion<'_> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.role.name, expected,
            "{}: Expected role name '{}', but got '{}'",
            self.context, expected, self.role.name
        );
        self
    }

    pub fn wildcard(self) -> Self {
        assert!(
            self.role.actions.is_wildcard(),
            "{}: Expected wildcard actions, but got [{}]",
            self.context,
            self.role.actions
        );
        self
    }

    pub fn actions(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.role.actions.names(),
            expected,
            "{}: Unexpected actions",
            self.context
        );
        self
    }

    pub fn line(self, expected: usize) -> Self {
        assert_line(&self.context, self.role.line, expected);
        self
    }
}

pub struct UserAssertion<'a> {
    user: &'a UserDef,
    context: String,
}

impl UserAssertion<'_> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.user.name, expected,
            "{}: Expected user name '{}', but got '{}'",
            self.context, expected, self.user.name
        );
        self
    }

    pub fn role(self, expected: &str) -> Self {
        assert_eq!(
            self.user.role, expected,
            "{}: Expected role '{}', but got '{}'",
            self.context, expected, self.user.role
        );
        self
    }

    pub fn line(self, expected: usize) -> Self {
        assert_line(&self.context, self.user.line, expected);
        self
    }
}

pub struct ResourceAssertion<'a> {
    resource: &'a ResourceDef,
    context: String,
}

impl ResourceAssertion<'_> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.resource.name, expected,
            "{}: Expected resource name '{}', but got '{}'",
            self.context, expected, self.resource.name
        );
        self
    }

    pub fn path(self, expected: &str) -> Self {
        assert_eq!(
            self.resource.path, expected,
            "{}: Expected path '{}', but got '{}'",
            self.context, expected, self.resource.path
        );
        self
    }

    pub fn line(self, expected: usize) -> Self {
        assert_line(&self.context, self.resource.line, expected);
        self
    }
}

pub struct PolicyAssertion<'a> {
    policy: &'a PolicyDef,
    context: String,
}

impl PolicyAssertion<'_> {
    pub fn effect(self, expected: Effect) -> Self {
        assert_eq!(
            self.policy.effect, expected,
            "{}: Expected {}, but got {}",
            self.context, expected, self.policy.effect
        );
        self
    }

    pub fn wildcard(self) -> Self {
        assert!(
            self.policy.actions.is_wildcard(),
            "{}: Expected wildcard actions, but got [{}]",
            self.context,
            self.policy.actions
        );
        self
    }

    pub fn actions(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.policy.actions.names(),
            expected,
            "{}: Unexpected actions",
            self.context
        );
        self
    }

    pub fn resource(self, expected: &str) -> Self {
        assert_eq!(
            self.policy.resource, expected,
            "{}: Expected resource '{}', but got '{}'",
            self.context, expected, self.policy.resource
        );
        self
    }

    /// Compare against the fully parenthesized rendering of the condition
    pub fn condition(self, expected: &str) -> Self {
        match &self.policy.condition {
            Some(condition) => assert_eq!(
                condition.to_string(),
                expected,
                "{}: Unexpected condition",
                self.context
            ),
            None => panic!(
                "{}: Expected condition '{}', but the policy has none",
                self.context, expected
            ),
        }
        self
    }

    pub fn no_condition(self) -> Self {
        if let Some(condition) = &self.policy.condition {
            panic!(
                "{}: Expected no condition, but got '{}'",
                self.context, condition
            );
        }
        self
    }

    pub fn line(self, expected: usize) -> Self {
        assert_line(&self.context, self.policy.line, expected);
        self
    }
}

fn assert_line(context: &str, actual: usize, expected: usize) {
    assert_eq!(
        actual, expected,
        "{}: Expected line {}, but got {}",
        context, expected, actual
    );
}

fn describe(declaration: &Declaration) -> String {
    format!(
        "{} '{}'",
        declaration.node_type(),
        declaration.display_label()
    )
}

fn summarize(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|d| d.node_type())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spl::parser::parse_source;

    #[test]
    fn test_program_declaration_count() {
        let program = parse_source("ROLE Admin {can: *}").unwrap();
        assert_program(&program).declaration_count(1);
    }

    #[test]
    #[should_panic(expected = "Expected 2 declarations, found 1: [RoleDef]")]
    fn test_program_declaration_count_failure() {
        let program = parse_source("ROLE Admin {can: *}").unwrap();
        assert_program(&program).declaration_count(2);
    }

    #[test]
    #[should_panic(expected = "declarations[0]: Expected UserDef, found RoleDef 'ROLE Admin'")]
    fn test_kind_mismatch() {
        let program = parse_source("ROLE Admin {can: *}").unwrap();
        assert_program(&program).declaration(0, |d| {
            d.assert_user();
        });
    }

    #[test]
    #[should_panic(expected = "declarations[0]: Expected condition 'x', but the policy has none")]
    fn test_missing_condition() {
        let program = parse_source("ALLOW action: read ON resource: Db").unwrap();
        assert_program(&program).declaration(0, |d| {
            d.assert_policy().condition("x");
        });
    }
}
