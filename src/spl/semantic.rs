//! Semantic analysis for SPL
//!
//! Takes a parsed [`Program`](crate::spl::ast::Program) and reports what the grammar
//! cannot see: duplicate names, references to undeclared roles and resources,
//! unknown attributes and ill-typed comparisons. Analysis never stops early and
//! never touches the tree; results live in a separate [`Analysis`].
//!
//! Whether a policy's actions must be a subset of what some role grants is left
//! open. No such check is made.

pub mod analyzer;
pub mod error;
pub mod registry;
pub mod suggest;
pub mod symbols;

pub use analyzer::{analyze, Analysis, Analyzer};
pub use error::{Category, DeclKind, SemanticError};
pub use registry::{AttributeRegistry, Lookup};
pub use symbols::{SymbolTable, Symbols};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spl::parser::parse_source;
    use crate::spl::samples::SplSources;

    fn analyze_source(source: &str) -> Analysis {
        analyze(&parse_source(source).expect("Failed to parse"))
    }

    fn analyze_sample(name: &str) -> Analysis {
        analyze_source(SplSources::get_str(name).expect("sample exists"))
    }

    #[test]
    fn test_valid_samples_are_clean() {
        for name in SplSources::valid() {
            let analysis = analyze_sample(name);
            assert!(analysis.is_ok(), "{}: {:?}", name, analysis.errors);
        }
    }

    #[test]
    fn test_symbol_tables() {
        let analysis = analyze_sample("030-full-program.spl");
        assert_eq!(
            analysis.symbols.roles.names().collect::<Vec<_>>(),
            vec!["Admin", "Developer"]
        );
        assert_eq!(analysis.symbols.users.len(), 2);
        assert_eq!(analysis.symbols.resources.line_of("Repo"), Some(6));
    }

    #[test]
    fn test_duplicates() {
        let analysis = analyze_sample("100-duplicate-declarations.spl");
        assert_eq!(
            analysis.errors,
            vec![
                SemanticError::DuplicateDeclaration {
                    kind: DeclKind::Role,
                    name: "Admin".to_string(),
                    first_line: 1,
                    duplicate_line: 2,
                },
                SemanticError::DuplicateDeclaration {
                    kind: DeclKind::User,
                    name: "Bob".to_string(),
                    first_line: 3,
                    duplicate_line: 4,
                },
            ]
        );
        assert_eq!(analysis.symbols.roles.line_of("Admin"), Some(1));
    }

    #[test]
    fn test_same_name_in_different_kinds_is_fine() {
        let analysis = analyze_source(
            "ROLE Finance {can: read} USER Finance {role: Finance} RESOURCE Finance {path: \"/f\"}",
        );
        assert!(analysis.is_ok());
    }

    #[test]
    fn test_undefined_references() {
        let analysis = analyze_sample("110-undefined-references.spl");
        assert_eq!(
            analysis.errors,
            vec![
                SemanticError::UndefinedReference {
                    kind: DeclKind::Role,
                    name: "Developr".to_string(),
                    line: 2,
                    suggestion: Some("Developer".to_string()),
                },
                SemanticError::UndefinedReference {
                    kind: DeclKind::Resource,
                    name: "Missing".to_string(),
                    line: 4,
                    suggestion: None,
                },
            ]
        );
    }

    #[test]
    fn test_suggestions_can_be_disabled() {
        let program = parse_source("ROLE Developer {can: read} USER A {role: Developr}").unwrap();
        let analysis = Analyzer::new().suggestions(false).analyze(&program);
        assert!(matches!(
            &analysis.errors[0],
            SemanticError::UndefinedReference {
                suggestion: None,
                ..
            }
        ));
    }

    #[test]
    fn test_type_errors_sample() {
        let analysis = analyze_sample("120-type-errors.spl");
        assert_eq!(
            analysis.errors,
            vec![
                SemanticError::TypeMismatch {
                    left: Category::Numeric,
                    right: Category::Categorical,
                    line: 2,
                },
                SemanticError::UnknownNamespace {
                    object: "weather".to_string(),
                    line: 3,
                },
                SemanticError::UnknownAttribute {
                    object: "time".to_string(),
                    attribute: "second".to_string(),
                    line: 4,
                },
                SemanticError::NonNumericOperand {
                    operator: "+",
                    category: Category::Categorical,
                    line: 5,
                },
            ]
        );
    }

    #[test]
    fn test_categorical_comparisons() {
        let analysis = analyze_source(
            "RESOURCE Db {path: \"/db\"} \
             ALLOW action: read ON resource: Db IF (user.role == Admin AND resource.path != \"/tmp\")",
        );
        assert!(analysis.is_ok(), "{:?}", analysis.errors);
    }

    #[test]
    fn test_unknown_operand_suppresses_mismatch() {
        let analysis = analyze_source(
            "RESOURCE Db {path: \"/db\"} ALLOW action: read ON resource: Db IF (weather.rain == \"yes\" AND weather.rain > 3)",
        );
        let kinds: Vec<_> = analysis.diagnostics().iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                crate::spl::diagnostics::DiagnosticKind::UnknownNamespace,
                crate::spl::diagnostics::DiagnosticKind::UnknownNamespace,
            ]
        );
    }

    #[test]
    fn test_arithmetic_results_are_numeric() {
        let analysis = analyze_source(
            "RESOURCE Db {path: \"/db\"} ALLOW action: read ON resource: Db IF (time.hour * 60 + time.minute >= 540)",
        );
        assert!(analysis.is_ok(), "{:?}", analysis.errors);

        let analysis = analyze_source(
            "RESOURCE Db {path: \"/db\"} ALLOW action: read ON resource: Db IF (-time.hour == user.name)",
        );
        assert_eq!(
            analysis.errors,
            vec![SemanticError::TypeMismatch {
                left: Category::Numeric,
                right: Category::Categorical,
                line: 1,
            }]
        );
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = AttributeRegistry::default();
        registry.insert("request", "ip", Category::Categorical);
        let program = parse_source(
            "RESOURCE Db {path: \"/db\"} ALLOW action: read ON resource: Db IF (request.ip == \"10.0.0.1\")",
        )
        .unwrap();
        assert!(Analyzer::with_registry(registry).analyze(&program).is_ok());
        assert!(!analyze(&program).is_ok());
    }

    #[test]
    fn test_analysis_does_not_alter_the_tree() {
        let program = parse_source(SplSources::get_str("120-type-errors.spl").unwrap()).unwrap();
        let before = program.clone();
        let _ = analyze(&program);
        assert_eq!(program, before);
    }
}
