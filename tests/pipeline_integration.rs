//! End-to-end behaviour of `compile`: every stage runs, every diagnostic is kept

use spl::spl::ast::Declaration;
use spl::spl::config::Config;
use spl::spl::diagnostics::{render, DiagnosticKind};
use spl::spl::pipeline::{compile, Compilation};
use spl::spl::samples::SplSources;

fn compile_default(source: &str) -> Compilation {
    compile(source, &Config::default())
}

fn kinds(compilation: &Compilation) -> Vec<DiagnosticKind> {
    compilation.diagnostics.iter().map(|d| d.kind).collect()
}

#[test]
fn test_duplicate_role_reported_once() {
    let compilation = compile_default("ROLE Admin {can: *}\nROLE Admin {can: read}");
    assert_eq!(kinds(&compilation), vec![DiagnosticKind::DuplicateDeclaration]);
    assert_eq!(compilation.diagnostics[0].line, 2);
    // Both declarations stay in the tree
    assert_eq!(compilation.program.roles().count(), 2);
}

#[test]
fn test_undefined_resource_still_completes() {
    let compilation = compile_default(
        "ROLE Admin {can: *}\nALLOW action: read ON resource: Missing\nUSER Bob {role: Nobody}",
    );
    assert_eq!(
        kinds(&compilation),
        vec![
            DiagnosticKind::UndefinedReference,
            DiagnosticKind::UndefinedReference,
        ]
    );
    assert_eq!(compilation.program.declarations.len(), 3);
    assert!(compilation.diagnostics[0].message.contains("resource 'Missing'"));
    assert!(compilation.diagnostics[1].message.contains("role 'Nobody'"));
}

#[test]
fn test_type_mismatch() {
    let compilation = compile_default(
        "RESOURCE Db {path: \"/db\"}\nALLOW action: read ON resource: Db\nIF (time.hour > \"late\")",
    );
    assert_eq!(kinds(&compilation), vec![DiagnosticKind::TypeMismatch]);
    assert_eq!(compilation.diagnostics[0].line, 3);
}

#[test]
fn test_suggestion_in_message() {
    let compilation = compile_default(SplSources::get_str("110-undefined-references.spl").unwrap());
    assert_eq!(
        compilation.diagnostics[0].to_string(),
        "2:0: error[UndefinedReference]: undefined role 'Developr' (did you mean `Developer`?)"
    );
}

#[test]
fn test_suggestions_disabled_by_config() {
    let config = Config::from_yaml_str("analysis:\n  suggestions: false\n").unwrap();
    let compilation = compile(SplSources::get_str("110-undefined-references.spl").unwrap(), &config);
    assert!(!compilation.diagnostics[0].message.contains("did you mean"));
}

#[test]
fn test_lexical_sample() {
    let source = SplSources::get_str("140-lexical-errors.spl").unwrap();
    let compilation = compile_default(source);

    let lexical: Vec<_> = compilation
        .diagnostics
        .iter()
        .filter(|d| d.kind.is_lexical())
        .collect();
    assert_eq!(lexical.len(), 2);
    assert_eq!(
        render(lexical[0], source),
        "1:21: error[IllegalCharacter]: illegal character '@'\n  ROLE Admin {can: *} @\n                      ^"
    );

    // The resource lost its path, the other two declarations survive
    assert!(matches!(compilation.program.declarations[0], Declaration::Role(_)));
    assert!(matches!(compilation.program.declarations[1], Declaration::User(_)));
}

#[test]
fn test_syntax_sample_recovers() {
    let compilation = compile_default(SplSources::get_str("130-syntax-errors.spl").unwrap());
    let syntax_lines: Vec<usize> = compilation
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::SyntaxError)
        .map(|d| d.line)
        .collect();
    assert_eq!(syntax_lines, vec![2, 4]);
    assert_eq!(compilation.program.declarations.len(), 3);
    // The policy refers to the resource that failed to parse
    assert_eq!(
        compilation.diagnostics.last().map(|d| d.kind),
        Some(DiagnosticKind::UndefinedReference)
    );
}

#[test]
fn test_every_sample_compiles_without_panicking() {
    for name in SplSources::available() {
        let compilation = compile_default(SplSources::get_str(name).unwrap());
        let expect_clean = SplSources::valid().contains(&name);
        assert_eq!(compilation.is_ok(), expect_clean, "{}: {:?}", name, compilation.diagnostics);
    }
}
