//! `*` is a permission wildcard right after `:` or `{` and multiplication
//! everywhere else. The lexer decides from the previous token alone.

use rstest::rstest;
use spl::spl::lexer::{lex, TokenKind};

fn star_kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .into_iter()
        .filter(|t| t.text() == Some("*"))
        .map(|t| t.kind)
        .collect()
}

#[rstest]
#[case::role("ROLE Admin {can: *}")]
#[case::action("ALLOW action: * ON resource: DB_Finance")]
#[case::nested_braces("ROLE Admin {can: {permissions: *}}")]
#[case::after_brace("{*}")]
#[case::spaced_colon("ROLE Admin {can :   *}")]
fn test_wildcard(#[case] source: &str) {
    assert_eq!(star_kinds(source), vec![TokenKind::Wildcard]);
}

#[rstest]
#[case::simple("3 * 4")]
#[case::attribute("time.hour * 2")]
#[case::precedence("3 + 4 * 10")]
#[case::parenthesized("(a * b)")]
#[case::complex("time.hour * 2 + 5")]
#[case::identifiers("x * y")]
#[case::start_of_input("* 2")]
#[case::after_comma("ROLE Admin {can: read, *}")]
fn test_times(#[case] source: &str) {
    assert_eq!(star_kinds(source), vec![TokenKind::Times]);
}

#[test]
fn test_wildcard_and_times_in_one_policy() {
    let source = "DENY action: * ON resource: Db IF (time.hour * 2 > 3)";
    assert_eq!(star_kinds(source), vec![TokenKind::Wildcard, TokenKind::Times]);
}

#[test]
fn test_illegal_character_does_not_reset_lookback() {
    assert_eq!(star_kinds("ROLE Admin {can: @ *}"), vec![TokenKind::Wildcard]);
}

#[test]
fn test_newline_does_not_reset_lookback() {
    assert_eq!(star_kinds("ROLE Admin {can:\n  *}"), vec![TokenKind::Wildcard]);
}
