//! Token definitions for SPL
//!
//! Two layers live here. [`RawToken`] is the logos-derived scanner alphabet: it only
//! knows character classes and punctuation. It has no notion of keywords, and `*` is
//! a single raw `Star`. [`Token`] is what the rest of the pipeline sees: one of the
//! 33 [`TokenKind`]s, a normalized [`TokenValue`] and a 1-based line/column.
//! The translation between the two (keyword lookup, `*` disambiguation, literal
//! normalization) happens in [`super::lexer_impl::Lexer`].
use logos::Logos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw lexemes produced by the logos scanner
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
pub enum RawToken {
    // Line breaks (a run counts once per newline)
    #[regex(r"\n+")]
    Newlines,

    // Words: identifiers and keywords alike, classified after matching
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[regex(r"[0-9]+")]
    Digits,

    // Strings never span lines; the unterminated form runs to the end of the line
    #[regex(r#""[^"\n]*""#)]
    QuotedString,
    #[regex(r#""[^"\n]*"#)]
    UnterminatedString,

    // Comparison operators (logos picks the longest match, so `>=` beats `>`)
    #[token(">=")]
    Ge,
    #[token("<=")]
    Le,
    #[token("==")]
    Eq,
    #[token("!=")]
    Ne,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,

    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Divide,

    // Punctuation
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
}

impl RawToken {
    /// Token kind for raw lexemes that map one-to-one onto a kind.
    ///
    /// Words, digits, strings, newlines and `*` need context and return `None`.
    pub fn fixed_kind(self) -> Option<TokenKind> {
        let kind = match self {
            RawToken::Ge => TokenKind::Ge,
            RawToken::Le => TokenKind::Le,
            RawToken::Eq => TokenKind::Eq,
            RawToken::Ne => TokenKind::Ne,
            RawToken::Gt => TokenKind::Gt,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Divide => TokenKind::Divide,
            RawToken::LBrace => TokenKind::Lbrace,
            RawToken::RBrace => TokenKind::Rbrace,
            RawToken::LParen => TokenKind::Lparen,
            RawToken::RParen => TokenKind::Rparen,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Newlines
            | RawToken::Word
            | RawToken::Digits
            | RawToken::QuotedString
            | RawToken::UnterminatedString
            | RawToken::Star => return None,
        };
        Some(kind)
    }
}

/// The 33 token kinds. The serialized names are a stable contract for downstream tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    // Structural keywords (case-sensitive)
    Role,
    User,
    Resource,
    Allow,
    Deny,
    If,
    On,
    And,
    Or,
    // Attribute keywords (case-insensitive, value upper-cased)
    Can,
    Path,
    Action,
    // Comparison
    Ge,
    Le,
    Eq,
    Ne,
    Gt,
    Lt,
    // Arithmetic and the permission wildcard
    Plus,
    Minus,
    Times,
    Wildcard,
    Divide,
    // Punctuation
    Lbrace,
    Rbrace,
    Lparen,
    Rparen,
    Colon,
    Dot,
    Comma,
    // Literals
    Identifier,
    Number,
    String,
}

impl TokenKind {
    pub const ALL: [TokenKind; 33] = [
        TokenKind::Role,
        TokenKind::User,
        TokenKind::Resource,
        TokenKind::Allow,
        TokenKind::Deny,
        TokenKind::If,
        TokenKind::On,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Can,
        TokenKind::Path,
        TokenKind::Action,
        TokenKind::Ge,
        TokenKind::Le,
        TokenKind::Eq,
        TokenKind::Ne,
        TokenKind::Gt,
        TokenKind::Lt,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Times,
        TokenKind::Wildcard,
        TokenKind::Divide,
        TokenKind::Lbrace,
        TokenKind::Rbrace,
        TokenKind::Lparen,
        TokenKind::Rparen,
        TokenKind::Colon,
        TokenKind::Dot,
        TokenKind::Comma,
        TokenKind::Identifier,
        TokenKind::Number,
        TokenKind::String,
    ];

    /// Wire name of the kind, e.g. `LBRACE`
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Role => "ROLE",
            TokenKind::User => "USER",
            TokenKind::Resource => "RESOURCE",
            TokenKind::Allow => "ALLOW",
            TokenKind::Deny => "DENY",
            TokenKind::If => "IF",
            TokenKind::On => "ON",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Can => "CAN",
            TokenKind::Path => "PATH",
            TokenKind::Action => "ACTION",
            TokenKind::Ge => "GE",
            TokenKind::Le => "LE",
            TokenKind::Eq => "EQ",
            TokenKind::Ne => "NE",
            TokenKind::Gt => "GT",
            TokenKind::Lt => "LT",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Wildcard => "WILDCARD",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Lbrace => "LBRACE",
            TokenKind::Rbrace => "RBRACE",
            TokenKind::Lparen => "LPAREN",
            TokenKind::Rparen => "RPAREN",
            TokenKind::Colon => "COLON",
            TokenKind::Dot => "DOT",
            TokenKind::Comma => "COMMA",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
        }
    }

    /// Keywords that can only start a declaration. The recovering parser
    /// resynchronizes on these.
    pub fn starts_declaration(self) -> bool {
        matches!(
            self,
            TokenKind::Role
                | TokenKind::User
                | TokenKind::Resource
                | TokenKind::Allow
                | TokenKind::Deny
        )
    }

    /// Check if this kind carries a literal payload rather than fixed text
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::Number | TokenKind::String
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized literal value of a token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// Integer literals, parsed
    Int(i64),
    /// Everything else: identifier text, string content without quotes,
    /// keyword spelling (attribute keywords upper-cased), operator text
    Text(String),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Int(n) => write!(f, "{}", n),
            TokenValue::Text(s) => f.write_str(s),
        }
    }
}

/// A token with its normalized value and 1-based source position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, line: usize, column: usize) -> Self {
        Self {
            kind,
            value,
            line,
            column,
        }
    }

    /// Text payload, if the value is textual
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(s) => Some(s),
            TokenValue::Int(_) => None,
        }
    }

    /// Integer payload of a NUMBER token
    pub fn int(&self) -> Option<i64> {
        match self.value {
            TokenValue::Int(n) => Some(n),
            TokenValue::Text(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_literal() {
            write!(f, "<{}:{}>", self.kind, self.value)
        } else {
            write!(f, "<{}>", self.kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(source: &str) -> Vec<RawToken> {
        RawToken::lexer(source).filter_map(|result| result.ok()).collect()
    }

    #[test]
    fn test_words_and_digits() {
        assert_eq!(
            raw("ROLE admin_2 42"),
            vec![RawToken::Word, RawToken::Word, RawToken::Digits]
        );
    }

    #[test]
    fn test_longest_match_for_comparisons() {
        assert_eq!(
            raw(">= <= == != > <"),
            vec![
                RawToken::Ge,
                RawToken::Le,
                RawToken::Eq,
                RawToken::Ne,
                RawToken::Gt,
                RawToken::Lt
            ]
        );
        assert_eq!(raw("<=>"), vec![RawToken::Le, RawToken::Gt]);
    }

    #[test]
    fn test_strings_terminated_and_not() {
        assert_eq!(raw(r#""/data/x""#), vec![RawToken::QuotedString]);
        assert_eq!(raw("\"/data/x"), vec![RawToken::UnterminatedString]);
        assert_eq!(
            raw("\"abc\n\"def\""),
            vec![
                RawToken::UnterminatedString,
                RawToken::Newlines,
                RawToken::QuotedString
            ]
        );
    }

    #[test]
    fn test_whitespace_is_skipped_but_newlines_are_not() {
        assert_eq!(
            raw(" \t{\r\n\n}"),
            vec![RawToken::LBrace, RawToken::Newlines, RawToken::RBrace]
        );
    }

    #[test]
    fn test_illegal_character_is_an_error() {
        let results: Vec<_> = RawToken::lexer("a @ b").collect();
        assert_eq!(results.len(), 3);
        assert!(results[1].is_err());
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(TokenKind::ALL.len(), 33);
        for kind in TokenKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_token_display() {
        let role = Token::new(TokenKind::Role, TokenValue::Text("ROLE".into()), 1, 1);
        let ident = Token::new(TokenKind::Identifier, TokenValue::Text("Admin".into()), 1, 6);
        let number = Token::new(TokenKind::Number, TokenValue::Int(17), 2, 3);
        assert_eq!(role.to_string(), "<ROLE>");
        assert_eq!(ident.to_string(), "<IDENTIFIER:Admin>");
        assert_eq!(number.to_string(), "<NUMBER:17>");
    }
}
