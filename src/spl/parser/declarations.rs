//! Top-level declaration grammar

use chumsky::prelude::*;

use super::combinators::{ident, ident_named, kind, name_literal};
use super::error::ParseFailure;
use super::expressions::condition;
use crate::spl::ast::{
    ActionSet, Declaration, Effect, PolicyDef, ResourceDef, RoleDef, UserDef,
};
use crate::spl::lexer::{Token, TokenKind};

pub(crate) fn declaration() -> impl Parser<Token, Declaration, Error = ParseFailure> + Clone {
    choice((
        role_def().map(Declaration::Role),
        user_def().map(Declaration::User),
        resource_def().map(Declaration::Resource),
        policy_def().map(Declaration::Policy),
    ))
}

/// `ROLE Admin {can: read, write}`
pub(crate) fn role_def() -> impl Parser<Token, RoleDef, Error = ParseFailure> + Clone {
    kind(TokenKind::Role)
        .then(ident())
        .then_ignore(kind(TokenKind::Lbrace))
        .then_ignore(kind(TokenKind::Can))
        .then_ignore(kind(TokenKind::Colon))
        .then(action_list())
        .then_ignore(kind(TokenKind::Rbrace))
        .map(|((keyword, (name, _)), actions)| RoleDef {
            name,
            actions,
            line: keyword.line,
        })
}

/// `USER Alice {role: Admin}`
pub(crate) fn user_def() -> impl Parser<Token, UserDef, Error = ParseFailure> + Clone {
    kind(TokenKind::User)
        .then(ident())
        .then_ignore(kind(TokenKind::Lbrace))
        .then_ignore(ident_named("role"))
        .then_ignore(kind(TokenKind::Colon))
        .then(ident())
        .then_ignore(kind(TokenKind::Rbrace))
        .map(|((keyword, (name, _)), (role, _))| UserDef {
            name,
            role,
            line: keyword.line,
        })
}

/// `RESOURCE DB_Finance {path: "/data/financial"}`
pub(crate) fn resource_def() -> impl Parser<Token, ResourceDef, Error = ParseFailure> + Clone {
    kind(TokenKind::Resource)
        .then(ident())
        .then_ignore(kind(TokenKind::Lbrace))
        .then_ignore(kind(TokenKind::Path))
        .then_ignore(kind(TokenKind::Colon))
        .then(kind(TokenKind::String))
        .then_ignore(kind(TokenKind::Rbrace))
        .map(|((keyword, (name, _)), path)| ResourceDef {
            name,
            path: path.value.to_string(),
            line: keyword.line,
        })
}

/// `ALLOW action: read ON resource: DB_Finance IF (time.hour >= 9)`
pub(crate) fn policy_def() -> impl Parser<Token, PolicyDef, Error = ParseFailure> + Clone {
    let effect = choice((
        kind(TokenKind::Allow).map(|tok| (Effect::Allow, tok.line)),
        kind(TokenKind::Deny).map(|tok| (Effect::Deny, tok.line)),
    ));

    let guard = kind(TokenKind::If)
        .ignore_then(kind(TokenKind::Lparen))
        .ignore_then(condition())
        .then_ignore(kind(TokenKind::Rparen));

    effect
        .then_ignore(kind(TokenKind::Action))
        .then_ignore(kind(TokenKind::Colon))
        .then(action_list())
        .then_ignore(kind(TokenKind::On))
        .then_ignore(ident_named("resource"))
        .then_ignore(kind(TokenKind::Colon))
        .then(ident())
        .then(guard.or_not())
        .map(
            |((((effect, line), actions), (resource, _)), condition)| PolicyDef {
                effect,
                actions,
                resource,
                condition,
                line,
            },
        )
}

/// `*`, or one or more comma-separated identifiers / strings
pub(crate) fn action_list() -> impl Parser<Token, ActionSet, Error = ParseFailure> + Clone {
    let wildcard = kind(TokenKind::Wildcard).map(|tok| ActionSet::wildcard(tok.line));

    let named = name_literal()
        .separated_by(kind(TokenKind::Comma))
        .at_least(1)
        .try_map(|items, span| {
            ActionSet::named(items).ok_or_else(|| ParseFailure::unexpected(span, None))
        });

    wildcard.or(named)
}
