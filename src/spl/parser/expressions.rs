//! Condition and arithmetic grammar
//!
//! Precedence, loosest first:
//!
//! ```text
//! or_expr     OR         left-assoc
//! and_expr    AND        left-assoc
//! comparison  == != < > <= >=   (exactly one per comparison)
//! arith_expr  + -        left-assoc
//! term        * /        left-assoc
//! unary       prefix + -
//! primary     NUMBER | STRING | IDENT . IDENT | IDENT | ( arith_expr )
//! ```
//!
//! Parentheses only group arithmetic and produce no node of their own.

use chumsky::prelude::*;

use super::combinators::{attribute_name, ident, kind, number, string};
use super::error::ParseFailure;
use crate::spl::ast::{ArithOp, AttributeAccess, CompareOp, Comparison, Condition, Expr, Literal, UnaryOp};
use crate::spl::lexer::{Token, TokenKind};

pub(crate) fn condition() -> impl Parser<Token, Condition, Error = ParseFailure> + Clone {
    let comparison = comparison().map(Condition::Comparison);

    let and_expr = comparison
        .clone()
        .then(kind(TokenKind::And).ignore_then(comparison).repeated())
        .foldl(Condition::and);

    and_expr
        .clone()
        .then(kind(TokenKind::Or).ignore_then(and_expr).repeated())
        .foldl(Condition::or)
}

pub(crate) fn comparison() -> impl Parser<Token, Comparison, Error = ParseFailure> + Clone {
    let arith = arith_expr();

    arith
        .clone()
        .then(compare_op())
        .then(arith)
        .map(|((left, op), right)| Comparison {
            op,
            line: left.line(),
            left,
            right,
        })
}

fn compare_op() -> impl Parser<Token, CompareOp, Error = ParseFailure> + Clone {
    choice((
        kind(TokenKind::Eq).to(CompareOp::Eq),
        kind(TokenKind::Ne).to(CompareOp::Ne),
        kind(TokenKind::Le).to(CompareOp::Le),
        kind(TokenKind::Ge).to(CompareOp::Ge),
        kind(TokenKind::Lt).to(CompareOp::Lt),
        kind(TokenKind::Gt).to(CompareOp::Gt),
    ))
}

pub(crate) fn arith_expr() -> impl Parser<Token, Expr, Error = ParseFailure> + Clone {
    recursive(|arith| {
        let attribute_or_ident = ident()
            .then(kind(TokenKind::Dot).ignore_then(attribute_name()).or_not())
            .map(|((name, line), attribute)| match attribute {
                Some(attribute) => Expr::Attribute(AttributeAccess {
                    object: name,
                    attribute,
                    line,
                }),
                None => Expr::Literal(Literal::Identifier { name, line }),
            });

        let primary = choice((
            number().map(Expr::Literal),
            string().map(Expr::Literal),
            attribute_or_ident,
            arith.delimited_by(kind(TokenKind::Lparen), kind(TokenKind::Rparen)),
        ));

        let unary_op = choice((
            kind(TokenKind::Plus).map(|tok| (UnaryOp::Plus, tok.line)),
            kind(TokenKind::Minus).map(|tok| (UnaryOp::Minus, tok.line)),
        ));
        let unary = unary_op
            .repeated()
            .then(primary)
            .foldr(|(op, line), operand| Expr::unary(op, operand, line));

        let term_op = choice((
            kind(TokenKind::Times).to(ArithOp::Mul),
            kind(TokenKind::Divide).to(ArithOp::Div),
        ));
        let term = unary
            .clone()
            .then(term_op.then(unary).repeated())
            .foldl(|left, (op, right)| Expr::binary(op, left, right));

        let sum_op = choice((
            kind(TokenKind::Plus).to(ArithOp::Add),
            kind(TokenKind::Minus).to(ArithOp::Sub),
        ));
        term.clone()
            .then(sum_op.then(term).repeated())
            .foldl(|left, (op, right)| Expr::binary(op, left, right))
    })
}
