//! Parser module for SPL
//!
//! Turns the lexer's token sequence into a [`Program`]. The grammar is written with
//! chumsky combinators:
//!
//! - `combinators` - labelled leaf parsers (single tokens, named identifiers, literals)
//! - `expressions` - conditions and arithmetic, one combinator per precedence layer
//! - `declarations` - the four declaration forms and action lists
//! - `api` - drivers: strict [`parse`], declaration-level recovery with [`parse_recovering`]
//!
//! ## Testing
//!
//! Parser tests should use the embedded [samples](crate::spl::samples) and the fluent
//! [`assert_program`](crate::spl::testing::assert_program) helper.

pub mod api;
pub mod combinators;
pub mod declarations;
pub mod error;
pub mod expressions;

pub use crate::spl::ast::Program;
pub use api::{parse, parse_recovering, parse_source, ParseOutput};
pub use error::{Expectation, ParseFailure, SyntaxError};
