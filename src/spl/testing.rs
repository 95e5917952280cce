//! Testing utilities for AST assertions
//!
//! # Parser Testing Guidelines
//!
//! 1. **[SplSources](crate::spl::samples::SplSources)** for test content. SPL details
//!    are easy to get subtly wrong when typed inline (a lower-case `role` that should be
//!    `ROLE`, a `*` after a comma). Sample files are verified once and shared.
//! 2. **[assert_program](fn@assert_program)** for tree verification. Counting nodes says
//!    little; the fluent API checks shape and attributes of whole declarations at once.
//!
//! ```rust,ignore
//! let source = SplSources::get_str("020-policies.spl").unwrap();
//! let program = parse_source(source).unwrap();
//!
//! assert_program(&program)
//!     .declaration_count(5)
//!     .declaration(2, |d| {
//!         d.assert_policy()
//!             .effect(Effect::Allow)
//!             .actions(&["read", "write"])
//!             .resource("DB_Finance")
//!             .condition("(time.hour > 9 AND time.hour < 17)");
//!     });
//! ```
//!
//! Conditions are compared through their fully parenthesized rendering, which pins
//! down precedence and associativity without spelling out every node.

mod testing_assertions;

pub use testing_assertions::{
    assert_program, DeclarationAssertion, PolicyAssertion, ProgramAssertion, ResourceAssertion,
    RoleAssertion, UserAssertion,
};
