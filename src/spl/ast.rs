//! AST definitions for SPL
//!
//! ## Modules
//!
//! - `node` - node type definitions (declarations, conditions, expressions, literals)
//! - `traits` - the [`AstNode`] interface, the borrowed [`Node`] view and [`walk`]

pub mod node;
pub mod traits;

pub use node::{
    ActionSet, ArithOp, AttributeAccess, CompareOp, Comparison, Condition, Declaration, Effect,
    Expr, Literal, PolicyDef, Program, ResourceDef, RoleDef, UnaryOp, UserDef,
};
pub use traits::{walk, AstNode, Node};
