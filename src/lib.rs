//! # spl
//!
//! Front-end for SPL, the Secure Policy Language: role, user and resource
//! declarations plus ALLOW/DENY rules guarded by conditions over `time`,
//! `user` and `resource` attributes.
//!
//! Stages
//!
//! The pipeline is strictly sequential and every stage owns its output until it
//! hands it to the next one:
//!
//! src/spl
//!   ├── lexer        source text -> tokens (logos scanner + one-token lookback)
//!   ├── parser       tokens -> Program (chumsky grammar)
//!   ├── ast          node model shared by everything below
//!   ├── semantic     Program -> symbol tables + semantic errors
//!   └── formats      Program <-> generic nested map, tree view
//!
//! [`spl::pipeline::compile`] runs all of them and collects every diagnostic.
//! Nothing here evaluates policies against requests; the output is a validated
//! structural representation for downstream tools.
//!
//! Test helpers live in `spl::testing`, compiled for unit tests only.

pub mod spl;
