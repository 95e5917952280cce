//! Main module for spl library functionality

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod processor;
pub mod samples;
pub mod semantic;

#[cfg(test)]
pub mod testing;
