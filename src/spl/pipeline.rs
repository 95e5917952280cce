//! Lexer -> parser -> analyzer in one call
//!
//! Stages run strictly in order and each owns its output until the next takes it.
//! Nothing short-circuits: lexical problems still produce tokens, and a program
//! with syntax errors is still analyzed for whatever declarations did parse.
//! Diagnostics are reported lex first, then syntax, then semantic.

use crate::spl::ast::Program;
use crate::spl::config::Config;
use crate::spl::diagnostics::Diagnostic;
use crate::spl::lexer::{tokenize, Token};
use crate::spl::parser::{parse, parse_recovering};

/// Everything the front-end produced for one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub fn compile(source: &str, config: &Config) -> Compilation {
    let span = tracing::debug_span!("compile", bytes = source.len());
    let _enter = span.enter();

    let lexed = tokenize(source);
    let mut diagnostics = lexed.diagnostics;

    let program = if config.parse.recover {
        let output = parse_recovering(&lexed.tokens);
        diagnostics.extend(output.errors.iter().map(|e| e.to_diagnostic()));
        output.program
    } else {
        match parse(&lexed.tokens) {
            Ok(program) => program,
            Err(error) => {
                diagnostics.push(error.to_diagnostic());
                Program::new(Vec::new())
            }
        }
    };

    let analysis = config.analyzer().analyze(&program);
    diagnostics.extend(analysis.diagnostics());

    tracing::debug!(
        tokens = lexed.tokens.len(),
        declarations = program.declarations.len(),
        diagnostics = diagnostics.len(),
        "compiled"
    );
    Compilation {
        tokens: lexed.tokens,
        program,
        diagnostics,
    }
}
