//! Verified SPL sample programs
//!
//! These are the canonical SPL sources for tests and documentation. They are
//! embedded at compile time from the `samples/` directory, so tests never depend on
//! the working directory.
//!
//! Samples numbered below 100 are valid programs. From 100 on, each sample
//! exercises one family of diagnostics.
//!
//! ```rust,ignore
//! use spl::spl::samples::SplSources;
//!
//! let source = SplSources::get_string("030-full-program.spl")?;
//! let tokens = SplSources::get_tokens("000-roles.spl")?;
//! let tree = SplSources::get_processed("020-policies.spl", "ast-treeviz")?;
//! ```

use crate::spl::lexer::{lex, Token};
use crate::spl::processor::{process_source, ProcessingError, ProcessingSpec};

const SAMPLES: &[(&str, &str)] = &[
    ("000-roles.spl", include_str!("../../samples/000-roles.spl")),
    (
        "010-users-resources.spl",
        include_str!("../../samples/010-users-resources.spl"),
    ),
    (
        "020-policies.spl",
        include_str!("../../samples/020-policies.spl"),
    ),
    (
        "030-full-program.spl",
        include_str!("../../samples/030-full-program.spl"),
    ),
    (
        "100-duplicate-declarations.spl",
        include_str!("../../samples/100-duplicate-declarations.spl"),
    ),
    (
        "110-undefined-references.spl",
        include_str!("../../samples/110-undefined-references.spl"),
    ),
    (
        "120-type-errors.spl",
        include_str!("../../samples/120-type-errors.spl"),
    ),
    (
        "130-syntax-errors.spl",
        include_str!("../../samples/130-syntax-errors.spl"),
    ),
    (
        "140-lexical-errors.spl",
        include_str!("../../samples/140-lexical-errors.spl"),
    ),
];

/// Main interface for accessing SPL sample files
pub struct SplSources;

impl SplSources {
    /// Names of every embedded sample, in order
    pub fn available() -> Vec<&'static str> {
        SAMPLES.iter().map(|(name, _)| *name).collect()
    }

    /// Valid samples only
    pub fn valid() -> Vec<&'static str> {
        SAMPLES
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| name.as_bytes().first() == Some(&b'0'))
            .collect()
    }

    pub fn get_str(name: &str) -> Result<&'static str, ProcessingError> {
        SAMPLES
            .iter()
            .find(|(sample, _)| *sample == name)
            .map(|(_, content)| *content)
            .ok_or_else(|| ProcessingError::SampleNotFound(name.to_string()))
    }

    pub fn get_string(name: &str) -> Result<String, ProcessingError> {
        Self::get_str(name).map(str::to_string)
    }

    pub fn get_tokens(name: &str) -> Result<Vec<Token>, ProcessingError> {
        Self::get_str(name).map(lex)
    }

    /// Run a sample through the processor, e.g. with `"ast-json"`
    pub fn get_processed(name: &str, format: &str) -> Result<String, ProcessingError> {
        let spec = ProcessingSpec::from_string(format)?;
        process_source(Self::get_str(name)?, &spec)
    }
}
