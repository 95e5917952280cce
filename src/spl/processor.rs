//! Processing API for SPL sources
//!
//! Renders one stage of the front-end (tokens, tree or diagnostics) in a named
//! format. Format strings are `<stage>-<format>`:
//!
//! | stage         | formats                    |
//! |---------------|----------------------------|
//! | `token`       | `simple`, `json`           |
//! | `ast`         | `json`, `yaml`, `treeviz`  |
//! | `diagnostics` | `simple`, `json`           |
//!
//! ```rust,ignore
//! use spl::spl::processor::{process_source, ProcessingSpec};
//!
//! let spec = ProcessingSpec::from_string("ast-treeviz")?;
//! let tree = process_source("ROLE Admin {can: *}", &spec)?;
//! ```

use thiserror::Error;

use crate::spl::config::Config;
use crate::spl::diagnostics::Diagnostic;
use crate::spl::formats::{to_json_string, to_treeviz_str, to_yaml_string};
use crate::spl::lexer::{lex, Token};
use crate::spl::parser::parse_source;
use crate::spl::pipeline::compile;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
    Diagnostics,
}

impl ProcessingStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
            ProcessingStage::Diagnostics => "diagnostics",
        }
    }
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
    Treeviz,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Treeviz => "treeviz",
        }
    }
}

/// A stage paired with the format to render it in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-treeviz"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            "diagnostics" => ProcessingStage::Diagnostics,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            "treeviz" => OutputFormat::Treeviz,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        let spec = ProcessingSpec { stage, format };
        if !Self::available_specs().contains(&spec) {
            return Err(ProcessingError::InvalidFormatType(format!(
                "Format '{}' not supported for {} stage",
                format.as_str(),
                stage.as_str()
            )));
        }
        Ok(spec)
    }

    /// Every supported stage/format pair
    pub fn available_specs() -> Vec<ProcessingSpec> {
        [
            (ProcessingStage::Token, OutputFormat::Simple),
            (ProcessingStage::Token, OutputFormat::Json),
            (ProcessingStage::Ast, OutputFormat::Json),
            (ProcessingStage::Ast, OutputFormat::Yaml),
            (ProcessingStage::Ast, OutputFormat::Treeviz),
            (ProcessingStage::Diagnostics, OutputFormat::Simple),
            (ProcessingStage::Diagnostics, OutputFormat::Json),
        ]
        .into_iter()
        .map(|(stage, format)| ProcessingSpec { stage, format })
        .collect()
    }
}

impl std::fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.stage.as_str(), self.format.as_str())
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid stage: {0}")]
    InvalidStage(String),

    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),

    #[error("Sample not found: {0}")]
    SampleNotFound(String),

    #[error("Failed to parse source: {0}")]
    Parse(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Render one stage of `source` in the format `spec` names
///
/// The `ast` stage needs a syntactically valid program and fails with the first
/// syntax error otherwise. The `diagnostics` stage never fails on bad input: that
/// is what it reports.
pub fn process_source(source: &str, spec: &ProcessingSpec) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => format_tokens(&lex(source), spec.format),
        ProcessingStage::Ast => {
            let program =
                parse_source(source).map_err(|e| ProcessingError::Parse(e.to_string()))?;
            match spec.format {
                OutputFormat::Json => Ok(to_json_string(&program)),
                OutputFormat::Yaml => to_yaml_string(&program)
                    .map_err(|e| ProcessingError::Serialization(e.to_string())),
                OutputFormat::Treeviz => Ok(to_treeviz_str(&program)),
                OutputFormat::Simple => Err(unsupported(spec)),
            }
        }
        ProcessingStage::Diagnostics => {
            let compilation = compile(source, &Config::default());
            format_diagnostics(&compilation.diagnostics, spec.format)
        }
    }
}

fn unsupported(spec: &ProcessingSpec) -> ProcessingError {
    ProcessingError::InvalidFormatType(format!("{} is not supported", spec))
}

/// Format tokens according to the specified format
fn format_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for token in tokens {
                result.push_str(&format!("{}\n", token));
            }
            Ok(result)
        }
        OutputFormat::Json => serde_json::to_string_pretty(tokens)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Yaml | OutputFormat::Treeviz => Err(ProcessingError::InvalidFormatType(
            format!("token-{} is not supported", format.as_str()),
        )),
    }
}

fn format_diagnostics(
    diagnostics: &[Diagnostic],
    format: OutputFormat,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for diagnostic in diagnostics {
                result.push_str(&format!("{}\n", diagnostic));
            }
            Ok(result)
        }
        OutputFormat::Json => serde_json::to_string_pretty(diagnostics)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Yaml | OutputFormat::Treeviz => Err(ProcessingError::InvalidFormatType(
            format!("diagnostics-{} is not supported", format.as_str()),
        )),
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ToString::to_string)
        .collect()
}
