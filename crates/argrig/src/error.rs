//! Error types for command construction, parsing and execution.

use std::fmt;

use thiserror::Error;

use crate::mapper::BoxError;
use crate::text::indent_lines;

/// A single parser failed to produce a value from the token it claimed.
#[derive(Debug, Error)]
pub enum ArgumentParsingError {
    #[error("could not map value '{raw}' for argument {parser}: {source}")]
    Mapping {
        parser: String,
        raw: String,
        #[source]
        source: BoxError,
    },

    #[error("missing value for argument {parser}")]
    MissingValue { parser: String },
}

impl ArgumentParsingError {
    /// Display name of the parser that failed.
    pub fn parser(&self) -> &str {
        match self {
            Self::Mapping { parser, .. } | Self::MissingValue { parser } => parser,
        }
    }
}

/// Every problem found during one parse attempt.
#[derive(Debug, Default)]
pub struct ParsingFailure {
    pub errors: Vec<ArgumentParsingError>,
    pub missing: Vec<String>,
    pub unknown: Vec<String>,
}

impl ParsingFailure {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.missing.is_empty() && self.unknown.is_empty()
    }
}

impl fmt::Display for ParsingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = Vec::new();
        if !self.errors.is_empty() {
            lines.push("> Parsing errors:".to_string());
            lines.extend(self.errors.iter().map(|e| indent_lines(&e.to_string(), 2)));
        }
        if !self.missing.is_empty() {
            lines.push("> Missing required arguments:".to_string());
            lines.extend(self.missing.iter().map(|m| indent_lines(m, 2)));
        }
        if !self.unknown.is_empty() {
            lines.push("> Unknown arguments:".to_string());
            lines.extend(self.unknown.iter().map(|u| indent_lines(u, 2)));
        }
        write!(f, "Invalid input arguments:\n{}", lines.join("\n"))
    }
}

impl std::error::Error for ParsingFailure {}

#[derive(Debug, Clone, Error)]
pub enum CommandCreationError {
    #[error("command name must not be empty")]
    EmptyName,

    /// Two parsers of one command cannot coexist.
    #[error("command '{command}': parsers {first} and {second} conflict: {message}")]
    Conflict {
        command: String,
        first: String,
        second: String,
        message: String,
    },
}

#[derive(Debug, Clone, Error)]
pub enum CommanderCreationError {
    #[error("commander '{commander}' has no commands")]
    Empty { commander: String },

    #[error("commander '{commander}': command name '{command}' is used more than once")]
    DuplicateCommand { commander: String, command: String },

    #[error("commander '{commander}' has ambiguous names: {}", .conflicts.join("; "))]
    Ambiguous {
        commander: String,
        conflicts: Vec<String>,
    },
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("command '{command}' failed: {failure}")]
    InvalidInput {
        command: String,
        #[source]
        failure: ParsingFailure,
    },

    #[error("command '{command}' failed: {source}")]
    Instruction {
        command: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("commander '{commander}': no command matches '{input}'")]
    UnknownCommand { commander: String, input: String },
}

impl ExecutionError {
    /// Whether the failure happened before the instruction ran.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::UnknownCommand { .. })
    }
}
