//! Parser definitions.
//!
//! A command is configured with a set of [`ArgumentParser`]s. Each parser
//! claims tokens from an [`InputArgs`] buffer during [`Command::parse`]:
//!
//! - [`FlagParser`] claims a single named token (`-v`, `--verbose`).
//! - [`ValuedParser`] claims a named token and the token after it (`-o out.txt`).
//! - [`OperandParser`] claims the token at its position among the tokens that
//!   are left once all named tokens are gone.
//!
//! Parsers tombstone whatever they claim, also when mapping the claimed
//! token fails.
//!
//! [`Command::parse`]: crate::Command::parse

mod flag;
mod operand;
mod valued;

pub use flag::FlagParser;
pub use operand::OperandParser;
pub use valued::ValuedParser;

use crate::error::ArgumentParsingError;
use crate::input::{InputArgs, Position};
use crate::mapper::{ArgValue, DefaultSupplier, ValueMapper};

/// Round shared by flags and valued options.
pub const NAMED_PRIORITY: u32 = 0;
/// Operands go last so they only see tokens no option claimed.
pub const OPERAND_PRIORITY: u32 = u32::MAX;

/// Operand parser for `position`, mapping to `String`.
pub fn operand(position: usize) -> OperandParser {
    OperandParser::at(position)
}

/// Boolean flag recognised by `name` or any of `aliases`.
pub fn flag_option(name: &str, aliases: &[&str]) -> FlagParser {
    FlagParser::for_names(name, aliases)
}

/// Option taking a value in the next token, mapping to `String`.
pub fn valued_option(name: &str, aliases: &[&str]) -> ValuedParser {
    ValuedParser::for_names(name, aliases)
}

#[derive(Debug, Clone)]
pub enum ArgumentParser {
    Flag(FlagParser),
    Valued(ValuedParser),
    Operand(OperandParser),
}

impl ArgumentParser {
    /// Name used in diagnostics, help output and as key in parsed args.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Flag(p) => p.primary_name(),
            Self::Valued(p) => p.primary_name(),
            Self::Operand(p) => p.display_name(),
        }
    }

    /// All names the parser answers to; empty for operands.
    pub fn names(&self) -> &[String] {
        match self {
            Self::Flag(p) => p.names(),
            Self::Valued(p) => p.names(),
            Self::Operand(_) => &[],
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Flag(p) => p.description(),
            Self::Valued(p) => p.description(),
            Self::Operand(p) => p.description(),
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            Self::Flag(p) => p.is_required(),
            Self::Valued(p) => p.is_required(),
            Self::Operand(p) => p.is_required(),
        }
    }

    pub fn parsing_priority(&self) -> u32 {
        match self {
            Self::Flag(_) | Self::Valued(_) => NAMED_PRIORITY,
            Self::Operand(_) => OPERAND_PRIORITY,
        }
    }

    /// Try to claim the token at `at`.
    ///
    /// `Ok(None)` means the parser does not apply here. Claimed tokens are
    /// tombstoned in `args` before mapping, so they are gone even on error.
    pub fn parse(
        &self,
        args: &mut InputArgs,
        at: Position,
    ) -> Result<Option<ArgValue>, ArgumentParsingError> {
        match self {
            Self::Flag(p) => p.parse(args, at),
            Self::Valued(p) => p.parse(args, at),
            Self::Operand(p) => p.parse(args, at),
        }
    }

    /// Value used when no token was claimed. Required parsers have none.
    pub fn default_value(&self) -> Result<Option<ArgValue>, ArgumentParsingError> {
        match self {
            Self::Flag(p) => p.default_value(),
            Self::Valued(p) => p.default_value(),
            Self::Operand(p) => p.default_value(),
        }
    }

    /// Describe why `self` and `other` cannot live in the same command.
    ///
    /// Named parsers clash on shared names, operands on equal positions.
    /// A named parser never clashes with an operand.
    pub fn conflict_message(&self, other: &ArgumentParser) -> Option<String> {
        match (self, other) {
            (Self::Operand(a), Self::Operand(b)) => (a.position() == b.position())
                .then(|| format!("operands conflict on position {}", a.position())),
            (Self::Operand(_), _) | (_, Self::Operand(_)) => None,
            _ => {
                let shared: Vec<&str> = self
                    .names()
                    .iter()
                    .filter(|n| other.names().contains(*n))
                    .map(String::as_str)
                    .collect();
                (!shared.is_empty())
                    .then(|| format!("options share names: {}", shared.join(", ")))
            }
        }
    }

    /// Whether `name` refers to this parser.
    pub fn answers_to(&self, name: &str) -> bool {
        self.display_name() == name || self.names().iter().any(|n| n == name)
    }
}

impl From<FlagParser> for ArgumentParser {
    fn from(p: FlagParser) -> Self {
        Self::Flag(p)
    }
}

impl From<ValuedParser> for ArgumentParser {
    fn from(p: ValuedParser) -> Self {
        Self::Valued(p)
    }
}

impl From<OperandParser> for ArgumentParser {
    fn from(p: OperandParser) -> Self {
        Self::Operand(p)
    }
}

/// Primary name first, then unique aliases in the given order.
fn collect_names(name: &str, aliases: &[&str]) -> Vec<String> {
    let mut names = vec![name.to_string()];
    for &alias in aliases {
        if !names.iter().any(|n| n == alias) {
            names.push(alias.to_string());
        }
    }
    names
}

fn map_claimed(
    parser: &str,
    mapper: &ValueMapper,
    raw: String,
) -> Result<ArgValue, ArgumentParsingError> {
    mapper.map(&raw).map_err(|source| {
        tracing::trace!(parser, raw = %raw, "value mapping failed");
        ArgumentParsingError::Mapping {
            parser: parser.to_string(),
            raw,
            source,
        }
    })
}

fn resolve_default(
    parser: &str,
    required: bool,
    supplier: &DefaultSupplier,
    mapper: &ValueMapper,
) -> Result<Option<ArgValue>, ArgumentParsingError> {
    if required {
        return Ok(None);
    }
    supplier
        .get()
        .map(|raw| map_claimed(parser, mapper, raw))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_parsers_conflict_on_shared_name() {
        let a: ArgumentParser = valued_option("samename", &[]).into();
        let b: ArgumentParser = flag_option("-f", &["samename"]).into();
        let msg = a.conflict_message(&b).expect("conflict expected");
        assert!(msg.contains("samename"));
        assert!(b.conflict_message(&a).is_some());
    }

    #[test]
    fn distinct_named_parsers_do_not_conflict() {
        let a: ArgumentParser = valued_option("-a", &["--abc"]).into();
        let b: ArgumentParser = flag_option("-b", &["--bcd"]).into();
        assert!(a.conflict_message(&b).is_none());
    }

    #[test]
    fn operands_conflict_on_position_only() {
        let a: ArgumentParser = operand(0).into();
        let b: ArgumentParser = operand(0).with_display_name("FILE").into();
        let c: ArgumentParser = operand(1).into();
        let msg = a.conflict_message(&b).expect("conflict expected");
        assert!(msg.contains('0'));
        assert!(a.conflict_message(&c).is_none());
    }

    #[test]
    fn operand_never_conflicts_with_named() {
        let a: ArgumentParser = operand(0).with_display_name("X").into();
        let b: ArgumentParser = flag_option("-x", &[]).into();
        assert!(a.conflict_message(&b).is_none());
        assert!(b.conflict_message(&a).is_none());
    }

    #[test]
    fn priorities_put_operands_last() {
        let named: ArgumentParser = valued_option("-a", &[]).into();
        let op: ArgumentParser = operand(0).into();
        assert!(named.parsing_priority() < op.parsing_priority());
    }

    #[test]
    fn duplicate_aliases_are_dropped() {
        assert_eq!(collect_names("-a", &["--abc", "-a", "--abc"]), vec!["-a", "--abc"]);
    }
}
