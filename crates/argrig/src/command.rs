//! Commands: a name, a set of parsers and the instruction to run.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::doc;
use crate::error::{CommandCreationError, ExecutionError, ParsingFailure};
use crate::input::InputArgs;
use crate::mapper::ArgValue;
use crate::parser::ArgumentParser;
use crate::result::{ParsedArgs, ParsingResult};

type Instruction = Arc<dyn Fn(&ParsedArgs) -> anyhow::Result<()> + Send + Sync>;

fn no_op(_: &ParsedArgs) -> anyhow::Result<()> {
    Ok(())
}

/// A validated, reusable command.
///
/// Commands hold no per-invocation state: every call to [`Command::parse`]
/// works on its own token buffer, so a command can be shared across threads.
#[derive(Clone)]
pub struct Command {
    name: String,
    description: String,
    parsers: Vec<ArgumentParser>,
    /// Parser indices grouped by parsing priority, lowest first.
    tiers: Vec<Vec<usize>>,
    instruction: Instruction,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parsers", &self.parsers)
            .finish_non_exhaustive()
    }
}

pub struct CommandBuilder {
    name: String,
    description: String,
    parsers: Vec<ArgumentParser>,
    instruction: Instruction,
}

impl CommandBuilder {
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.trim().to_string();
        self
    }

    pub fn parser(mut self, parser: impl Into<ArgumentParser>) -> Self {
        self.parsers.push(parser.into());
        self
    }

    pub fn parsers<I, P>(mut self, parsers: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ArgumentParser>,
    {
        self.parsers.extend(parsers.into_iter().map(Into::into));
        self
    }

    /// Action run with the parsed values on [`Command::execute`].
    pub fn instruction<F>(mut self, instruction: F) -> Self
    where
        F: Fn(&ParsedArgs) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.instruction = Arc::new(instruction);
        self
    }

    /// Validate the parser set and build the command.
    ///
    /// Fails on the first pair of parsers that conflict.
    pub fn build(self) -> Result<Command, CommandCreationError> {
        if self.name.is_empty() {
            return Err(CommandCreationError::EmptyName);
        }

        for (i, first) in self.parsers.iter().enumerate() {
            for second in &self.parsers[i + 1..] {
                let conflict = first
                    .conflict_message(second)
                    .or_else(|| identity_clash(first, second));
                if let Some(message) = conflict {
                    tracing::debug!(command = %self.name, %message, "parser conflict");
                    return Err(CommandCreationError::Conflict {
                        command: self.name,
                        first: first.display_name().to_string(),
                        second: second.display_name().to_string(),
                        message,
                    });
                }
            }
        }

        let mut by_priority: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (idx, parser) in self.parsers.iter().enumerate() {
            by_priority
                .entry(parser.parsing_priority())
                .or_default()
                .push(idx);
        }

        Ok(Command {
            name: self.name,
            description: self.description,
            parsers: self.parsers,
            tiers: by_priority.into_values().collect(),
            instruction: self.instruction,
        })
    }
}

/// Parsed values are keyed by display name and looked up by alias, so no
/// display name may equal another parser's display name or alias.
fn identity_clash(a: &ArgumentParser, b: &ArgumentParser) -> Option<String> {
    if a.display_name() == b.display_name() {
        return Some(format!("parsers share display name {}", a.display_name()));
    }
    [(a, b), (b, a)].into_iter().find_map(|(x, y)| {
        y.names().iter().any(|n| n == x.display_name()).then(|| {
            format!(
                "display name {} is an alias of {}",
                x.display_name(),
                y.display_name()
            )
        })
    })
}

impl Command {
    pub fn builder(name: &str) -> CommandBuilder {
        CommandBuilder {
            name: name.trim().to_string(),
            description: String::new(),
            parsers: Vec::new(),
            instruction: Arc::new(no_op),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parsers(&self) -> &[ArgumentParser] {
        &self.parsers
    }

    /// The parser answering to `name`, by display name or alias.
    pub fn find_parser(&self, name: &str) -> Option<&ArgumentParser> {
        self.parsers.iter().find(|p| p.answers_to(name))
    }

    /// Parse `tokens` into values.
    ///
    /// Parsers are offered tokens tier by tier, lowest priority first. Within
    /// a tier every live token is offered left to right to each parser that
    /// has neither produced a value nor failed yet. Parsers left without a
    /// value fall back to their default afterwards.
    pub fn parse<I, S>(&self, tokens: I) -> ParsingResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = InputArgs::new(tokens);
        tracing::debug!(command = %self.name, tokens = args.len(), "parsing arguments");

        let mut values: Vec<Option<ArgValue>> = vec![None; self.parsers.len()];
        let mut settled = vec![false; self.parsers.len()];
        let mut failure = ParsingFailure::default();

        for tier in &self.tiers {
            for at in args.live_positions() {
                for &idx in tier {
                    if args.is_consumed(at.slot) {
                        break;
                    }
                    if settled[idx] {
                        continue;
                    }
                    match self.parsers[idx].parse(&mut args, at) {
                        Ok(Some(value)) => {
                            values[idx] = Some(value);
                            settled[idx] = true;
                        }
                        Ok(None) => {}
                        Err(err) => {
                            failure.errors.push(err);
                            settled[idx] = true;
                        }
                    }
                }
            }
        }

        for (idx, parser) in self.parsers.iter().enumerate() {
            if settled[idx] {
                continue;
            }
            match parser.default_value() {
                Ok(Some(value)) => {
                    tracing::trace!(parser = parser.display_name(), "default applied");
                    values[idx] = Some(value);
                }
                Ok(None) if parser.is_required() => {
                    failure.missing.push(parser.display_name().to_string());
                }
                Ok(None) => {}
                Err(err) => failure.errors.push(err),
            }
        }

        failure.unknown = args.remaining();

        let mut parsed = ParsedArgs::default();
        for (parser, value) in self.parsers.iter().zip(values) {
            if let Some(value) = value {
                parsed.insert(parser.display_name(), parser.names(), value);
            }
        }

        tracing::debug!(
            command = %self.name,
            errors = failure.errors.len(),
            missing = failure.missing.len(),
            unknown = failure.unknown.len(),
            "parsing finished"
        );
        ParsingResult::new(parsed, failure)
    }

    /// Parse `tokens` and run the instruction with the result.
    pub fn execute<I, S>(&self, tokens: I) -> Result<(), ExecutionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = self
            .parse(tokens)
            .into_args()
            .map_err(|failure| ExecutionError::InvalidInput {
                command: self.name.clone(),
                failure,
            })?;
        (self.instruction)(&args).map_err(|source| ExecutionError::Instruction {
            command: self.name.clone(),
            source,
        })
    }

    /// Help text for this command.
    pub fn doc(&self) -> String {
        doc::render_command(self)
    }
}
