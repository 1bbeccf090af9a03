//! Outcome of one parse attempt.

use std::any::Any;

use indexmap::IndexMap;

use crate::error::{ArgumentParsingError, ParsingFailure};
use crate::mapper::ArgValue;

/// Values resolved for a command, keyed by parser display name in
/// declaration order.
#[derive(Debug, Clone, Default)]
pub struct ParsedArgs {
    values: IndexMap<String, ArgValue>,
    aliases: IndexMap<String, String>,
}

impl ParsedArgs {
    pub(crate) fn insert(&mut self, display_name: &str, names: &[String], value: ArgValue) {
        for name in names {
            if name != display_name {
                self.aliases.insert(name.clone(), display_name.to_string());
            }
        }
        self.values.insert(display_name.to_string(), value);
    }

    fn key<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    /// Typed value for a display name or alias.
    ///
    /// Returns `None` if nothing was resolved or the value is not a `T`.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.values.get(self.key(name))?.downcast_ref::<T>()
    }

    /// Shorthand for `get::<String>`.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get::<String>(name).map(String::as_str)
    }

    pub fn get_raw(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(self.key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(self.key(name))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Everything one call to [`Command::parse`](crate::Command::parse) found out.
///
/// The attempt succeeded iff there are no errors, no missing required
/// parsers and no unknown tokens.
#[derive(Debug, Default)]
pub struct ParsingResult {
    args: ParsedArgs,
    failure: ParsingFailure,
}

impl ParsingResult {
    pub(crate) fn new(args: ParsedArgs, failure: ParsingFailure) -> Self {
        Self { args, failure }
    }

    pub fn args(&self) -> &ParsedArgs {
        &self.args
    }

    pub fn errors(&self) -> &[ArgumentParsingError] {
        &self.failure.errors
    }

    /// Display names of required parsers that resolved nothing.
    pub fn missing(&self) -> &[String] {
        &self.failure.missing
    }

    /// Tokens no parser claimed, in input order.
    pub fn unknown(&self) -> &[String] {
        &self.failure.unknown
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_empty()
    }

    pub fn into_args(self) -> Result<ParsedArgs, ParsingFailure> {
        if self.failure.is_empty() {
            Ok(self.args)
        } else {
            Err(self.failure)
        }
    }
}
