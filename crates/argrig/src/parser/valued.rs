use super::{collect_names, map_claimed, resolve_default};
use crate::error::ArgumentParsingError;
use crate::input::{InputArgs, Position};
use crate::mapper::{ArgValue, DefaultSupplier, ValueMapper};

/// Named option followed by its value, e.g. `--output out.txt`.
#[derive(Debug, Clone)]
pub struct ValuedParser {
    names: Vec<String>,
    default: DefaultSupplier,
    mapper: ValueMapper,
    required: bool,
    description: String,
}

impl ValuedParser {
    pub(crate) fn for_names(name: &str, aliases: &[&str]) -> Self {
        Self {
            names: collect_names(name, aliases),
            default: DefaultSupplier::none(),
            mapper: ValueMapper::string(),
            required: false,
            description: String::new(),
        }
    }

    pub fn with_mapper(self, mapper: ValueMapper) -> Self {
        Self { mapper, ..self }
    }

    pub fn with_description(self, description: &str) -> Self {
        Self {
            description: description.trim().to_string(),
            ..self
        }
    }

    /// Required options ignore any configured default.
    pub fn with_required(self, required: bool) -> Self {
        Self { required, ..self }
    }

    pub fn with_default(self, default: impl Into<String>) -> Self {
        Self {
            default: DefaultSupplier::constant(default),
            ..self
        }
    }

    pub fn with_default_supplier<F>(self, supplier: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self {
            default: DefaultSupplier::new(supplier),
            ..self
        }
    }

    pub fn primary_name(&self) -> &str {
        &self.names[0]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub(crate) fn parse(
        &self,
        args: &mut InputArgs,
        at: Position,
    ) -> Result<Option<ArgValue>, ArgumentParsingError> {
        let matches = args
            .get(at.slot)
            .is_some_and(|token| self.names.iter().any(|n| n == token));
        if !matches || args.take(at.slot).is_none() {
            return Ok(None);
        }
        let value = args.next_live(at.slot).and_then(|slot| args.take(slot));
        let Some(raw) = value else {
            return Err(ArgumentParsingError::MissingValue {
                parser: self.primary_name().to_string(),
            });
        };
        tracing::trace!(parser = self.primary_name(), slot = at.slot, "option claimed");
        map_claimed(self.primary_name(), &self.mapper, raw).map(Some)
    }

    pub(crate) fn default_value(&self) -> Result<Option<ArgValue>, ArgumentParsingError> {
        resolve_default(self.primary_name(), self.required, &self.default, &self.mapper)
    }
}
