use super::{map_claimed, resolve_default};
use crate::error::ArgumentParsingError;
use crate::input::{InputArgs, Position};
use crate::mapper::{ArgValue, DefaultSupplier, ValueMapper};

/// Positional argument.
///
/// Parsed in the last round: `position` counts only the tokens no named
/// option claimed, so `-v a b` puts `a` at position 0.
#[derive(Debug, Clone)]
pub struct OperandParser {
    position: usize,
    display_name: String,
    default: DefaultSupplier,
    mapper: ValueMapper,
    required: bool,
    description: String,
}

impl OperandParser {
    pub(crate) fn at(position: usize) -> Self {
        Self {
            position,
            display_name: format!("OPERAND{position}"),
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

    pub fn with_display_name(self, display_name: &str) -> Self {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return self;
        }
        Self {
            display_name: display_name.to_string(),
            ..self
        }
    }

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

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
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
        if at.rank != self.position {
            return Ok(None);
        }
        let Some(raw) = args.take(at.slot) else {
            return Ok(None);
        };
        tracing::trace!(parser = self.display_name(), slot = at.slot, "operand claimed");
        map_claimed(&self.display_name, &self.mapper, raw).map(Some)
    }

    pub(crate) fn default_value(&self) -> Result<Option<ArgValue>, ArgumentParsingError> {
        resolve_default(&self.display_name, self.required, &self.default, &self.mapper)
    }
}
