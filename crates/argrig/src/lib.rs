//! Declarative command-line parsing.
//!
//! A [`Command`] is a name, a description, a set of parsers and an instruction.
//! Parsers come in three kinds:
//! - flags (`-v`), which resolve to `true` when present,
//! - valued options (`-o out.txt`), which take the following token,
//! - operands, which take a token by position once all options are removed.
//!
//! Conflicting parsers are rejected when the command is built. At runtime,
//! [`Command::parse`] collects every problem (bad values, missing required
//! arguments, leftover tokens) into one [`ParsingResult`] so users see all
//! of them at once.
//!
//! ```
//! use argrig::{Command, ValueMapper, flag_option, operand, valued_option};
//!
//! let cmd = Command::builder("greet")
//!     .description("Say hello.")
//!     .parser(operand(0).with_display_name("NAME").with_required(true))
//!     .parser(flag_option("-l", &["--loud"]))
//!     .parser(
//!         valued_option("-t", &["--times"])
//!             .with_mapper(ValueMapper::parsed::<u32>())
//!             .with_default("1"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let result = cmd.parse(["--times", "2", "ada"]);
//! assert!(result.is_success());
//! assert_eq!(result.args().get_str("NAME"), Some("ada"));
//! assert_eq!(result.args().get::<u32>("-t"), Some(&2));
//! assert_eq!(result.args().get::<bool>("--loud"), Some(&false));
//! ```

pub mod command;
pub mod commander;
mod doc;
pub mod error;
pub mod input;
pub mod mapper;
pub mod parser;
pub mod result;
pub mod text;

pub use command::{Command, CommandBuilder};
pub use commander::{Commander, CommanderBuilder, Dispatch};
pub use error::{
    ArgumentParsingError, CommandCreationError, CommanderCreationError, ExecutionError,
    ParsingFailure,
};
pub use input::{InputArgs, Position};
pub use mapper::{ArgValue, BoxError, DefaultSupplier, ValueMapper};
pub use parser::{
    ArgumentParser, FlagParser, OperandParser, ValuedParser, flag_option, operand, valued_option,
};
pub use result::{ParsedArgs, ParsingResult};
