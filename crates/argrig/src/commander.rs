//! Named groups of commands.

use indexmap::IndexMap;

use crate::command::Command;
use crate::doc;
use crate::error::{CommanderCreationError, ExecutionError};

const HELP_FLAGS: [&str; 2] = ["-h", "--help"];

/// Result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Executed,
    Help(String),
}

#[derive(Debug, Clone)]
pub struct Commander {
    name: String,
    commands: IndexMap<String, Command>,
}

pub struct CommanderBuilder {
    name: String,
    commands: Vec<Command>,
}

impl CommanderBuilder {
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn commands(mut self, commands: impl IntoIterator<Item = Command>) -> Self {
        self.commands.extend(commands);
        self
    }

    /// Validate command names and build the commander.
    ///
    /// Rejects duplicate names, and names where the last word of one command
    /// equals the last word of an argument name of another command. Such an
    /// argument could be mistaken for the longer command. Collisions inside a
    /// single command are allowed.
    pub fn build(self) -> Result<Commander, CommanderCreationError> {
        if self.commands.is_empty() {
            return Err(CommanderCreationError::Empty {
                commander: self.name,
            });
        }

        let mut commands: IndexMap<String, Command> = IndexMap::new();
        for command in self.commands {
            let name = command.name().to_string();
            if commands.contains_key(&name) {
                return Err(CommanderCreationError::DuplicateCommand {
                    commander: self.name,
                    command: name,
                });
            }
            commands.insert(name, command);
        }

        let conflicts = ambiguous_names(&commands);
        if !conflicts.is_empty() {
            tracing::debug!(commander = %self.name, count = conflicts.len(), "ambiguous names");
            return Err(CommanderCreationError::Ambiguous {
                commander: self.name,
                conflicts,
            });
        }

        Ok(Commander {
            name: self.name,
            commands,
        })
    }
}

fn last_segment(name: &str) -> &str {
    name.split_whitespace().next_back().unwrap_or(name)
}

fn ambiguous_names(commands: &IndexMap<String, Command>) -> Vec<String> {
    let mut conflicts = Vec::new();
    for (name, _) in commands {
        let segment = last_segment(name);
        for (other_name, other) in commands {
            if other_name == name {
                continue;
            }
            for parser in other.parsers() {
                for arg in parser.names() {
                    if last_segment(arg) == segment {
                        conflicts.push(format!(
                            "command '{name}' and argument '{arg}' of command '{other_name}' both end in '{segment}'"
                        ));
                    }
                }
            }
        }
    }
    conflicts
}

impl Commander {
    pub fn builder(name: &str) -> CommanderBuilder {
        CommanderBuilder {
            name: name.trim().to_string(),
            commands: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    /// Find the command whose words form the longest prefix of `tokens`.
    ///
    /// Returns the command and the tokens following its name.
    pub fn resolve<'t>(&self, tokens: &'t [String]) -> Option<(&Command, &'t [String])> {
        self.commands
            .values()
            .filter_map(|cmd| {
                let words: Vec<&str> = cmd.name().split_whitespace().collect();
                let matches = !words.is_empty()
                    && words.len() <= tokens.len()
                    && words.iter().zip(tokens).all(|(w, t)| w == t);
                matches.then_some((cmd, words.len()))
            })
            .max_by_key(|(_, len)| *len)
            .map(|(cmd, len)| (cmd, &tokens[len..]))
    }

    /// Dispatch `tokens` to the matching command.
    ///
    /// No tokens or a lone `-h`/`--help` renders the command overview; a
    /// command followed only by `-h`/`--help` renders its help unless it
    /// declares a parser with that name.
    pub fn execute<I, S>(&self, tokens: I) -> Result<Dispatch, ExecutionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() || is_help_request(&tokens) {
            return Ok(Dispatch::Help(self.doc()));
        }

        let Some((command, rest)) = self.resolve(&tokens) else {
            return Err(ExecutionError::UnknownCommand {
                commander: self.name.clone(),
                input: tokens.join(" "),
            });
        };
        tracing::debug!(commander = %self.name, command = command.name(), "dispatching");

        if is_help_request(rest) && command.find_parser(&rest[0]).is_none() {
            return Ok(Dispatch::Help(command.doc()));
        }

        command.execute(rest.iter().cloned())?;
        Ok(Dispatch::Executed)
    }

    /// Overview of all commands.
    pub fn doc(&self) -> String {
        doc::render_commander(self)
    }
}

fn is_help_request(tokens: &[String]) -> bool {
    matches!(tokens, [only] if HELP_FLAGS.contains(&only.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{flag_option, operand, valued_option};
    use std::sync::{Arc, Mutex};

    #[test]
    fn rejects_duplicate_command_names() {
        let err = Commander::builder("conflictCommander-CommandNames")
            .command(Command::builder("samename").build().unwrap())
            .command(Command::builder("my other samename").build().unwrap())
            .command(Command::builder("samename").build().unwrap())
            .build()
            .unwrap_err();
        match &err {
            CommanderCreationError::DuplicateCommand { command, .. } => {
                assert_eq!(command, "samename")
            }
            other => panic!("expected DuplicateCommand, got: {other:?}"),
        }
        assert!(err.to_string().contains("samename"));
    }

    #[test]
    fn last_segment_collision_within_one_command_is_allowed() {
        let cmd = Command::builder("commandName second-part one")
            .parser(valued_option("one", &[]))
            .build()
            .unwrap();
        assert!(Commander::builder("c").command(cmd).build().is_ok());
    }

    #[test]
    fn last_segment_collision_across_commands_is_rejected() {
        let long = Command::builder("commandName second-part one")
            .parser(operand(0))
            .build()
            .unwrap();
        let short = Command::builder("commandName second-part")
            .parser(valued_option("-o", &["one", "two", "three"]))
            .parser(flag_option("-f", &["any", "second-part"]))
            .build()
            .unwrap();
        let err = Commander::builder("conflictCommander-ArgumentNames")
            .commands([long, short])
            .build()
            .unwrap_err();
        let msg = err.to_string();
        for word in [
            "commandName second-part one",
            "commandName second-part",
            "one",
            "second-part",
        ] {
            assert!(msg.contains(word), "missing '{word}' in: {msg}");
        }
    }

    #[test]
    fn identical_parser_sets_do_not_conflict() {
        let make = |name: &str| {
            Command::builder(name)
                .parser(valued_option("-a", &["--all"]))
                .parser(operand(0))
                .instruction(|_| Ok(()))
                .build()
                .unwrap()
        };
        let commander = Commander::builder("tool")
            .commands([make("first"), make("second")])
            .build()
            .unwrap();
        assert_eq!(commander.commands().count(), 2);
    }

    #[test]
    fn empty_commander_is_rejected() {
        let err = Commander::builder("nothing").build().unwrap_err();
        assert!(matches!(err, CommanderCreationError::Empty { .. }));
    }

    #[test]
    fn resolves_longest_command_prefix() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let log = |tag: &'static str| {
            let calls = Arc::clone(&calls);
            move |args: &crate::ParsedArgs| {
                let arg = args.get_str("OPERAND0").unwrap_or("-").to_string();
                calls.lock().unwrap().push(format!("{tag}:{arg}"));
                Ok::<(), anyhow::Error>(())
            }
        };
        let commander = Commander::builder("tool")
            .command(
                Command::builder("config")
                    .parser(operand(0))
                    .instruction(log("config"))
                    .build()
                    .unwrap(),
            )
            .command(
                Command::builder("config set")
                    .parser(operand(0))
                    .instruction(log("set"))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        assert_eq!(commander.execute(["config", "set", "k"]).unwrap(), Dispatch::Executed);
        assert_eq!(commander.execute(["config", "k"]).unwrap(), Dispatch::Executed);
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["set:k".to_string(), "config:k".to_string()]
        );
    }

    #[test]
    fn unknown_command_is_an_input_error() {
        let commander = Commander::builder("tool")
            .command(Command::builder("run").build().unwrap())
            .build()
            .unwrap();
        let err = commander.execute(["walk", "fast"]).unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("walk fast"));
    }

    #[test]
    fn help_requests() {
        let commander = Commander::builder("tool")
            .command(
                Command::builder("run")
                    .description("Run things.")
                    .build()
                    .unwrap(),
            )
            .command(
                Command::builder("show")
                    .parser(flag_option("-h", &["--human"]))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let Dispatch::Help(overview) = commander.execute(Vec::<String>::new()).unwrap() else {
            panic!("expected Help");
        };
        assert!(overview.starts_with("Commands of tool:\n"));
        assert!(overview.contains("  run  Run things.\n"));
        assert_eq!(
            commander.execute(["--help"]).unwrap(),
            Dispatch::Help(overview)
        );

        let Dispatch::Help(run_help) = commander.execute(["run", "-h"]).unwrap() else {
            panic!("expected Help");
        };
        assert!(run_help.starts_with("Help for run\n"));

        // `show` claims -h itself.
        assert_eq!(commander.execute(["show", "-h"]).unwrap(), Dispatch::Executed);
    }

    #[test]
    fn parsing_failure_propagates() {
        let commander = Commander::builder("tool")
            .command(
                Command::builder("run")
                    .parser(valued_option("-a", &[]).with_required(true))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        match commander.execute(["run"]).unwrap_err() {
            ExecutionError::InvalidInput { command, failure } => {
                assert_eq!(command, "run");
                assert_eq!(failure.missing, vec!["-a".to_string()]);
            }
            other => panic!("expected InvalidInput, got: {other:?}"),
        }
    }
}
