//! Help text rendering.

use crate::command::Command;
use crate::commander::Commander;
use crate::parser::ArgumentParser;
use crate::text::{WRAP_WIDTH, columns, wrap};

/// Named options sorted by primary name, then operands by position.
fn doc_order(cmd: &Command) -> Vec<&ArgumentParser> {
    let mut named: Vec<&ArgumentParser> = Vec::new();
    let mut operands = Vec::new();
    for parser in cmd.parsers() {
        match parser {
            ArgumentParser::Operand(op) => operands.push((op.position(), parser)),
            _ => named.push(parser),
        }
    }
    named.sort_by(|a, b| a.display_name().cmp(b.display_name()));
    operands.sort_by_key(|(position, _)| *position);
    named.extend(operands.into_iter().map(|(_, p)| p));
    named
}

fn synopsis_token(parser: &ArgumentParser) -> String {
    let token = match parser {
        ArgumentParser::Valued(p) => format!("{} <value>", p.primary_name()),
        _ => parser.display_name().to_string(),
    };
    if parser.is_required() {
        token
    } else {
        format!("[{token}]")
    }
}

fn parameter_row(parser: &ArgumentParser) -> Vec<Vec<String>> {
    let mut aliases: Vec<String> = parser.names().iter().skip(1).cloned().collect();
    aliases.sort();

    let mut indicators = Vec::new();
    if parser.is_required() {
        indicators.push("required");
    }
    if matches!(parser, ArgumentParser::Flag(_)) {
        indicators.push("flag");
    }
    let indicator = if indicators.is_empty() {
        Vec::new()
    } else {
        vec![format!("({})", indicators.join(", "))]
    };

    let description = if parser.description().is_empty() {
        Vec::new()
    } else {
        vec![parser.description().to_string()]
    };

    vec![
        vec![parser.display_name().to_string()],
        aliases,
        indicator,
        description,
    ]
}

pub(crate) fn render_command(cmd: &Command) -> String {
    let parsers = doc_order(cmd);

    let mut synopsis = vec![cmd.name().to_string()];
    synopsis.extend(parsers.iter().map(|p| synopsis_token(p)));

    let mut out = format!("Help for {}\n\nSynopsis:\n{}\n", cmd.name(), synopsis.join(" "));

    if !cmd.description().is_empty() {
        out.push('\n');
        for line in wrap(cmd.description(), WRAP_WIDTH) {
            out.push_str(&line);
            out.push('\n');
        }
    }

    if !parsers.is_empty() {
        out.push_str("\nParameters:\n");
        let rows: Vec<Vec<Vec<String>>> = parsers.iter().map(|p| parameter_row(p)).collect();
        for line in columns(&rows) {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out
}

pub(crate) fn render_commander(commander: &Commander) -> String {
    let mut out = format!("Commands of {}:\n", commander.name());
    let rows: Vec<Vec<Vec<String>>> = commander
        .commands()
        .map(|cmd| {
            let summary: Vec<String> = wrap(cmd.description(), WRAP_WIDTH)
                .into_iter()
                .take(1)
                .collect();
            vec![vec![cmd.name().to_string()], summary]
        })
        .collect();
    for line in columns(&rows) {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("\nRun '<command> --help' for details on a command.\n");
    out
}

#[cfg(test)]
mod tests {
    use crate::command::Command;
    use crate::parser::{flag_option, operand, valued_option};

    #[test]
    fn valued_option_without_descriptions() {
        let cmd = Command::builder("run")
            .parser(valued_option("-a", &[]))
            .build()
            .unwrap();
        let expected = "Help for run\n\
                        \n\
                        Synopsis:\n\
                        run [-a <value>]\n\
                        \n\
                        Parameters:\n\
                        -a\n";
        assert_eq!(cmd.doc(), expected);
    }

    #[test]
    fn command_description_is_wrapped() {
        let cmd = Command::builder("run")
            .description(
                "This is a lengthy Description that should be wrapped into a new line. \
                 Hopefully this works out fine: A new line for this command. Yeah!",
            )
            .parser(valued_option("-a", &[]))
            .build()
            .unwrap();
        let expected = "Help for run\n\
                        \n\
                        Synopsis:\n\
                        run [-a <value>]\n\
                        \n\
                        This is a lengthy Description that should be wrapped into a new line. Hopefully\n\
                        this works out fine: A new line for this command. Yeah!\n\
                        \n\
                        Parameters:\n\
                        -a\n";
        assert_eq!(cmd.doc(), expected);
    }

    #[test]
    fn required_option_is_bare_and_marked() {
        let cmd = Command::builder("run")
            .parser(
                valued_option("-a", &[])
                    .with_required(true)
                    .with_default("some default")
                    .with_description("Some meaningful argument. Defaults to 'null' if missing."),
            )
            .build()
            .unwrap();
        let doc = cmd.doc();
        assert!(doc.contains("\nrun -a <value>\n"));
        assert!(doc.ends_with(
            "Parameters:\n-a (required) Some meaningful argument. Defaults to 'null' if missing.\n"
        ));
    }

    #[test]
    fn aliases_are_listed_one_per_line() {
        let cmd = Command::builder("run")
            .parser(
                valued_option("-a", &["--abc", "--abcdefg", "--another-alias"])
                    .with_description("Some meaningful argument. Defaults to 'null' if missing."),
            )
            .build()
            .unwrap();
        let expected_table = "Parameters:\n\
            -a --abc           Some meaningful argument. Defaults to 'null' if missing.\n   \
            --abcdefg\n   \
            --another-alias\n";
        assert!(cmd.doc().ends_with(expected_table), "{}", cmd.doc());
    }

    #[test]
    fn named_options_sorted_alphabetically() {
        let cmd = Command::builder("run")
            .description(
                "This is a command that runs into nothing, the great void and across all \
                 emptiness of space and time as long as this documentation string is taking \
                 to consume all that is left.",
            )
            .parser(
                valued_option("-p", &["--poop", "--why-so-much", "--POOP"])
                    .with_description("Poopdipoop. Another Description. Not too long."),
            )
            .parser(
                valued_option("-a", &["--abc"])
                    .with_required(true)
                    .with_description("Some meaningful argument. Defaults to 'null' if missing."),
            )
            .build()
            .unwrap();
        let expected = "Help for run\n\
            \n\
            Synopsis:\n\
            run -a <value> [-p <value>]\n\
            \n\
            This is a command that runs into nothing, the great void and across all\n\
            emptiness of space and time as long as this documentation string is taking to\n\
            consume all that is left.\n\
            \n\
            Parameters:\n\
            -a --abc         (required) Some meaningful argument. Defaults to 'null' if missing.\n\
            -p --POOP                   Poopdipoop. Another Description. Not too long.\n   \
            --poop\n   \
            --why-so-much\n";
        assert_eq!(cmd.doc(), expected);
    }

    #[test]
    fn options_before_operands() {
        let cmd = Command::builder("run")
            .description("Some text to have anything at all.")
            .parser(
                operand(1)
                    .with_description("The second operand. This one also has a beautiful name.")
                    .with_display_name("Karl"),
            )
            .parser(
                flag_option("-f", &["--flag-in-the-wind"])
                    .with_description("Changes as the wind blows."),
            )
            .parser(operand(0).with_required(true).with_description("First operand"))
            .parser(
                valued_option("-p", &["--poop"])
                    .with_description("Hope this does not backfires..."),
            )
            .build()
            .unwrap();
        let expected = "Help for run\n\
            \n\
            Synopsis:\n\
            run [-f] [-p <value>] OPERAND0 [Karl]\n\
            \n\
            Some text to have anything at all.\n\
            \n\
            Parameters:\n\
            -f       --flag-in-the-wind (flag)     Changes as the wind blows.\n\
            -p       --poop                        Hope this does not backfires...\n\
            OPERAND0                    (required) First operand\n\
            Karl                                   The second operand. This one also has a beautiful name.\n";
        assert_eq!(cmd.doc(), expected);
    }

    #[test]
    fn command_without_parsers_has_no_table() {
        let cmd = Command::builder("noop").build().unwrap();
        assert_eq!(cmd.doc(), "Help for noop\n\nSynopsis:\nnoop\n");
    }
}
