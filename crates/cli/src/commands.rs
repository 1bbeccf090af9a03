use anyhow::{Context, Result};
use argrig::{
    Command, Commander, ParsedArgs, ValueMapper, flag_option, operand, valued_option,
};

const CONFIG_ENV: &str = "ARGRIG_CONFIG";
const DEFAULT_CONFIG: &str = "argrig.toml";

pub fn commander() -> Result<Commander> {
    let commander = Commander::builder("argrig")
        .command(greet()?)
        .command(sum()?)
        .command(config_set()?)
        .build()?;
    Ok(commander)
}

fn greet() -> Result<Command> {
    let cmd = Command::builder("greet")
        .description("Print a greeting for NAME.")
        .parser(
            operand(0)
                .with_display_name("NAME")
                .with_required(true)
                .with_description("Who to greet"),
        )
        .parser(flag_option("-l", &["--loud"]).with_description("Shout the greeting"))
        .parser(
            valued_option("-t", &["--times"])
                .with_mapper(ValueMapper::parsed::<u32>())
                .with_default("1")
                .with_description("How often to greet"),
        )
        .instruction(run_greet)
        .build()?;
    Ok(cmd)
}

fn run_greet(args: &ParsedArgs) -> Result<()> {
    let name = args.get_str("NAME").context("NAME not resolved")?;
    let times = *args.get::<u32>("--times").context("--times not resolved")?;
    let loud = args.get::<bool>("--loud").copied().unwrap_or(false);

    let mut line = format!("Hello, {name}!");
    if loud {
        line = line.to_uppercase();
    }
    for _ in 0..times {
        println!("{line}");
    }
    Ok(())
}

fn sum() -> Result<Command> {
    let cmd = Command::builder("sum")
        .description("Add two integers.")
        .parser(
            operand(0)
                .with_display_name("A")
                .with_required(true)
                .with_mapper(ValueMapper::parsed::<i64>()),
        )
        .parser(
            operand(1)
                .with_display_name("B")
                .with_default("0")
                .with_mapper(ValueMapper::parsed::<i64>()),
        )
        .instruction(run_sum)
        .build()?;
    Ok(cmd)
}

fn run_sum(args: &ParsedArgs) -> Result<()> {
    let a = *args.get::<i64>("A").context("A not resolved")?;
    let b = *args.get::<i64>("B").context("B not resolved")?;
    let total = a
        .checked_add(b)
        .with_context(|| format!("{a} + {b} overflows"))?;
    println!("{total}");
    Ok(())
}

fn config_set() -> Result<Command> {
    let cmd = Command::builder("config set")
        .description("Record KEY=VALUE for the given configuration file.")
        .parser(operand(0).with_display_name("KEY").with_required(true))
        .parser(operand(1).with_display_name("VALUE").with_required(true))
        .parser(
            valued_option("-f", &["--file"])
                .with_default_supplier(|| {
                    Some(std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG.to_string()))
                })
                .with_description("Configuration file (default: $ARGRIG_CONFIG or argrig.toml)"),
        )
        .instruction(run_config_set)
        .build()?;
    Ok(cmd)
}

fn run_config_set(args: &ParsedArgs) -> Result<()> {
    let key = args.get_str("KEY").context("KEY not resolved")?;
    let value = args.get_str("VALUE").context("VALUE not resolved")?;
    let file = args.get_str("--file").context("--file not resolved")?;
    println!("{file}: {key}={value}");
    Ok(())
}
