use anyhow::Context;
use bundle_dispatch::{dispatch, dispatch_at, next, ChainStep};
use bundle_object::Object;
use colored::Colorize;
use serde_json::{json, Value};
use tracing::warn;

use crate::cli::*;
use crate::config::DemoConfig;
use crate::scenarios::{Outcome, Report, Scenario};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = DemoConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Scenarios => cmd_scenarios(cli.format),
        Command::Run(args) => cmd_run(args, &config, cli.format),
        Command::Methods(args) => cmd_methods(args, &config, cli.format),
        Command::Call(args) => cmd_call(args, &config, cli.format),
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_scenarios(format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        let list: Vec<Value> = Scenario::EACH
            .iter()
            .map(|s| json!({ "name": s.name(), "summary": s.summary() }))
            .collect();
        return print_json(&list);
    }
    for scenario in Scenario::EACH {
        println!("  {:<12} {}", scenario.name().yellow().bold(), scenario.summary());
    }
    Ok(())
}

fn cmd_run(args: RunArgs, config: &DemoConfig, format: OutputFormat) -> anyhow::Result<()> {
    let reports = args.scenario.run(config);
    if format == OutputFormat::Json {
        return print_json(&reports);
    }
    for report in &reports {
        print_report(report);
    }
    Ok(())
}

fn print_report(report: &Report) {
    println!(
        "{} {} — {}",
        "▶".cyan(),
        report.scenario.bold(),
        report.summary.dimmed()
    );
    for step in &report.steps {
        let rendered = match &step.outcome {
            Outcome::Value(value) => value.to_string().green(),
            Outcome::End => "<end of chain>".yellow(),
            Outcome::Error(message) => message.red(),
        };
        println!("  {} => {}", step.call, rendered);
    }
    println!();
}

fn cmd_methods(args: MethodsArgs, config: &DemoConfig, format: OutputFormat) -> anyhow::Result<()> {
    let obj = args.object.build(config);
    if format == OutputFormat::Json {
        let list: Vec<Value> = obj
            .iter()
            .map(|(name, entry)| json!({ "name": name, "implementations": entry.len() }))
            .collect();
        return print_json(&list);
    }
    for (name, entry) in obj.iter() {
        if entry.is_chain() {
            println!("  {} {}", name, format!("(chain of {})", entry.len()).yellow());
        } else {
            println!("  {name}");
        }
    }
    Ok(())
}

/// Parse a CLI argument as JSON, falling back to a plain string.
fn parse_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Run the dispatch `args` describes against `obj`.
fn call_step(obj: &Object, args: &CallArgs) -> bundle_object::Result<ChainStep> {
    let values: Vec<Value> = args.args.iter().map(|raw| parse_arg(raw)).collect();
    match args.index {
        None => dispatch(obj, &args.method, &values).map(ChainStep::Value),
        Some(index) if args.next => next(obj, &args.method, &values, index),
        Some(index) => dispatch_at(obj, &args.method, &values, index),
    }
}

/// JSON form of a call result; the end-of-chain sentinel gets `"end": true`
/// so it never reads as a null value.
fn call_json(method: &str, step: &ChainStep) -> Value {
    match step {
        ChainStep::Value(value) => json!({ "method": method, "result": value }),
        ChainStep::End => json!({ "method": method, "end": true }),
    }
}

/// The attribute snapshot shown after a call, or the reason there is none.
fn attributes_line(obj: &Object) -> anyhow::Result<Option<String>> {
    match obj.attributes() {
        Ok(state) if state.is_empty() => Ok(None),
        Ok(state) => {
            let snapshot = serde_json::to_string(&state).context("rendering attributes")?;
            Ok(Some(snapshot))
        }
        Err(err) => {
            warn!(error = %err, "attributes unavailable");
            Ok(Some(format!("<{err}>")))
        }
    }
}

fn cmd_call(args: CallArgs, config: &DemoConfig, format: OutputFormat) -> anyhow::Result<()> {
    let obj = args.object.build(config);
    let step = call_step(&obj, &args)?;

    if format == OutputFormat::Json {
        return print_json(&call_json(&args.method, &step));
    }
    match step {
        ChainStep::Value(value) => println!("{}", value.to_string().green()),
        ChainStep::End => println!("{}", "<end of chain>".yellow()),
    }

    if let Some(line) = attributes_line(&obj)? {
        println!("  {} {}", "attributes:".dimmed(), line.dimmed());
    }
    Ok(())
}
