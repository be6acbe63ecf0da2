use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::objects::DemoObject;
use crate::scenarios::Scenario;

#[derive(Parser)]
#[command(
    name = "bundle",
    about = "Bundle — compose objects from method tables, no classes required",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file overriding the demo objects' initial state
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the available scenarios
    Scenarios,
    /// Run a composition scenario
    Run(RunArgs),
    /// List the methods of a demo object
    Methods(MethodsArgs),
    /// Dispatch a method on a demo object
    Call(CallArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct RunArgs {
    #[arg(default_value = "all")]
    pub scenario: Scenario,
}

#[derive(Args)]
pub struct MethodsArgs {
    pub object: DemoObject,
}

#[derive(Args)]
pub struct CallArgs {
    pub object: DemoObject,
    pub method: String,
    /// Arguments, parsed as JSON where possible and as strings otherwise
    pub args: Vec<String>,
    /// 1-based chain index for indexed dispatch
    #[arg(long)]
    pub index: Option<usize>,
    /// With --index, dispatch the member after it (call-next)
    #[arg(long, requires = "index")]
    pub next: bool,
}
