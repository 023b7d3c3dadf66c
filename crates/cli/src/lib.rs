//! Command-line front end for `nsplit`.
//!
//! Parses arguments with `clap`, sets up `tracing`, and runs one of the
//! subcommands against [`nsplit_core`]. Every runner returns an exit code.

use std::future::Future;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod config;
mod generate;
mod groups;
mod source;

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "NSPLIT_LOG";

const WORKSPACE_TARGETS: [&str; 2] = ["nsplit_core", "nsplit_cli"];

#[derive(Parser)]
#[command(
    name = "nsplit",
    version,
    about = "Split an API description into self-contained, per-namespace artifacts"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one artifact per namespace group
    Generate(generate::GenerateArgs),
    /// List the namespace groups and their closure sizes
    Groups(groups::GroupsArgs),
}

/// Parse `args` (including the program name) and run the selected command.
///
/// Returns the process exit code.
pub async fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => generate::run(args).await,
            Some(Commands::Groups(args)) => groups::run(args).await,
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

pub(crate) async fn run_cli_async<F, Fut>(f: F) -> i32
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = Result<(), String>> + Send,
{
    match f().await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

/// Install the stderr `tracing` subscriber.
///
/// `NSPLIT_LOG` takes a plain level (`trace`, `debug`, `info`, `warn`,
/// `error`), applied to the nsplit crates only, or a full filter spec such as
/// `nsplit_core=debug,reqwest=info`. Defaults to `info`.
pub fn init_tracing() {
    let filter = log_filter(std::env::var(LOG_ENV).ok().as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn log_filter(value: Option<&str>) -> String {
    match value {
        Some(level) if is_plain_level(level) => scoped_filter(&level.to_ascii_lowercase()),
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ => scoped_filter("info"),
    }
}

fn scoped_filter(level: &str) -> String {
    WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
