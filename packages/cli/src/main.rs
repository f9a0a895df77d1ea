mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{append, check, outline, AppendArgs, CheckArgs, OutlineArgs};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Protoedit - append declarations to .proto files without reformatting them
#[derive(Parser, Debug)]
#[command(name = "protoedit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log each editing step to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./protoedit.config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append a snippet to a service, message, enum or the end of the file
    Append(AppendArgs),

    /// Check that a .proto file parses
    Check(CheckArgs),

    /// Print the declaration tree of a .proto file
    Outline(OutlineArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd, cli.config.as_deref())?;

    match cli.command {
        Command::Append(args) => append(args, &config),
        Command::Check(args) => check(args, &config),
        Command::Outline(args) => outline(args, &config),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
