use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use protoedit_parser::{format_error, parse};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Input .proto file
    pub input: PathBuf,
}

pub fn check(args: CheckArgs, config: &Config) -> Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let filename = config
        .editor_options(&args.input.display().to_string())
        .filename;

    match parse(&source) {
        Ok(file) => {
            let mut containers = 0;
            file.root.walk(&mut |_, _| containers += 1);
            tracing::debug!("check: {} parsed, syntax={:?}", filename, file.syntax);

            println!(
                "{} {} ({} declarations)",
                "✓".green().bold(),
                filename,
                containers - 1
            );
            Ok(())
        }
        Err(err) => {
            tracing::debug!("check: {} failed at {}", filename, err.span());
            eprint!("{}", format_error(&source, &filename, &err));
            Err(anyhow::anyhow!("{} does not parse: {}", filename, err))
        }
    }
}
