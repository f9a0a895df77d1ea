use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use protoedit_editor::{EditSession, EditorError};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct AppendArgs {
    /// Input .proto file
    pub input: PathBuf,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Snippet to append
    #[arg(short, long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read the snippet from a file (stdin when neither this nor --content is given)
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    /// Write the result back to the input file
    #[arg(short, long, conflicts_with = "output")]
    pub in_place: bool,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Which container receives the snippet
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// Append inside this top-level service
    #[arg(long)]
    pub service: Option<String>,

    /// Append inside the first message with this name, at any depth
    #[arg(long)]
    pub message: Option<String>,

    /// Append inside the first enum with this name, at any depth
    #[arg(long = "enum")]
    pub enum_name: Option<String>,

    /// Append at the end of the file
    #[arg(long)]
    pub file: bool,
}

pub fn append(args: AppendArgs, config: &Config) -> Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let content = read_content(&args)?;
    tracing::debug!(
        "append: {} ({} bytes), snippet {} bytes",
        args.input.display(),
        source.len(),
        content.len()
    );

    let options = config.editor_options(&args.input.display().to_string());
    let mut session = EditSession::with_options(source, options).map_err(report)?;

    let target = &args.target;
    let result = if let Some(name) = &target.service {
        session.append_to_service(name, &content)
    } else if let Some(name) = &target.message {
        session.append_to_message(name, &content)
    } else if let Some(name) = &target.enum_name {
        session.append_to_enum(name, &content)
    } else {
        session.append_to_file(&content)
    };
    result.map_err(report)?;
    tracing::info!("append: {} now at version {}", args.input.display(), session.version());

    let destination = if args.in_place {
        Some(args.input.clone())
    } else {
        args.output.clone()
    };

    match destination {
        Some(path) => {
            fs::write(&path, session.source())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} {}", "Updated".green().bold(), path.display());
        }
        None => print!("{}", session),
    }

    Ok(())
}

fn read_content(args: &AppendArgs) -> Result<String> {
    if let Some(content) = &args.content {
        return Ok(content.clone());
    }

    if let Some(path) = &args.content_file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read snippet {}", path.display()));
    }

    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read snippet from stdin")?;
    Ok(content)
}

/// Print the source diagnostic for grammar errors before handing the error up
fn report(err: EditorError) -> anyhow::Error {
    if let Some(diagnostic) = err.diagnostic() {
        eprint!("{}", diagnostic);
    }
    err.into()
}
