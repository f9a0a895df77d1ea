use crate::config::Config;
use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use protoedit_editor::{DeclKind, EditSession, ProtoFile};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct OutlineArgs {
    /// Input .proto file
    pub input: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Also list fields, enum values, rpcs and other members
    #[arg(short, long)]
    pub members: bool,
}

pub fn outline(args: OutlineArgs, config: &Config) -> Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let options = config.editor_options(&args.input.display().to_string());

    let session = EditSession::with_options(source, options).map_err(|err| {
        if let Some(diagnostic) = err.diagnostic() {
            eprint!("{}", diagnostic);
        }
        anyhow::Error::from(err)
    })?;

    tracing::debug!(
        "outline: {} with {} top-level declarations, format={}",
        args.input.display(),
        session.structure().root.children.len(),
        args.format
    );

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(session.structure())?),
        "text" => print!("{}", render_text(session.source(), session.structure(), args.members)),
        other => bail!("Unknown output format {:?} (expected text or json)", other),
    }

    Ok(())
}

/// One line per declaration, indented by nesting depth, with 1-based line numbers.
fn render_text(source: &str, file: &ProtoFile, with_members: bool) -> String {
    let mut out = String::new();

    let mut header = vec![];
    if let Some(syntax) = &file.syntax {
        header.push(format!("syntax {}", syntax));
    }
    if let Some(edition) = &file.edition {
        header.push(format!("edition {}", edition));
    }
    if let Some(package) = &file.package {
        header.push(format!("package {}", package));
    }
    if !header.is_empty() {
        out.push_str(&header.join(", "));
        out.push('\n');
    }

    file.root.walk(&mut |decl, depth| {
        let indent = "  ".repeat(depth);
        if decl.kind != DeclKind::File {
            out.push_str(&format!(
                "{}{} {} {}\n",
                indent,
                decl.kind.as_str().cyan(),
                decl.name.bold(),
                format!("(line {})", line_of(source, decl.span.start)).dimmed()
            ));
        }

        if with_members {
            let member_indent = match decl.kind {
                DeclKind::File => indent,
                _ => "  ".repeat(depth + 1),
            };
            for member in &decl.members {
                out.push_str(&format!(
                    "{}{} {}\n",
                    member_indent,
                    member.kind.as_str().dimmed(),
                    member.name
                ));
            }
        }
    });

    out
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())].matches('\n').count() + 1
}
