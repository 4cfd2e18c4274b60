//! cssxpath CLI
//!
//! Compile CSS selectors to XPath 1.0 from the terminal.

use std::io::{self, BufRead};

use anyhow::Context;
use clap::Parser;
use cssxpath::{Anchor, CompileError, CompileOptions, Compiler, ListPolicy, xpath};
use cssxpath_common::warning::{clear_warnings, warn_once};
use owo_colors::OwoColorize;

/// cssxpath: translate CSS selectors into XPath 1.0 expressions
#[derive(Parser, Debug)]
#[command(name = "cssxpath")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Compile one selector
    cssxpath 'ul > li:nth-child(2n+1)'

    # Anchor at the document root
    cssxpath --document 'body p.note'

    # Print the parsed selector as JSON
    cssxpath --ast 'a[href^="https:"]'

    # One selector per line from stdin
    printf 'h1\nh2 + p\n' | cssxpath
"#)]
struct Cli {
    /// Selectors to compile (read one per line from stdin when omitted)
    #[arg(value_name = "SELECTOR")]
    selectors: Vec<String>,

    /// Emit paths that start at the document root
    #[arg(long)]
    document: bool,

    /// Leave failing selectors out of a list instead of failing it
    #[arg(long)]
    skip_invalid: bool,

    /// Print the parsed selector list as JSON instead of XPath
    #[arg(long)]
    ast: bool,

    /// Reject selectors longer than this many bytes
    #[arg(long, value_name = "BYTES")]
    max_len: Option<usize>,
}

impl Cli {
    fn options(&self) -> CompileOptions {
        CompileOptions::default()
            .with_anchor(if self.document {
                Anchor::Document
            } else {
                Anchor::Context
            })
            .with_list_policy(if self.skip_invalid {
                ListPolicy::SkipInvalid
            } else {
                ListPolicy::Strict
            })
            .with_max_input_len(self.max_len)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let compiler = Compiler::new(cli.options());

    let selectors = if cli.selectors.is_empty() {
        read_stdin()?
    } else {
        cli.selectors.clone()
    };

    let mut failed = false;
    for selector in &selectors {
        clear_warnings();
        match render(&compiler, selector, cli.ast) {
            Ok(output) => println!("{output}"),
            Err(RenderError::Compile(error)) => {
                failed = true;
                report(selector, &error);
            }
            Err(RenderError::Json(error)) => {
                return Err(error).context("failed to serialize selector AST");
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Non-empty lines of standard input, trimmed.
fn read_stdin() -> anyhow::Result<Vec<String>> {
    let mut selectors = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read selectors from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            selectors.push(line.to_string());
        }
    }
    Ok(selectors)
}

enum RenderError {
    Compile(CompileError),
    Json(serde_json::Error),
}

fn render(compiler: &Compiler<'_>, selector: &str, ast: bool) -> Result<String, RenderError> {
    let list = compiler.parse(selector).map_err(RenderError::Compile)?;
    for skipped in &list.skipped {
        warn_once(
            "selector",
            &format!("skipped selector `{}`: {}", skipped.text, skipped.error),
        );
    }

    if ast {
        serde_json::to_string_pretty(&list).map_err(RenderError::Json)
    } else {
        Ok(xpath::generate(&list, compiler.options().anchor))
    }
}

/// Print the error with a caret under the offending byte.
fn report(selector: &str, error: &CompileError) {
    let offset = error.position().min(selector.len());
    let column = selector
        .get(..offset)
        .map_or(offset, |prefix| prefix.chars().count());

    eprintln!("{} {error}", "error:".red().bold());
    eprintln!("  {selector}");
    eprintln!("  {}{}", " ".repeat(column), "^".red());
}
