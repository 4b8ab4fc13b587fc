//! `gbln` CLI: check, format and convert GBLN files from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a file (exit status 1 and a located error if invalid)
//! gbln check -i config.gbln
//!
//! # Pretty-print from stdin to stdout, 4-space indent
//! cat config.gbln | gbln fmt --indent 4
//!
//! # Compact a file in place
//! gbln fmt --compact -i config.gbln -o config.gbln
//!
//! # Convert to JSON
//! gbln json -i config.gbln
//!
//! # Debug logging (or GBLN_LOG=trace for everything)
//! gbln -v check -i config.gbln
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gbln_core::{ParseOptions, Value, DEFAULT_MAX_DEPTH};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gbln",
    version,
    about = "Check, format and convert GBLN documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum nesting depth of objects and arrays
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log at debug level (overrides GBLN_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a document without producing output
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Re-serialise a document, pretty by default
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Spaces per nesting level
        #[arg(long, default_value_t = 2, conflicts_with = "compact")]
        indent: usize,
        /// Emit the compact single-line form
        #[arg(long)]
        compact: bool,
    },
    /// Convert a document to pretty-printed JSON
    Json {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ParseOptions::default().with_max_depth(cli.max_depth);
    tracing::debug!(max_depth = options.max_depth, "parse options");

    match cli.command {
        Commands::Check { input } => {
            let text = read_input(input.as_deref())?;
            gbln_core::validate_with_options(&text, &options)
                .with_context(|| format!("{} is not valid GBLN", source_name(input.as_deref())))?;
            tracing::info!(source = source_name(input.as_deref()), "document is valid");
            println!("ok");
        }
        Commands::Fmt {
            input,
            output,
            indent,
            compact,
        } => {
            let value = parse_input(input.as_deref(), &options)?;
            let text = if compact {
                gbln_core::serialize(&value)
            } else {
                gbln_core::serialize_pretty(&value, indent)
            };
            write_output(output.as_deref(), &text)?;
        }
        Commands::Json { input, output } => {
            let value = parse_input(input.as_deref(), &options)?;
            let json =
                serde_json::to_string_pretty(&value).context("Failed to convert GBLN to JSON")?;
            write_output(output.as_deref(), &json)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so they never mix with document output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("GBLN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn source_name(path: Option<&str>) -> &str {
    path.unwrap_or("<stdin>")
}

fn parse_input(path: Option<&str>, options: &ParseOptions) -> Result<Value> {
    let text = read_input(path)?;
    gbln_core::parse_with_options(&text, options)
        .with_context(|| format!("{} is not valid GBLN", source_name(path)))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

/// Write `content` followed by a newline, unless it is empty.
fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    let mut text = content.to_string();
    if !text.is_empty() {
        text.push('\n');
    }
    match path {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", text);
        }
    }
    Ok(())
}
