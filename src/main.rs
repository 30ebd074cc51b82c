//! ISA Bitprobe CLI
//!
//! One-shot generator: probes the built-in demo core description and
//! writes the discovered bit-layout catalog to standard output (or a
//! file) as one self-contained document.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use isa_bitprobe::{description::sample, discover, report};
use std::io::Write;
use std::path::PathBuf;

/// Black-box instruction bit-layout discovery.
///
/// Probes an ISA description's opaque encode functions with single-bit
/// experiments and reports the exact bit positions of format, opcode
/// and operand fields.
#[derive(Parser, Debug)]
#[command(name = "isa-bitprobe")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output rendition
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    Compact,
    /// Flat CSV, one row per (opcode, variant, arg)
    Csv,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("isa_bitprobe=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let desc = sample::demo_core();
    let catalog = discover(&desc).context("discovery failed")?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Json => report::emit_json(&catalog, &mut out, true)?,
        OutputFormat::Compact => report::emit_json(&catalog, &mut out, false)?,
        OutputFormat::Csv => report::emit_csv(&catalog, &mut out)?,
    }

    Ok(())
}
