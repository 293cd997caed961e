//! CLI binary for tex2md.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tex2md::{convert, convert_to_file, output_path_for, ConversionConfig};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert to the sibling .txt file (paper.tex → paper.txt)
  tex2md paper.tex

  # Convert to an explicit output file
  tex2md paper.tex -o notes/paper.txt

  # Print the Markdown to stdout instead of writing a file
  tex2md --stdout paper.tex

  # Full conversion report (markdown, metadata, warnings, stats) as JSON
  tex2md --json paper.tex > report.json

  # Drop \label annotations from the output
  tex2md --no-labels paper.tex

SUPPORTED CONSTRUCTS:
  document/abstract boundaries, \title, \author, \maketitle,
  figure/figure* (caption + label), table/table* with tabular → GFM grid
  (nested tables fall back to fenced LaTeX), equation → $$ block,
  section/subsection/subsubsection/paragraph/runningtitle → # … ####,
  itemize/enumerate, \emph, \textit, \textbf, \textsc,
  spacing and page-break commands.

ENVIRONMENT VARIABLES:
  RUST_LOG        Log filter (e.g. tex2md=debug); overrides the default
  TEX2MD_OUTPUT   Default for --output
"#;

/// Convert LaTeX documents to Markdown-flavored text.
#[derive(Parser, Debug)]
#[command(
    name = "tex2md",
    version,
    about = "Convert LaTeX documents to Markdown-flavored text",
    long_about = "Convert a LaTeX source file to readable Markdown-flavored text: sections, \
figures, tables, equations, lists, and inline formatting are rewritten; comments and layout \
commands are dropped. Unsupported constructs degrade to annotated fallbacks with warnings \
instead of failing the conversion.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to a LaTeX source file (.tex).
    input: String,

    /// Write Markdown to this file instead of the sibling .txt.
    #[arg(short, long, env = "TEX2MD_OUTPUT")]
    output: Option<PathBuf>,

    /// Print the Markdown to stdout instead of writing a file.
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Print the full conversion report as JSON to stdout.
    #[arg(long, conflicts_with = "output")]
    json: bool,

    /// Drop \label annotations instead of keeping them inline.
    #[arg(long)]
    no_labels: bool,

    /// Suppress the summary line and warnings on stderr.
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = ConversionConfig::builder()
        .keep_labels(!cli.no_labels)
        .build()
        .context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    if cli.stdout || cli.json {
        let output = convert(&cli.input, &config).context("Conversion failed")?;

        if cli.json {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
            println!("{json}");
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(output.markdown.as_bytes())
                .context("Failed to write to stdout")?;
        }

        if !cli.quiet && !cli.json {
            print_summary(output.warnings.len(), output.stats.duration_ms, "stdout");
        }
        return Ok(());
    }

    let output_path = match cli.output {
        Some(path) => path,
        None => output_path_for(&cli.input, &config).context("Cannot derive output path")?,
    };
    let output = convert_to_file(&cli.input, &output_path, &config).context("Conversion failed")?;

    if !cli.quiet {
        print_summary(
            output.warnings.len(),
            output.stats.duration_ms,
            &output_path.display().to_string(),
        );
    }

    Ok(())
}

fn print_summary(warning_count: usize, duration_ms: u64, destination: &str) {
    if warning_count == 0 {
        eprintln!(
            "{}  converted in {}  →  {}",
            green("✔"),
            dim(&format!("{duration_ms}ms")),
            bold(destination),
        );
    } else {
        eprintln!(
            "{}  converted with {} warning(s) in {}  →  {}",
            yellow("⚠"),
            warning_count,
            dim(&format!("{duration_ms}ms")),
            bold(destination),
        );
    }
}
