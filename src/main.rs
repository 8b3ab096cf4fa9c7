use std::path::PathBuf;

use clap::{ArgAction, Parser};
use cve_register_sync::model::Highlight;
use cve_register_sync::sync::{self, DEFAULT_OUTPUT, SyncOptions, SyncSummary};
use cve_register_sync::{Result, ToolError};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_tracing(cli.verbose) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }

    if let Err(failure) = run(cli) {
        error!(error = %failure, debug = ?failure, "reconciliation failed");
        println!("{}", failure.user_message());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = SyncOptions {
        output: cli.output,
        sheet: cli.sheet,
        highlight: cli.highlight,
    };
    let summary = sync::sync_register(&cli.register, &cli.report, &options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &SyncSummary) {
    println!(
        "Done. Added {} new CVE(s) to {}",
        summary.added.len(),
        summary.output.display()
    );
}

fn init_tracing(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

fn parse_highlight(raw: &str) -> std::result::Result<Highlight, String> {
    Highlight::parse_hex(raw).ok_or_else(|| format!("expected an RRGGBB hex color, got '{raw}'"))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Sync an Excel vulnerability register with a JSON scan report."
)]
struct Cli {
    /// Register workbook (.xlsx) to reconcile.
    register: PathBuf,

    /// JSON scan report holding the current vulnerabilities.
    report: PathBuf,

    /// Where to write the reconciled register.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Register sheet name. Defaults to the first sheet.
    #[arg(long)]
    sheet: Option<String>,

    /// Fill color (RRGGBB) marking newly added identities.
    #[arg(long, value_parser = parse_highlight, default_value = "FFFF00")]
    highlight: Highlight,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}
