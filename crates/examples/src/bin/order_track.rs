use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ot_runtime::metrics::{MetricsRegistry, RunTimer};
use ot_runtime::{init_tracing, run_lines, DriverConfig, InvalidPolicy};

#[derive(Parser)]
#[command(name = "order_track", about = "Map order webhooks (one JSON envelope per line) to track events")]
struct Cli {
    /// Read envelopes from this file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// Write track batches to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pretty-print each batch
    #[arg(long)]
    pretty: bool,

    /// Stop at the first invalid envelope instead of skipping it
    #[arg(long)]
    fail_fast: bool,

    /// Print a metrics summary line to stderr when done
    #[arg(long)]
    metrics: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let cfg = DriverConfig {
        on_invalid: if cli.fail_fast {
            InvalidPolicy::Abort
        } else {
            InvalidPolicy::Skip
        },
        pretty: cli.pretty,
    };
    info!(?cfg, "order_track starting");

    let metrics = MetricsRegistry::default();
    let timer = RunTimer::start();
    let summary = run_lines(reader, writer, &cfg, &metrics)?;

    if cli.metrics {
        eprintln!(
            "{}",
            metrics.snapshot().to_json_line("order_track", Some(timer.elapsed()))
        );
    }
    info!(?summary, "order_track finished");
    Ok(())
}
