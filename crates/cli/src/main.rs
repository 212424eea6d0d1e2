use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use timing_tables::{BenchmarkRun, write_tables};
use tracing::info;

/// Timing tables - group benchmark timings by dataset and query kind
#[derive(Parser)]
#[command(name = "timing-tables")]
#[command(
    about = "Print KNN, user-based and item-based timing tables from benchmark logs",
    long_about = None
)]
struct Cli {
    /// Directory holding result_psql.out, result_mongo.out,
    /// result_psql_mongo.out and test.in
    #[arg(short = 'd', long, default_value = "tests")]
    input_dir: PathBuf,
}

fn main() -> Result<()> {
    // Logs go to stderr, stdout carries only the tables
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let run = BenchmarkRun::load_from_dir(&cli.input_dir).with_context(|| {
        format!("Failed to load benchmark run from {}", cli.input_dir.display())
    })?;
    info!("Scanned benchmark run in {:?}", start.elapsed());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_tables(&mut out, run.tables()).context("Failed to write tables")?;
    out.flush()?;

    Ok(())
}
