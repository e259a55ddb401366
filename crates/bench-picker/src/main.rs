//! Bench Picker - choose a balanced benchmark suite from a pile of FENs.
//!
//! Reads positions from a file, piped stdin, or `fens.txt`, and prints a
//! sample stratified by piece count, one FEN per line in sorted order.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use bench_picker::{select, CandidatePool, InputSource, PickError, PickerConfig, Selection};
use clap::{ArgAction, Parser};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "bench-picker")]
#[command(about = "Pick a piece-count balanced sample of FEN positions")]
struct Cli {
    /// File of FEN lines (defaults to piped stdin, then the fallback file)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Number of positions to pick
    #[arg(short = 'n', long)]
    count: Option<usize>,
    /// Seed for a reproducible pick
    #[arg(long)]
    seed: Option<u64>,
    /// Configuration file (defaults to bench-picker.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();
}

fn pick(pool: CandidatePool, target: usize, seed: Option<u64>) -> Result<Selection, PickError> {
    match seed {
        Some(seed) => select(pool, target, &mut StdRng::seed_from_u64(seed)),
        None => select(pool, target, &mut rand::thread_rng()),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => PickerConfig::load_from(path)?,
        None => PickerConfig::load()?,
    };
    let target = cli.count.unwrap_or(config.target);
    let seed = cli.seed.or(config.seed);

    let source = InputSource::detect(cli.input, &config.fallback_input);
    let lines = source.read_lines()?;
    let pool = CandidatePool::from_lines(&lines);
    tracing::info!(
        candidates = pool.len(),
        rejected = pool.rejected(),
        partitions = pool.partition_count(),
        "validated input"
    );

    let selection = match pick(pool, target, seed) {
        Ok(selection) => selection,
        Err(e @ PickError::NoValidPositions) => {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    let mut out = BufWriter::new(io::stdout().lock());
    for position in selection.positions() {
        writeln!(out, "{}", position)?;
    }
    out.flush()?;

    Ok(ExitCode::SUCCESS)
}
