//! Command-line front end for the sortlab engine.
//!
//! # Usage
//!
//! ```bash
//! sortlab compare --size 50 --mode random --output comparison.json
//! sortlab run --algorithm bubble --size 20 --speed 200
//! sortlab report comparison.json
//! ```

// CLI tools need to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sortlab::report::{self, JsonReport};
use sortlab::scheduler::{Renderer, RunState, Speed};
use sortlab::{comparison, dataset, import, Algorithm, Distribution};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Sorting visualizer engine command line.
#[derive(Parser, Debug)]
#[command(name = "sortlab")]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Measure all three algorithms on one dataset.
    Compare(CompareArgs),
    /// Animate a single algorithm, printing one line per operation.
    Run(RunArgs),
    /// Pretty-print a previously saved comparison report.
    Report(ReportArgs),
}

/// Output shape for the compare subcommand.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Arguments for the compare subcommand.
#[derive(Parser, Debug)]
struct CompareArgs {
    /// Number of elements in the generated dataset.
    #[arg(long, default_value_t = dataset::DEFAULT_SIZE)]
    size: usize,

    /// Dataset distribution.
    #[arg(long, default_value = "random")]
    mode: Distribution,

    /// Seed for reproducible datasets.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the JSON report to a file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Output format for stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for the run subcommand.
#[derive(Parser, Debug)]
struct RunArgs {
    /// Algorithm to animate: bubble, selection, or insertion.
    #[arg(long, short)]
    algorithm: Algorithm,

    /// Number of elements in the generated dataset.
    #[arg(long, default_value_t = dataset::DEFAULT_SIZE)]
    size: usize,

    /// Dataset distribution.
    #[arg(long, default_value = "random")]
    mode: Distribution,

    /// Seed for reproducible datasets.
    #[arg(long)]
    seed: Option<u64>,

    /// Animation speed on the 1..=200 slider scale.
    #[arg(long, default_value_t = 50)]
    speed: u8,

    /// Load the dataset from a delimited text file instead of generating.
    #[arg(long)]
    import: Option<PathBuf>,
}

/// Arguments for the report subcommand.
#[derive(Parser, Debug)]
struct ReportArgs {
    /// Path to a JSON report produced by the compare subcommand.
    input: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Compare(args) => cmd_compare(&args),
        Command::Run(args) => cmd_run(&args),
        Command::Report(args) => cmd_report(&args),
    }
}

fn cmd_compare(args: &CompareArgs) -> Result<()> {
    let comparison = comparison::compare(args.size, args.mode, args.seed)
        .context("failed to run comparison")?;

    if let Some(path) = &args.output {
        let json = report::to_json_string(&comparison, true)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    match args.format {
        OutputFormat::Text => print_comparison(&report::generate_report(&comparison)),
        OutputFormat::Json => println!("{}", report::to_json_string(&comparison, true)?),
        OutputFormat::Csv => {
            println!("algorithm,elapsed_ms");
            for sample in &comparison.samples {
                println!("{},{:.4}", sample.algorithm.name(), sample.elapsed_ms);
            }
        }
    }
    Ok(())
}

fn cmd_run(args: &RunArgs) -> Result<()> {
    let data = match &args.import {
        Some(path) => {
            let imported = import::load_dataset(path)
                .with_context(|| format!("failed to import {}", path.display()))?;
            if imported.skipped > 0 {
                eprintln!("warning: skipped {} unparsable cells", imported.skipped);
            }
            imported.values
        }
        None => dataset::generate(args.size, args.mode, args.seed)
            .context("failed to generate dataset")?,
    };

    println!("DATASET: n={} values={data:?}", data.len());

    let mut scheduler = sortlab::Scheduler::new();
    let shared = Arc::new(Mutex::new(data));
    let handle = scheduler.start(Arc::clone(&shared), args.algorithm, Speed::new(args.speed));

    let mut printer = LinePrinter;
    let terminal = handle.forward_to(&mut printer);
    println!("RESULT: state={terminal} values={:?}", handle.snapshot());
    Ok(())
}

fn cmd_report(args: &ReportArgs) -> Result<()> {
    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let report: JsonReport = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    print_comparison(&report);
    Ok(())
}

/// Renderer that prints one machine-parseable line per event.
struct LinePrinter;

impl Renderer for LinePrinter {
    fn on_compare(&mut self, i: usize, j: usize) {
        println!("COMPARE: i={i} j={j}");
    }

    fn on_swap(&mut self, i: usize, j: usize) {
        println!("SWAP: i={i} j={j}");
    }

    fn on_overwrite(&mut self, i: usize, value: i32) {
        println!("OVERWRITE: i={i} value={value}");
    }

    fn on_state_change(&mut self, state: RunState) {
        println!("STATE: {state}");
    }

    fn on_done(&mut self, elapsed_ms: f64) {
        println!("DONE: elapsed_ms={elapsed_ms:.3}");
    }
}

/// Prints a comparison report as a readable table.
fn print_comparison(report: &JsonReport) {
    println!("Comparison Report");
    println!("=================");
    println!(
        "Dataset: n={} mode={} seed={}",
        report.dataset.n,
        report.dataset.mode,
        report
            .dataset
            .seed
            .map_or_else(|| "none".to_string(), |s| s.to_string()),
    );
    println!();
    println!("{:<16} {:>12}", "Algorithm", "Elapsed (ms)");
    println!("{:-<16} {:->12}", "", "");
    for sample in &report.samples {
        println!("{:<16} {:>12.4}", sample.algorithm, sample.elapsed_ms);
    }
    println!();
    match &report.metadata.fastest {
        Some(name) => println!("Fastest: {name}"),
        None => println!("Fastest: n/a"),
    }
    println!("Total sampled time: {:.4} ms", report.metadata.total_elapsed_ms);
}
