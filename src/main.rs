use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wordgrid::generator::generate_puzzle;
use wordgrid::output::{self, ExportFormat};
use wordgrid::utils::spinner;
use wordgrid::{SearchConfig, SearchReport};

#[derive(Parser)]
#[command(name = "wordgrid")]
#[command(about = "Parallel word search on a wrap-around letter grid")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read the puzzle from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Export the highlighted grid to a file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export as HTML instead of plain text
    #[arg(long, requires = "output")]
    html: bool,

    /// Number of workers (defaults to available parallelism)
    #[arg(short = 'n', long)]
    workers: Option<usize>,

    /// Print a JSON report instead of the text report
    #[arg(long)]
    json: bool,

    /// Fail if any worker finds more than this many matches
    #[arg(long)]
    max_results: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random puzzle hiding the given words
    Generate {
        /// Number of rows
        #[arg(long)]
        rows: usize,

        /// Number of columns
        #[arg(long)]
        cols: usize,

        /// Seed for a reproducible puzzle
        #[arg(long)]
        seed: Option<u64>,

        /// Words to hide
        #[arg(required = true)]
        words: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Some(Commands::Generate {
            rows,
            cols,
            seed,
            words,
        }) => {
            let puzzle = generate_puzzle(*rows, *cols, words, *seed)?;
            io::stdout().write_all(puzzle.to_puzzle_text().as_bytes())?;
        }
        None => {
            let report = search(&cli)?;
            print_results(&cli, &report)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn search(cli: &Cli) -> Result<SearchReport> {
    let config = match cli.workers {
        Some(n) => SearchConfig::with_workers(n)?,
        None => SearchConfig::default(),
    }
    .max_results(cli.max_results);

    let file = match &cli.input {
        Some(path) => Some(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        None => None,
    };

    // No spinner while someone is typing the puzzle in
    let quiet = cli.json || (file.is_none() && io::stdin().is_terminal());
    let progress = spinner("Searching...", quiet);

    let result = match file {
        Some(file) => wordgrid::run(&config, BufReader::new(file)),
        None => wordgrid::run(&config, io::stdin().lock()),
    };

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    result.context("Search failed")
}

fn print_results(cli: &Cli, report: &SearchReport) -> Result<()> {
    if cli.json {
        output::write_json_report(&mut io::stdout().lock(), report)?;
    } else {
        output::print_report(report, !cli.no_color)?;
    }

    if let Some(path) = &cli.output {
        let format = if cli.html {
            ExportFormat::Html
        } else {
            ExportFormat::Text
        };
        output::export_grid(&report.grid, path, format)
            .with_context(|| format!("Failed to export to {}", path.display()))?;
        if !cli.json {
            println!("\nResults exported to {}", path.display());
        }
    }

    Ok(())
}
