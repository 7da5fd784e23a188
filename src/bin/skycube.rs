//! Command-line front end: read a table, compute its skycube, save the report.

use clap::{ArgAction, Parser, ValueEnum};
use skycube::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algo {
    /// Recursive descent with closures
    Depth,
    /// Level by level
    Breadth,
    /// Level by level with domain-guided residual scan
    #[value(name = "br_dom")]
    BrDom,
}

#[derive(Parser)]
#[command(
    name = "skycube",
    version,
    about = "Compute the skyline of every subset of dimensions of a table"
)]
struct Cli {
    /// One letter per dimension: `l` keeps the lowest values, `u` the uppermost (default: all `l`)
    #[arg(short = 's', long = "directions", value_name = "LU")]
    directions: Option<String>,

    /// The first column holds a label for each point, printed instead of its line number
    #[arg(long)]
    label: bool,

    /// Traversal algorithm
    #[arg(short = 'a', long, value_enum, default_value_t = Algo::Depth)]
    algo: Algo,

    /// Depth only: do not compute the all-dimensions subset first
    #[arg(long)]
    nolast: bool,

    /// Also print the traversal counters as JSON
    #[arg(long)]
    json: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Input table, one point per line
    file: PathBuf,
}

fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) {
    env_logger::Builder::from_default_env()
        .filter_level(log_level(verbose))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SkycubeError> {
    let mut reader = DatasetReader::new().with_labels(cli.label);
    if let Some(directions) = &cli.directions {
        reader = reader.with_preferences(Preference::parse_all(directions)?);
    }
    let dataset = reader.read_path(&cli.file)?;
    let preferences = dataset.preferences().to_vec();
    let subsets = 1u64
        .checked_shl(dataset.n_dims() as u32)
        .map_or(u64::MAX, |n| n - 1);

    let strategy = match cli.algo {
        Algo::Depth => Strategy::Depth {
            full_subset_first: !cli.nolast,
        },
        Algo::Breadth => Strategy::Breadth,
        Algo::BrDom => Strategy::BreadthDomain,
    };
    println!("Selected algorithm {strategy} ({})", strategy.tag());

    let mut cube = Skycube::new(dataset);
    let started = Instant::now();
    let stats = cube.run(strategy)?.clone();
    let elapsed = started.elapsed();

    println!("Processed nodes: {}", stats.processed);
    if let Strategy::Depth { .. } = strategy {
        println!("Closure nodes: {}/{subsets}", stats.closed_nodes);
        println!(
            "Skyline points found directly / in total: {}/{}",
            stats.found_directly, stats.found_total
        );
    }
    println!("Type I nodes: {}/{subsets}", stats.type1);
    println!("Dominance tests: {}", stats.comparisons);
    println!("Elapsed: {elapsed:.3?}");
    if cli.json {
        let json = serde_json::to_string_pretty(&stats)
            .map_err(|e| SkycubeError::Io(e.to_string()))?;
        println!("{json}");
    }

    let path = result_path(&cli.file, strategy, &preferences);
    match File::create(&path) {
        Ok(file) => {
            println!("Saving result into file {}", path.display());
            let mut out = BufWriter::new(file);
            ReportWriter.write_result(&mut out, &cube)?;
            out.flush()?;
        }
        Err(e) => {
            println!(
                "Couldn't open file {} to store the result ({e}), sending to screen",
                path.display()
            );
            ReportWriter.write_result(io::stdout().lock(), &cube)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_log_levels() {
        assert_eq!(log_level(0), log::LevelFilter::Warn);
        assert_eq!(log_level(1), log::LevelFilter::Info);
        assert_eq!(log_level(2), log::LevelFilter::Debug);
        assert_eq!(log_level(7), log::LevelFilter::Trace);
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from(["skycube", "-s", "lu", "-a", "br_dom", "-vv", "data.txt"])
            .unwrap();
        assert_eq!(cli.directions.as_deref(), Some("lu"));
        assert_eq!(cli.algo, Algo::BrDom);
        assert_eq!(log_level(cli.verbose), log::LevelFilter::Debug);
    }
}
