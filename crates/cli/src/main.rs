//! Cache simulator CLI.
//!
//! This binary replays a valgrind memory trace against a set-associative LRU
//! cache and prints the resulting counters. It performs:
//! 1. **Configuration:** Geometry from `-s`/`-E`/`-b`, optionally layered over a JSON file.
//! 2. **Replay:** Streams the trace through the simulator, echoing outcomes with `-v`.
//! 3. **Reporting:** One-line summary, sectioned breakdown (`--stats`), or JSON (`--json`).

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use csim_core::common::data::AccessEvent;
use csim_core::config::Config;
use csim_core::sim::{EventOutcomes, Simulator, TraceReader};
use csim_core::stats::{STATS_SECTIONS, SimStats};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Trace-driven set-associative LRU cache simulator",
    long_about = "Replay a valgrind memory trace against a write-back, write-allocate LRU cache.\n\nExamples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 1 -E 1 -b 1 -t traces/yi2.trace\n  csim --config cache.json --stats"
)]
struct Cli {
    /// Number of set index bits (number of sets is 2^s).
    #[arg(short = 's', value_name = "NUM")]
    set_bits: Option<u32>,

    /// Number of lines per set (associativity).
    #[arg(short = 'E', value_name = "NUM")]
    associativity: Option<usize>,

    /// Number of block offset bits (block size is 2^b).
    #[arg(short = 'b', value_name = "NUM")]
    block_bits: Option<u32>,

    /// Trace file containing memory accesses to simulate.
    #[arg(short = 't', value_name = "FILE")]
    trace: Option<PathBuf>,

    /// Print every trace event followed by its outcomes.
    #[arg(short, long)]
    verbose: bool,

    /// JSON configuration file; command-line flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the final counters as JSON instead of the summary line.
    #[arg(long)]
    json: bool,

    /// Print a sectioned breakdown (summary, cache, dirty, locality); all sections if none given.
    #[arg(long, value_name = "SECTION", num_args = 0.., value_delimiter = ',')]
    stats: Option<Vec<String>>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli);

    let geometry = config.cache.validate().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    let Some(trace_path) = config.trace.as_ref() else {
        eprintln!("Missing required command line argument: -t <file>");
        process::exit(1);
    };
    let reader = TraceReader::open(trace_path).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let mut sim = Simulator::new(geometry);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for event in reader {
        let event = event.unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        });
        let outcomes = sim.process(&event);
        if config.verbose {
            echo(&mut out, &event, &outcomes).unwrap_or_else(|e| {
                eprintln!("Error: cannot write verbose output: {e}");
                process::exit(1);
            });
        }
    }
    drop(out);

    report(&cli, &sim.finish());
}

/// Writes one verbose line, `<op> <addr>,<size> <outcome>...`, for an event
/// that touched the cache.
fn echo(out: &mut impl Write, event: &AccessEvent, outcomes: &EventOutcomes) -> io::Result<()> {
    if outcomes.is_empty() {
        return Ok(());
    }
    let line: Vec<String> = outcomes.iter().map(|o| o.to_string()).collect();
    writeln!(out, "{event} {}", line.join(" "))
}

/// Builds the run configuration from the optional config file and the flags.
///
/// Without `--config`, every geometry flag and the trace are required, as in
/// the reference tool. Exits with status 1 on any error.
fn resolve_config(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        }),
        None => {
            if cli.set_bits.is_none()
                || cli.associativity.is_none()
                || cli.block_bits.is_none()
                || cli.trace.is_none()
            {
                eprintln!("Missing required command line argument");
                eprintln!("Usage: csim [-hv] -s <num> -E <num> -b <num> -t <file>");
                process::exit(1);
            }
            Config::default()
        }
    };

    if let Some(s) = cli.set_bits {
        config.cache.set_bits = s;
    }
    if let Some(e) = cli.associativity {
        config.cache.associativity = e;
    }
    if let Some(b) = cli.block_bits {
        config.cache.block_bits = b;
    }
    if let Some(t) = &cli.trace {
        config.trace = Some(t.clone());
    }
    config.verbose |= cli.verbose;
    config
}

/// Prints the final counters in the format selected on the command line.
fn report(cli: &Cli, stats: &SimStats) {
    if cli.json {
        match serde_json::to_string_pretty(stats) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        return;
    }

    match &cli.stats {
        Some(sections) => {
            for s in sections {
                if !STATS_SECTIONS.contains(&s.as_str()) {
                    tracing::warn!(section = %s, "unknown stats section");
                }
            }
            stats.print_sections(sections);
        }
        None => stats.print(),
    }
}
