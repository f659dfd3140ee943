//! Cache simulator CLI.
//!
//! This binary drives the cache model with one of the built-in workloads. It supports:
//! 1. **Matrix multiply:** `cachesim mul <N> <TOTAL_KB> <LINE_BYTES> <WAYS> <POLICY> [LOG]`.
//! 2. **Matrix transpose:** `cachesim trans <N> <TOTAL_KB> <LINE_BYTES> <WAYS> <POLICY> [LOG]`.
//! 3. **Config run:** `cachesim run --config <file.json>` for anything the positional form can't express.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use cachesim_core::common::ConfigError;
use cachesim_core::config::{CacheConfig, Config, ReplacementPolicy, WorkloadConfig, WorkloadKind};
use cachesim_core::sim::SimReport;
use cachesim_core::{SimError, Simulation};

/// Exit status for failures writing the report itself.
const EXIT_OUTPUT: i32 = 1;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Set-associative cache simulator",
    long_about = "Replay a matrix workload's memory references against a set-associative cache and report the miss rate and the lifespan histogram of evicted lines.\n\nExamples:\n  cachesim mul 64 32 64 8 lru\n  cachesim trans 256 4 64 1 rr trace.log --seed 7\n  cachesim run --config sweep.json --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit debug diagnostics on stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Naive row-major matrix multiply, C = A * B.
    Mul(TraceArgs),

    /// Full-loop in-place matrix transpose.
    Trans(TraceArgs),

    /// Run a JSON configuration (cache + workload).
    Run {
        /// Configuration file.
        #[arg(short, long)]
        config: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Positional workload and cache geometry arguments.
#[derive(Args, Debug)]
struct TraceArgs {
    /// Matrix dimension.
    n: usize,

    /// Total cache size in KiB.
    total_kb: usize,

    /// Cache line size in bytes (power of two).
    line_bytes: usize,

    /// Associativity.
    ways: usize,

    /// Eviction policy.
    #[arg(value_enum, ignore_case = true)]
    policy: PolicyArg,

    /// Per-access diagnostic log file.
    log: Option<PathBuf>,

    /// Seed for random replacement (default: system clock).
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug, Clone, Copy)]
struct OutputArgs {
    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Print the cache configuration and statistics blocks around the report.
    #[arg(long)]
    show_config: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PolicyArg {
    /// Least recently used.
    #[value(name = "lru", alias = "0")]
    Lru,
    /// Random replacement.
    #[value(name = "rr", alias = "1", alias = "random")]
    Rr,
}

impl From<PolicyArg> for ReplacementPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Lru => Self::Lru,
            PolicyArg::Rr => Self::Random,
        }
    }
}

impl TraceArgs {
    /// Builds a run configuration; the size is converted from KiB to bytes.
    fn into_config(self, kind: WorkloadKind) -> Result<(Config, OutputArgs), SimError> {
        let size_bytes = self
            .total_kb
            .checked_mul(1024)
            .ok_or(ConfigError::SizeOverflow(self.total_kb))?;
        let config = Config {
            cache: CacheConfig {
                size_bytes,
                line_bytes: self.line_bytes,
                ways: self.ways,
                policy: self.policy.into(),
                seed: self.seed,
                log_path: self.log,
            },
            workload: WorkloadConfig {
                kind,
                n: self.n,
                ..WorkloadConfig::default()
            },
        };
        Ok((config, self.output))
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Mul(args) => args.into_config(WorkloadKind::Multiply),
        Commands::Trans(args) => args.into_config(WorkloadKind::Transpose),
        Commands::Run { config, output } => Config::from_file(&config).map(|c| (c, output)),
    }
    .and_then(|(config, output)| simulate(&config, output));

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(e.exit_code());
    }
}

/// Installs a stderr `fmt` subscriber; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Builds and runs the simulation, then prints the report to stdout.
fn simulate(config: &Config, output: OutputArgs) -> Result<(), SimError> {
    let mut sim = Simulation::new(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if output.show_config {
        exit_on_output_error(sim.cache().write_config(&mut out));
    }
    let report = sim.run()?;
    if output.show_config {
        exit_on_output_error(sim.cache().stats().write_report(&mut out));
    }
    exit_on_output_error(print_report(&report, output.json, &mut out));
    Ok(())
}

fn print_report(report: &SimReport, json: bool, out: &mut impl Write) -> io::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
    } else {
        report.write_text(out)?;
    }
    out.flush()
}

fn exit_on_output_error(result: io::Result<()>) {
    if let Err(e) = result {
        eprintln!("Error: cannot write report: {e}");
        process::exit(EXIT_OUTPUT);
    }
}
