//! leadsolver: rank opening leads over a file of deals by double-dummy analysis

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use lead_solver::analysis::{self, AnalysisConfig};
use lead_solver::batch::DEFAULT_MAX_BATCH;
use lead_solver::error::exit_code;
use lead_solver::pbn::is_pbn_path;
use lead_solver::report::{write_report, ReportFormat};
use lead_solver::solver::{configure_parallelism, DoubleDummySolver};
use lead_solver::{Contract, Direction, LeadError};

/// Opening lead analyzer
///
/// Solves every deal in the input double dummy and reports, for each card the
/// leader can lead, how many tricks the defence takes and how often the
/// contract is set.
#[derive(Parser, Debug)]
#[command(name = "leadsolver", author, version, about)]
struct Cli {
    /// Contract level and strain, e.g. 4S, 3N or 6NT
    contract: String,

    /// Deal file: PBN [Deal "..."] lines or bare "W:hand hand hand hand" lines
    input: PathBuf,

    /// Output file (default: standard output)
    output: Option<PathBuf>,

    /// Seat on opening lead: N, E, S or W
    #[arg(short, long, default_value = "W", value_name = "SEAT")]
    leader: String,

    /// Only accept [Deal "..."] lines (implied by a .pbn input file)
    #[arg(short, long)]
    pbn: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Enable verbose logging (use -vv for trace output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Deals sent to the solver per call
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_BATCH,
        env = "LEADSOLVER_MAX_BATCH",
        value_name = "N"
    )]
    max_batch: usize,

    /// Solver worker threads (default: one per core)
    #[arg(short = 'j', long, env = "LEADSOLVER_THREADS", value_name = "N")]
    threads: Option<usize>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too
            let code = if e.use_stderr() {
                exit_code::ARG_PARSING
            } else {
                exit_code::SUCCESS
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = e
                .downcast_ref::<LeadError>()
                .map(LeadError::exit_code)
                .unwrap_or(exit_code::SOLVER_UNAVAILABLE);
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    debug!("leadsolver v{}", env!("CARGO_PKG_VERSION"));

    let contract = Contract::parse(&cli.contract)
        .ok_or_else(|| LeadError::InvalidContract(cli.contract.clone()))?;
    let leader = parse_leader(&cli.leader)?;

    let input = File::open(&cli.input).map_err(|source| LeadError::InputFile {
        path: cli.input.clone(),
        source,
    })?;
    let pbn_only = cli.pbn || is_pbn_path(&cli.input);
    if pbn_only && !cli.pbn {
        debug!("{} has a .pbn extension, reading [Deal] lines only", cli.input.display());
    }

    let output: Box<dyn Write> = match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| LeadError::OutputFile {
                path: path.clone(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    let threads = configure_parallelism(cli.threads)?;
    let config = AnalysisConfig {
        contract,
        leader,
        pbn_only,
        max_batch: cli.max_batch,
    };
    info!(
        "Analyzing leads by {} against {} using {} threads",
        leader, contract, threads
    );

    let summary = analysis::run(BufReader::new(input), &DoubleDummySolver::new(), &config)
        .with_context(|| format!("Analysis of {} failed", cli.input.display()))?;
    info!(
        "Double dummy analysis completed for {} deals in {:.1} s ({:.3} sec/deal ave)",
        summary.total_deals,
        summary.elapsed.as_secs_f64(),
        summary.seconds_per_deal()
    );
    if summary.skipped_lines > 0 {
        warn!("{} malformed lines were skipped", summary.skipped_lines);
    }

    let report = summary.finalize(contract)?;
    write_report(&report, cli.format, output).context("Failed to write report")?;
    Ok(())
}

fn parse_leader(s: &str) -> Result<Direction, LeadError> {
    let mut chars = s.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Direction::from_char(c),
        _ => None,
    }
    .ok_or_else(|| LeadError::InvalidLeader(s.to_string()))
}
