//! The read, parse, batch, solve and fold loop for one run

use crate::batch::{Batch, BatchBuilder, BatchStatus, DEFAULT_MAX_BATCH};
use crate::error::{LeadError, Result};
use crate::model::{Contract, Direction, DEFAULT_FIRST_SEAT};
use crate::pbn::parse_deal_line;
use crate::solver::{check_verdicts, LeadSolver};
use crate::stats::{finalize, RankedReport};
use crate::tally::LeadTable;
use log::{debug, info, warn};
use std::io::BufRead;
use std::time::{Duration, Instant};

/// Run parameters, built by the caller from the command line
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub contract: Contract,
    pub leader: Direction,
    /// Accept only `[Deal "..."]` lines
    pub pbn_only: bool,
    pub max_batch: usize,
}

impl AnalysisConfig {
    pub fn new(contract: Contract) -> Self {
        Self {
            contract,
            leader: DEFAULT_FIRST_SEAT,
            pbn_only: false,
            max_batch: DEFAULT_MAX_BATCH,
        }
    }
}

/// What a completed run produced
#[derive(Debug)]
pub struct RunSummary {
    pub table: LeadTable,
    pub total_deals: u32,
    /// Lines that looked like deals but did not parse
    pub skipped_lines: usize,
    pub batches: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Mean solve time per deal, in seconds
    pub fn seconds_per_deal(&self) -> f64 {
        if self.total_deals == 0 {
            0.0
        } else {
            self.elapsed.as_secs_f64() / f64::from(self.total_deals)
        }
    }

    pub fn finalize(&self, contract: Contract) -> Result<RankedReport> {
        finalize(&self.table, self.total_deals, contract)
    }
}

/// Accumulates solved batches into the run's lead table
struct Driver<'a, S: LeadSolver> {
    solver: &'a S,
    table: LeadTable,
    total_deals: u32,
    batches: usize,
}

impl<S: LeadSolver> Driver<'_, S> {
    fn solve(&mut self, batch: Batch) -> Result<()> {
        let verdicts = self.solver.solve(&batch)?;
        check_verdicts(&batch, &verdicts)?;
        for verdict in &verdicts {
            self.table.fold(verdict);
        }
        self.batches += 1;
        self.total_deals += batch.len() as u32;
        debug!(
            "Batch {}: {} deals solved, {} total",
            self.batches,
            batch.len(),
            self.total_deals
        );
        Ok(())
    }
}

/// Analyze every deal readable from `reader`.
///
/// Lines that fail to parse are skipped with a warning. Any solver failure
/// ends the run; nothing is reported for a partial run.
pub fn run<R: BufRead, S: LeadSolver>(
    reader: R,
    solver: &S,
    config: &AnalysisConfig,
) -> Result<RunSummary> {
    let solver_limit = solver.max_batch();
    if solver_limit == 0 {
        return Err(LeadError::SolverCapability(
            "solver accepts no boards per call".to_string(),
        ));
    }

    let start = Instant::now();
    let mut builder = BatchBuilder::new(
        config.max_batch,
        solver_limit,
        config.contract.strain,
        config.leader,
    );
    debug!(
        "Analyzing {} with {} on lead, {} deals per batch",
        config.contract,
        config.leader.to_char(),
        builder.capacity()
    );

    let mut driver = Driver {
        solver,
        table: LeadTable::new(),
        total_deals: 0,
        batches: 0,
    };
    let mut skipped_lines = 0;

    // Raw bytes: PBN files are often Latin-1, which must not end the run
    for (i, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes.map_err(|source| LeadError::InputRead { line: i + 1, source })?;
        let line = String::from_utf8_lossy(&bytes);
        let deal = match parse_deal_line(&line, config.pbn_only) {
            Ok(Some(deal)) => deal,
            Ok(None) => continue,
            Err(e) => {
                warn!("Line {}: {} (skipped)", i + 1, e);
                skipped_lines += 1;
                continue;
            }
        };
        if let BatchStatus::Ready(batch) = builder.accumulate(deal) {
            driver.solve(batch)?;
            info!("{} deals analyzed", driver.total_deals);
        }
    }
    if let Some(batch) = builder.finish() {
        driver.solve(batch)?;
    }

    Ok(RunSummary {
        table: driver.table,
        total_deals: driver.total_deals,
        skipped_lines,
        batches: driver.batches,
        elapsed: start.elapsed(),
    })
}
