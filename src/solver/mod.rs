//! The double-dummy solver seam.
//!
//! The analysis only needs one capability from a solver: given a batch of
//! boards, report how many tricks the leader's side takes for each distinct
//! opening lead. [`LeadSolver`] captures that; [`DoubleDummySolver`] is the
//! production implementation.

pub mod dd;
#[cfg(test)]
pub mod fake;

pub use dd::{lead_classes, DoubleDummySolver, MAX_BOARDS_PER_CALL};

use crate::batch::Batch;
use crate::error::{LeadError, SolverError};
use crate::model::Card;

/// Highest trick count a verdict may report
pub const MAX_TRICKS: u8 = 13;

/// Status codes carried by [`SolverError`]
pub mod status {
    pub const UNKNOWN_FAULT: i32 = -1;
    pub const PLAYED_CARD: i32 = -13;
    pub const CARD_COUNT: i32 = -14;
    pub const TOO_MANY_BOARDS: i32 = -101;
    pub const BAD_VERDICT: i32 = -201;
}

/// Tricks taken by the leader's side when `card` is led
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadScore {
    pub card: Card,
    pub tricks: u8,
}

/// Solver result for one board.
///
/// Holds one entry per class of equivalent leads, scored on the top card of
/// the class, so it usually has fewer than 13 entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverVerdict {
    pub leads: Vec<LeadScore>,
}

impl SolverVerdict {
    pub fn new(leads: Vec<LeadScore>) -> Self {
        Self { leads }
    }
}

pub trait LeadSolver {
    /// Most boards accepted by a single [`LeadSolver::solve`] call
    fn max_batch(&self) -> usize;

    /// Solve every board of the batch, returning verdicts in board order
    fn solve(&self, batch: &Batch) -> Result<Vec<SolverVerdict>, SolverError>;
}

/// Reject results that do not line up with the submitted batch
pub fn check_verdicts(batch: &Batch, verdicts: &[SolverVerdict]) -> Result<(), SolverError> {
    if verdicts.len() != batch.len() {
        return Err(SolverError::new(
            status::BAD_VERDICT,
            format!("{} verdicts for {} boards", verdicts.len(), batch.len()),
        ));
    }
    for (i, verdict) in verdicts.iter().enumerate() {
        if let Some(bad) = verdict.leads.iter().find(|l| l.tricks > MAX_TRICKS) {
            return Err(SolverError::new(
                status::BAD_VERDICT,
                format!("board {}: {} scored {} tricks", i + 1, bad.card, bad.tricks),
            ));
        }
    }
    Ok(())
}

/// Worker count to use: the override when given, else the detected core count
pub fn resolve_threads(threads: Option<usize>) -> usize {
    match threads {
        Some(n) if n > 0 => n,
        _ => std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1),
    }
}

/// Size the global solver worker pool. Call once, before the first batch.
pub fn configure_parallelism(threads: Option<usize>) -> Result<usize, LeadError> {
    let n = resolve_threads(threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build_global()
        .map_err(|e| LeadError::SolverUnavailable(e.to_string()))?;
    log::debug!("Solver worker pool sized to {} threads", n);
    Ok(n)
}
