//! Deterministic stand-in for the double-dummy solver

use super::{lead_classes, LeadScore, LeadSolver, SolverVerdict, MAX_TRICKS};
use crate::batch::{Batch, BoardRequest};
use crate::error::SolverError;
use crate::model::Direction;
use std::cell::RefCell;

/// Scores each lead class from the card index and the deal, so the same deal
/// always gets the same verdict. Records the size of every batch it sees.
#[derive(Debug, Default)]
pub struct FakeSolver {
    pub limit: usize,
    /// Fail the call with this (1-based) number, returning `fail_code`
    pub fail_on_call: Option<usize>,
    pub fail_code: i32,
    pub batch_sizes: RefCell<Vec<usize>>,
}

impl FakeSolver {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    pub fn failing(limit: usize, call: usize, code: i32) -> Self {
        Self {
            limit,
            fail_on_call: Some(call),
            fail_code: code,
            ..Default::default()
        }
    }

    pub fn verdict(board: &BoardRequest) -> SolverVerdict {
        let salt: usize = board
            .deal
            .hand(Direction::North)
            .cards()
            .map(|c| c.index())
            .sum();
        let leads = lead_classes(&board.deal, board.leader)
            .into_iter()
            .map(|card| LeadScore {
                card,
                tricks: ((card.index() + salt) % (MAX_TRICKS as usize + 1)) as u8,
            })
            .collect();
        SolverVerdict::new(leads)
    }
}

impl LeadSolver for FakeSolver {
    fn max_batch(&self) -> usize {
        self.limit
    }

    fn solve(&self, batch: &Batch) -> Result<Vec<SolverVerdict>, SolverError> {
        let mut sizes = self.batch_sizes.borrow_mut();
        sizes.push(batch.len());
        if self.fail_on_call == Some(sizes.len()) {
            return Err(SolverError::new(self.fail_code, "injected failure"));
        }
        Ok(batch.iter().map(Self::verdict).collect())
    }
}
