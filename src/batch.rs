//! Grouping parsed deals into solver-sized batches

use crate::model::{Card, Deal, Direction, Strain};

/// Deals per solver call when the caller does not choose
pub const DEFAULT_MAX_BATCH: usize = 50;

/// One deal as submitted to the solver, with the run's fixed parameters
#[derive(Debug, Clone)]
pub struct BoardRequest {
    pub deal: Deal,
    pub strain: Strain,
    /// Seat on opening lead
    pub leader: Direction,
    /// Cards already played to the current trick. Always empty, since only
    /// the opening lead is analyzed.
    pub current_trick: Vec<Card>,
}

impl BoardRequest {
    pub fn opening_lead(deal: Deal, strain: Strain, leader: Direction) -> Self {
        Self {
            deal,
            strain,
            leader,
            current_trick: Vec::new(),
        }
    }
}

/// A group of boards solved in one call
#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub boards: Vec<BoardRequest>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoardRequest> {
        self.boards.iter()
    }
}

#[derive(Debug)]
pub enum BatchStatus {
    /// A full batch, ready to be solved
    Ready(Batch),
    /// The deal was queued; the batch is not full yet
    Pending,
}

/// Collects deals until a batch reaches capacity
#[derive(Debug)]
pub struct BatchBuilder {
    capacity: usize,
    strain: Strain,
    leader: Direction,
    pending: Vec<BoardRequest>,
}

impl BatchBuilder {
    /// `max_batch` is the caller's limit and `solver_limit` the solver's hard
    /// limit; the smaller one wins, and capacity is never below one deal.
    pub fn new(max_batch: usize, solver_limit: usize, strain: Strain, leader: Direction) -> Self {
        let capacity = max_batch.min(solver_limit).max(1);
        Self {
            capacity,
            strain,
            leader,
            pending: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn accumulate(&mut self, deal: Deal) -> BatchStatus {
        self.pending
            .push(BoardRequest::opening_lead(deal, self.strain, self.leader));
        if self.pending.len() >= self.capacity {
            BatchStatus::Ready(self.take())
        } else {
            BatchStatus::Pending
        }
    }

    /// Flush the partial batch at end of input
    pub fn finish(&mut self) -> Option<Batch> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.take())
        }
    }

    fn take(&mut self) -> Batch {
        let boards = std::mem::take(&mut self.pending);
        Batch { boards }
    }
}
