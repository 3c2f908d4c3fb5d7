//! Per-card trick histograms accumulated over all solved deals

use crate::model::{Card, CARD_SLOTS};
use crate::solver::SolverVerdict;
use log::warn;

/// Buckets per histogram: 0 through 13 tricks
pub const TRICK_BUCKETS: usize = 14;

/// How often leading one card produced each trick count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadStat {
    pub counts: [u32; TRICK_BUCKETS],
    /// Set once any verdict has reported this card
    pub observed: bool,
}

impl LeadStat {
    /// Number of deals recorded for this card
    pub fn deals(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Σ counts[j] * j
    pub fn trick_sum(&self) -> u64 {
        self.counts
            .iter()
            .enumerate()
            .map(|(tricks, &n)| tricks as u64 * n as u64)
            .sum()
    }

    /// Deals in which this lead took at least `tricks` tricks
    pub fn at_least(&self, tricks: usize) -> u32 {
        self.counts.iter().skip(tricks).sum()
    }
}

/// The 64-slot lead table for one run, keyed by [`Card::index`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadTable {
    stats: [LeadStat; CARD_SLOTS],
}

impl Default for LeadTable {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadTable {
    pub fn new() -> Self {
        Self {
            stats: [LeadStat::default(); CARD_SLOTS],
        }
    }

    /// Record one deal's verdict.
    ///
    /// Each entry counts for its reported card only. Cards the solver folded
    /// into an equivalence class are not credited. Entries above 13 tricks
    /// are dropped with a warning and counted in the return value.
    pub fn fold(&mut self, verdict: &SolverVerdict) -> usize {
        let mut rejected = 0;
        for lead in &verdict.leads {
            let stat = &mut self.stats[lead.card.index()];
            match stat.counts.get_mut(lead.tricks as usize) {
                Some(bucket) => {
                    *bucket += 1;
                    stat.observed = true;
                }
                None => {
                    warn!("{} scored {} tricks, entry dropped", lead.card, lead.tricks);
                    rejected += 1;
                }
            }
        }
        rejected
    }

    /// Add the counts of another table, e.g. one filled from a separate shard
    pub fn merge(&mut self, other: &LeadTable) {
        for (mine, theirs) in self.stats.iter_mut().zip(other.stats.iter()) {
            for (a, b) in mine.counts.iter_mut().zip(theirs.counts.iter()) {
                *a += b;
            }
            mine.observed |= theirs.observed;
        }
    }

    pub fn get(&self, card: Card) -> &LeadStat {
        &self.stats[card.index()]
    }

    /// Observed slots in card-index order
    pub fn observed(&self) -> impl Iterator<Item = (Card, &LeadStat)> {
        self.stats
            .iter()
            .enumerate()
            .filter(|(_, stat)| stat.observed)
            .filter_map(|(index, stat)| Card::from_index(index).map(|card| (card, stat)))
    }
}
