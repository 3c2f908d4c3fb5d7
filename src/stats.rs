//! Turning the lead table into ranked lead statistics

use crate::error::{LeadError, Result};
use crate::model::{Card, Contract};
use crate::tally::{LeadTable, TRICK_BUCKETS};

/// Final statistics for one lead card
#[derive(Debug, Clone, PartialEq)]
pub struct LeadRow {
    pub card: Card,
    pub counts: [u32; TRICK_BUCKETS],
    /// Mean tricks taken by the defence (matchpoints)
    pub average_tricks: f64,
    /// Percent of deals where the lead defeats the contract (IMPs)
    pub set_percentage: f64,
    /// Ties for the highest set percentage, which is above zero
    pub best_for_set: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedReport {
    pub contract: Contract,
    pub total_deals: u32,
    pub max_set_percentage: f64,
    /// Observed leads by decreasing average tricks, ties in card-index order
    pub rows: Vec<LeadRow>,
}

impl RankedReport {
    /// Largest single histogram count, for sizing report columns
    pub fn highest_count(&self) -> u32 {
        self.rows
            .iter()
            .flat_map(|r| r.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Compute averages, set percentages and the ranking.
///
/// Fails with [`LeadError::NoDeals`] when `total_deals` is zero.
pub fn finalize(table: &LeadTable, total_deals: u32, contract: Contract) -> Result<RankedReport> {
    if total_deals == 0 {
        return Err(LeadError::NoDeals);
    }
    let setting_tricks = contract.setting_tricks();
    let deals = f64::from(total_deals);

    // `observed` yields cards in index order, and the stable sort keeps it for ties
    let mut rows: Vec<(u32, LeadRow)> = table
        .observed()
        .map(|(card, stat)| {
            let set_count = stat.at_least(setting_tricks);
            let row = LeadRow {
                card,
                counts: stat.counts,
                average_tricks: stat.trick_sum() as f64 / deals,
                set_percentage: 100.0 * f64::from(set_count) / deals,
                best_for_set: false,
            };
            (set_count, row)
        })
        .collect();

    let max_set_count = rows.iter().map(|(n, _)| *n).max().unwrap_or(0);
    if max_set_count > 0 {
        for (n, row) in rows.iter_mut() {
            row.best_for_set = *n == max_set_count;
        }
    }
    rows.sort_by(|(_, a), (_, b)| b.average_tricks.total_cmp(&a.average_tricks));

    Ok(RankedReport {
        contract,
        total_deals,
        max_set_percentage: 100.0 * f64::from(max_set_count) / deals,
        rows: rows.into_iter().map(|(_, row)| row).collect(),
    })
}
