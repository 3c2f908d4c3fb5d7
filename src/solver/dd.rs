//! Production [`LeadSolver`] backed by the `bridge-solver` double-dummy engine

use super::{status, LeadScore, LeadSolver, SolverVerdict};
use crate::batch::{Batch, BoardRequest};
use crate::error::SolverError;
use crate::model::{Card, Deal, Direction, Rank, Strain, Suit};
use bridge_solver::cards::card_of;
use bridge_solver::{CutoffCache, Hands, PartialTrick, PatternCache, Solver};
use bridge_solver::{
    CLUB, DIAMOND, EAST, HEART, NORTH, NOTRUMP, SOUTH, SPADE, TOTAL_TRICKS, WEST,
};
use rayon::prelude::*;

/// Hard limit on boards per [`DoubleDummySolver::solve`] call
pub const MAX_BOARDS_PER_CALL: usize = 200;

/// Transposition cache size (log2 of entries) used per board
const CACHE_BITS: usize = 16;

/// Solves every distinct opening lead of each board. Boards of a batch run in
/// parallel on the global rayon pool.
#[derive(Debug, Clone, Default)]
pub struct DoubleDummySolver;

impl DoubleDummySolver {
    pub fn new() -> Self {
        Self
    }
}

impl LeadSolver for DoubleDummySolver {
    fn max_batch(&self) -> usize {
        MAX_BOARDS_PER_CALL
    }

    fn solve(&self, batch: &Batch) -> Result<Vec<SolverVerdict>, SolverError> {
        if batch.len() > MAX_BOARDS_PER_CALL {
            return Err(SolverError::new(
                status::TOO_MANY_BOARDS,
                format!(
                    "{} boards exceeds the limit of {}",
                    batch.len(),
                    MAX_BOARDS_PER_CALL
                ),
            ));
        }
        batch.boards.par_iter().map(solve_board).collect()
    }
}

/// Top card of each class of equivalent leads from `leader`'s hand.
///
/// Cards of one suit are equivalent when no card of that suit held by
/// another seat ranks between them. Classes come out spades first, each suit
/// from the top down.
pub fn lead_classes(deal: &Deal, leader: Direction) -> Vec<Card> {
    let hand = deal.hand(leader);
    let mut classes = Vec::new();
    for suit in Suit::ALL {
        let holding = hand.holding(suit);
        let mut in_sequence = false;
        for rank in Rank::DESCENDING {
            if holding.contains(rank) {
                if !in_sequence {
                    classes.push(Card::new(suit, rank));
                }
                in_sequence = true;
            } else {
                // Every card is dealt, so a rank missing here is held by another seat
                in_sequence = false;
            }
        }
    }
    classes
}

fn solve_board(board: &BoardRequest) -> Result<SolverVerdict, SolverError> {
    if !board.current_trick.is_empty() {
        return Err(SolverError::new(
            status::PLAYED_CARD,
            "only opening leads are supported",
        ));
    }

    let pbn = board.deal.to_pbn(Direction::North);
    let hands = Hands::from_pbn(&pbn).ok_or_else(|| {
        SolverError::new(status::CARD_COUNT, format!("solver rejected deal {}", pbn))
    })?;
    let trump = solver_strain(board.strain);
    let leader = solver_seat(board.leader);

    let mut cutoff_cache = CutoffCache::new(CACHE_BITS);
    let mut pattern_cache = PatternCache::new(CACHE_BITS);

    let mut leads = Vec::new();
    for card in lead_classes(&board.deal, board.leader) {
        let solver_card = solver_card(card);
        let mut remaining = hands;
        remaining[leader].remove(solver_card);
        let mut trick = PartialTrick::new();
        trick.add(solver_card, leader);

        let solver = Solver::new_mid_trick(remaining, trump, &trick).ok_or_else(|| {
            SolverError::new(status::UNKNOWN_FAULT, format!("cannot set up lead of {}", card))
        })?;
        let ns = solver.solve_mid_trick(&mut cutoff_cache, &mut pattern_cache, &trick);
        let tricks = if board.leader.is_north_south() {
            ns
        } else {
            (TOTAL_TRICKS as u8).saturating_sub(ns)
        };
        leads.push(LeadScore { card, tricks });
    }

    log::trace!("{}: {} lead classes", pbn, leads.len());
    Ok(SolverVerdict::new(leads))
}

fn solver_strain(strain: Strain) -> usize {
    match strain {
        Strain::Spades => SPADE,
        Strain::Hearts => HEART,
        Strain::Diamonds => DIAMOND,
        Strain::Clubs => CLUB,
        Strain::NoTrump => NOTRUMP,
    }
}

fn solver_seat(direction: Direction) -> usize {
    match direction {
        Direction::North => NORTH,
        Direction::East => EAST,
        Direction::South => SOUTH,
        Direction::West => WEST,
    }
}

fn solver_card(card: Card) -> usize {
    let suit = match card.suit {
        Suit::Spades => SPADE,
        Suit::Hearts => HEART,
        Suit::Diamonds => DIAMOND,
        Suit::Clubs => CLUB,
    };
    // Two is rank 0 and Ace rank 12 in the solver
    card_of(suit, card.rank.code() - Rank::Two.code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchBuilder;

    /// Each seat holds one whole suit
    const ONE_SUIT_EACH: &str =
        "N:AKQJT98765432... .AKQJT98765432.. ..AKQJT98765432. ...AKQJT98765432";

    fn deal() -> Deal {
        Deal::from_pbn("W:T5.K4.652.A98542 K6.QJT976.QT7.Q6 432.A.AKJ93.JT73 AQJ987.8532.84.K")
            .unwrap()
    }

    fn solve_one(deal: Deal, strain: Strain, leader: Direction) -> SolverVerdict {
        let batch = Batch {
            boards: vec![BoardRequest::opening_lead(deal, strain, leader)],
        };
        let mut verdicts = DoubleDummySolver::new().solve(&batch).unwrap();
        assert_eq!(verdicts.len(), 1);
        verdicts.remove(0)
    }

    #[test]
    fn test_lead_classes_coalesce_sequences() {
        // West holds T5 / K4 / 652 / A98542
        let classes: Vec<String> = lead_classes(&deal(), Direction::West)
            .iter()
            .map(|c| c.to_string())
            .collect();
        // 6-5 of diamonds touch, as do 9-8 and 5-4 of clubs
        assert_eq!(
            classes,
            vec!["ST", "S5", "HK", "H4", "D6", "D2", "CA", "C9", "C5", "C2"]
        );
    }

    #[test]
    fn test_lead_classes_single_suit() {
        let deal = Deal::from_pbn(ONE_SUIT_EACH).unwrap();
        let classes = lead_classes(&deal, Direction::North);
        assert_eq!(classes, vec![Card::new(Suit::Spades, Rank::Ace)]);
    }

    #[test]
    fn test_solve_all_leads_cash_out() {
        // North holds every spade: in no-trump the spade lead wins all 13 tricks
        let deal = Deal::from_pbn(ONE_SUIT_EACH).unwrap();
        let mut builder =
            BatchBuilder::new(10, MAX_BOARDS_PER_CALL, Strain::NoTrump, Direction::North);
        builder.accumulate(deal);
        let batch = builder.finish().unwrap();

        let verdicts = DoubleDummySolver::new().solve(&batch).unwrap();
        assert_eq!(verdicts.len(), 1);
        assert_eq!(
            verdicts[0].leads,
            vec![LeadScore {
                card: Card::new(Suit::Spades, Rank::Ace),
                tricks: 13
            }]
        );
    }

    #[test]
    fn test_east_west_leader_counts_own_tricks() {
        // Same layout seen from West: West holds the spades
        let from_west = ONE_SUIT_EACH.replacen('N', "W", 1);
        let verdict = solve_one(
            Deal::from_pbn(&from_west).unwrap(),
            Strain::NoTrump,
            Direction::West,
        );
        assert_eq!(
            verdict.leads,
            vec![LeadScore {
                card: Card::new(Suit::Spades, Rank::Ace),
                tricks: 13
            }]
        );

        // East holds the hearts here
        let verdict = solve_one(
            Deal::from_pbn(ONE_SUIT_EACH).unwrap(),
            Strain::NoTrump,
            Direction::East,
        );
        assert_eq!(verdict.leads.len(), 1);
        assert_eq!(verdict.leads[0].card, Card::new(Suit::Hearts, Rank::Ace));
        assert_eq!(verdict.leads[0].tricks, 13);
    }

    #[test]
    fn test_lead_classes_score_differently() {
        // West: twelve spades and the club two. South holds the other clubs,
        // so the club lead hands South eleven more club winners.
        let deal = Deal::from_pbn(
            "W:AKQJT9876543...2 2.AKQJT9876543.. .2.AKQJT9876543. ..2.AKQJT9876543",
        )
        .unwrap();
        let verdict = solve_one(deal, Strain::NoTrump, Direction::West);
        assert_eq!(
            verdict.leads,
            vec![
                LeadScore {
                    card: Card::new(Suit::Spades, Rank::Ace),
                    tricks: 12
                },
                LeadScore {
                    card: Card::new(Suit::Clubs, Rank::Two),
                    tricks: 1
                },
            ]
        );
    }

    #[test]
    fn test_solver_card_mapping() {
        assert_eq!(
            solver_card(Card::new(Suit::Hearts, Rank::Ace)),
            card_of(HEART, 12)
        );
        assert_eq!(
            solver_card(Card::new(Suit::Clubs, Rank::Two)),
            card_of(CLUB, 0)
        );
    }

    #[test]
    fn test_rejects_oversized_batch() {
        let batch = Batch {
            boards: (0..=MAX_BOARDS_PER_CALL)
                .map(|_| BoardRequest::opening_lead(deal(), Strain::Spades, Direction::West))
                .collect(),
        };
        let err = DoubleDummySolver::new().solve(&batch).unwrap_err();
        assert_eq!(err.code, status::TOO_MANY_BOARDS);
    }
}
