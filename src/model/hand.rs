use super::card::{Card, Rank, Suit};
use crate::error::ParseError;
use std::collections::BTreeSet;

/// Number of cards in a complete hand
pub const HAND_SIZE: usize = 13;

/// A holding represents the cards in one suit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Holding {
    pub ranks: BTreeSet<Rank>,
}

impl Holding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rank, returning false if it was already present
    pub fn add(&mut self, rank: Rank) -> bool {
        self.ranks.insert(rank)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn contains(&self, rank: Rank) -> bool {
        self.ranks.contains(&rank)
    }

    /// Ranks from highest to lowest
    pub fn descending(&self) -> impl Iterator<Item = Rank> + '_ {
        self.ranks.iter().rev().copied()
    }

    /// Parse holding from PBN notation (e.g., "AKQ", "T542", "-" or "" for void)
    pub fn from_pbn(s: &str) -> Result<Self, ParseError> {
        if s == "-" || s.is_empty() {
            return Ok(Self::new());
        }

        let mut holding = Self::new();
        for c in s.chars() {
            let rank = Rank::from_pbn_char(c).ok_or_else(|| {
                ParseError::MalformedHand(format!("invalid rank '{}' in \"{}\"", c, s))
            })?;
            if !holding.add(rank) {
                return Err(ParseError::MalformedHand(format!(
                    "rank '{}' repeated in \"{}\"",
                    c, s
                )));
            }
        }
        Ok(holding)
    }

    /// Format holding in PBN notation, Ace first
    pub fn to_pbn(&self) -> String {
        self.descending().map(|r| r.to_char()).collect()
    }
}

/// A hand represents all 13 cards held by one player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    pub spades: Holding,
    pub hearts: Holding,
    pub diamonds: Holding,
    pub clubs: Holding,
}

impl Hand {
    pub fn holding(&self, suit: Suit) -> &Holding {
        match suit {
            Suit::Spades => &self.spades,
            Suit::Hearts => &self.hearts,
            Suit::Diamonds => &self.diamonds,
            Suit::Clubs => &self.clubs,
        }
    }

    pub fn holding_mut(&mut self, suit: Suit) -> &mut Holding {
        match suit {
            Suit::Spades => &mut self.spades,
            Suit::Hearts => &mut self.hearts,
            Suit::Diamonds => &mut self.diamonds,
            Suit::Clubs => &mut self.clubs,
        }
    }

    fn len(&self) -> usize {
        self.spades.len() + self.hearts.len() + self.diamonds.len() + self.clubs.len()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.holding(card.suit).contains(card.rank)
    }

    /// Cards in PBN order: spades first, each suit from the top down
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        Suit::ALL
            .into_iter()
            .flat_map(move |suit| {
                self.holding(suit)
                    .descending()
                    .map(move |rank| Card::new(suit, rank))
            })
    }

    /// Parse hand from PBN notation (e.g., "AKQ.JT9.876.5432").
    ///
    /// The hand must hold exactly 13 distinct cards.
    pub fn from_pbn(s: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 4 {
            return Err(ParseError::MalformedHand(format!(
                "\"{}\" has {} suits, expected 4",
                s,
                parts.len()
            )));
        }

        let hand = Hand {
            spades: Holding::from_pbn(parts[0])?,
            hearts: Holding::from_pbn(parts[1])?,
            diamonds: Holding::from_pbn(parts[2])?,
            clubs: Holding::from_pbn(parts[3])?,
        };

        if hand.len() != HAND_SIZE {
            return Err(ParseError::MalformedHand(format!(
                "\"{}\" has {} cards, expected {}",
                s,
                hand.len(),
                HAND_SIZE
            )));
        }
        Ok(hand)
    }

    /// Format hand in PBN notation
    pub fn to_pbn(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.spades.to_pbn(),
            self.hearts.to_pbn(),
            self.diamonds.to_pbn(),
            self.clubs.to_pbn()
        )
    }
}
