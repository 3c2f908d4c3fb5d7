use super::card::{Card, CARD_SLOTS};
use super::hand::Hand;
use crate::error::ParseError;
use std::fmt;

/// Seat of the first hand when a deal string carries no `N:`/`E:`/`S:`/`W:`
/// designator. West is the GIB convention.
pub const DEFAULT_FIRST_SEAT: Direction = Direction::West;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    North,
    East,
    South,
    #[default]
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    pub fn next(&self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub fn is_north_south(&self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// Returns directions in clockwise order starting from this direction
    pub fn clockwise_from(&self) -> [Direction; 4] {
        [*self, self.next(), self.next().next(), self.next().next().next()]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "North"),
            Direction::East => write!(f, "East"),
            Direction::South => write!(f, "South"),
            Direction::West => write!(f, "West"),
        }
    }
}

/// A complete deal: four 13-card hands that partition the deck.
///
/// Only [`Deal::from_hands`] and [`Deal::from_pbn`] build a `Deal`, and both
/// check the partition, so every `Deal` value is a valid one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    north: Hand,
    east: Hand,
    south: Hand,
    west: Hand,
}

impl Deal {
    /// Build a deal from four hands listed clockwise from `first`
    pub fn from_hands(first: Direction, hands: [Hand; 4]) -> Result<Self, ParseError> {
        let mut seen = [false; CARD_SLOTS];
        for hand in &hands {
            for card in hand.cards() {
                if std::mem::replace(&mut seen[card.index()], true) {
                    return Err(ParseError::MalformedHand(format!(
                        "{} appears in more than one hand",
                        card
                    )));
                }
            }
        }
        if let Some(missing) = Card::deck().find(|c| !seen[c.index()]) {
            return Err(ParseError::MalformedHand(format!("{} is not dealt", missing)));
        }

        let mut slots: [Option<Hand>; 4] = Default::default();
        for (dir, hand) in first.clockwise_from().into_iter().zip(hands) {
            slots[dir as usize] = Some(hand);
        }
        let [north, east, south, west] = slots.map(Option::unwrap_or_default);
        Ok(Deal {
            north,
            east,
            south,
            west,
        })
    }

    pub fn hand(&self, direction: Direction) -> &Hand {
        match direction {
            Direction::North => &self.north,
            Direction::East => &self.east,
            Direction::South => &self.south,
            Direction::West => &self.west,
        }
    }

    /// Format deal in PBN notation: "N:spades.hearts.diamonds.clubs spades.hearts... ..."
    pub fn to_pbn(&self, first: Direction) -> String {
        let parts: Vec<String> = first
            .clockwise_from()
            .iter()
            .map(|d| self.hand(*d).to_pbn())
            .collect();
        format!("{}:{}", first.to_char(), parts.join(" "))
    }

    /// Parse the deal payload "W:hand hand hand hand".
    ///
    /// The seat designator is optional and defaults to [`DEFAULT_FIRST_SEAT`].
    /// Tokens after the fourth hand are ignored.
    pub fn from_pbn(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        let (first, hands_str) = match s.split_once(':') {
            Some((seat, rest)) if !seat.contains(char::is_whitespace) => {
                let mut chars = seat.chars();
                let dir = match (chars.next(), chars.next()) {
                    (Some(c), None) => Direction::from_char(c),
                    _ => None,
                };
                let dir = dir.ok_or_else(|| {
                    ParseError::MalformedHand(format!("invalid seat designator \"{}\"", seat))
                })?;
                (dir, rest)
            }
            _ => (DEFAULT_FIRST_SEAT, s),
        };

        let hand_strs: Vec<&str> = hands_str.split_whitespace().take(4).collect();
        if hand_strs.len() != 4 {
            return Err(ParseError::MalformedHand(format!(
                "found {} hands, expected 4",
                hand_strs.len()
            )));
        }

        let hands = [
            Hand::from_pbn(hand_strs[0])?,
            Hand::from_pbn(hand_strs[1])?,
            Hand::from_pbn(hand_strs[2])?,
            Hand::from_pbn(hand_strs[3])?,
        ];
        Deal::from_hands(first, hands)
    }
}
