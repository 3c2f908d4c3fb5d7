/// Contract parsing for the lead analysis
use std::fmt;

/// The strain (denomination) of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strain {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    NoTrump,
}

impl Strain {
    /// Parse strain from string
    pub fn from_str(s: &str) -> Option<Strain> {
        match s.to_uppercase().as_str() {
            "C" | "CLUBS" => Some(Strain::Clubs),
            "D" | "DIAMONDS" => Some(Strain::Diamonds),
            "H" | "HEARTS" => Some(Strain::Hearts),
            "S" | "SPADES" => Some(Strain::Spades),
            "NT" | "N" | "NOTRUMP" => Some(Strain::NoTrump),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Strain::Clubs => 'C',
            Strain::Diamonds => 'D',
            Strain::Hearts => 'H',
            Strain::Spades => 'S',
            Strain::NoTrump => 'N',
        }
    }
}

/// A contract as far as the opening lead cares: level and strain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
}

impl Contract {
    pub fn new(level: u8, strain: Strain) -> Option<Contract> {
        (1..=7).contains(&level).then_some(Contract { level, strain })
    }

    /// Parse a contract string like "4S", "3n" or "3NT"
    pub fn parse(s: &str) -> Option<Contract> {
        let s = s.trim();
        let mut chars = s.chars();
        let level = chars.next()?.to_digit(10)? as u8;
        let strain = Strain::from_str(chars.as_str())?;
        Contract::new(level, strain)
    }

    /// Tricks the defence needs to defeat the contract
    pub fn setting_tricks(&self) -> usize {
        8 - self.level as usize
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.strain {
            Strain::NoTrump => write!(f, "{}NT", self.level),
            strain => write!(f, "{}{}", self.level, strain.letter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contract() {
        assert_eq!(Contract::parse("4S"), Contract::new(4, Strain::Spades));
        assert_eq!(Contract::parse("2h"), Contract::new(2, Strain::Hearts));
        assert_eq!(Contract::parse("3N"), Contract::new(3, Strain::NoTrump));
        assert_eq!(Contract::parse("3NT"), Contract::new(3, Strain::NoTrump));
        assert_eq!(Contract::parse("7C"), Contract::new(7, Strain::Clubs));
    }

    #[test]
    fn test_parse_contract_invalid() {
        assert_eq!(Contract::parse("0S"), None);
        assert_eq!(Contract::parse("8H"), None);
        assert_eq!(Contract::parse("4X"), None);
        assert_eq!(Contract::parse("S4"), None);
        assert_eq!(Contract::parse("4"), None);
        assert_eq!(Contract::parse(""), None);
    }

    #[test]
    fn test_setting_tricks() {
        assert_eq!(Contract::parse("1N").unwrap().setting_tricks(), 7);
        assert_eq!(Contract::parse("4S").unwrap().setting_tricks(), 4);
        assert_eq!(Contract::parse("7C").unwrap().setting_tricks(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Contract::parse("3n").unwrap().to_string(), "3NT");
        assert_eq!(Contract::parse("4s").unwrap().to_string(), "4S");
    }
}
