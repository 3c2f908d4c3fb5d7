pub mod card;
pub mod contract;
pub mod deal;
pub mod hand;

pub use card::{Card, Rank, Suit, CARD_SLOTS};
pub use contract::{Contract, Strain};
pub use deal::{Deal, Direction, DEFAULT_FIRST_SEAT};
pub use hand::{Hand, Holding, HAND_SIZE};
