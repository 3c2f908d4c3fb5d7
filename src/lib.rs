pub mod analysis;
pub mod batch;
pub mod error;
pub mod model;
pub mod pbn;
pub mod report;
pub mod solver;
pub mod stats;
pub mod tally;

pub use error::{LeadError, ParseError, Result, SolverError};
pub use model::*;
