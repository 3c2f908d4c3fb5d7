use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes reported by the `leadsolver` binary
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const SOLVER_UNAVAILABLE: u8 = 1;
    pub const SOLVER_CAPABILITY: u8 = 2;
    pub const BAD_INPUT_FILE: u8 = 3;
    pub const BAD_OUTPUT_FILE: u8 = 4;
    pub const ARG_PARSING: u8 = 5;
    pub const NO_DEALS: u8 = 6;
}

/// A deal line that could not be turned into a [`crate::Deal`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Missing closing double quote for PBN style [Deal \"...\"] notation")]
    MissingTerminator,

    #[error("Malformed hand: {0}")]
    MalformedHand(String),
}

/// Failure status returned by a solver call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("solver returned error {code}: {message}")]
pub struct SolverError {
    /// Nonzero status code, passed through to the process exit status
    pub code: i32,
    pub message: String,
}

impl SolverError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("Contract must be a level (1-7) followed by S, H, D, C or N. Bad value: {0}")]
    InvalidContract(String),

    #[error("Leader must be N, E, S or W (default is W). Bad value: {0}")]
    InvalidLeader(String),

    #[error("Double dummy solver unavailable: {0}")]
    SolverUnavailable(String),

    #[error("Double dummy solver lacks a required capability: {0}")]
    SolverCapability(String),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("Unable to open/read file: {path}")]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to read input at line {line}")]
    InputRead {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to open/write file: {path}")]
    OutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No deals were analyzed")]
    NoDeals,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LeadError {
    /// Exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            LeadError::InvalidContract(_) | LeadError::InvalidLeader(_) => exit_code::ARG_PARSING,
            LeadError::SolverUnavailable(_) => exit_code::SOLVER_UNAVAILABLE,
            LeadError::SolverCapability(_) => exit_code::SOLVER_CAPABILITY,
            // Only the low byte survives as a process status, and it must stay nonzero
            LeadError::Solver(e) => match (e.code & 0xff) as u8 {
                0 => u8::MAX,
                code => code,
            },
            LeadError::InputFile { .. } | LeadError::InputRead { .. } => {
                exit_code::BAD_INPUT_FILE
            }
            LeadError::OutputFile { .. } | LeadError::Io(_) | LeadError::Csv(_) => {
                exit_code::BAD_OUTPUT_FILE
            }
            LeadError::NoDeals => exit_code::NO_DEALS,
        }
    }
}

pub type Result<T> = std::result::Result<T, LeadError>;
