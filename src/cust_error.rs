//! This module contains all custom errors used in this library.

use std::fmt;
use std::error::Error;

#[derive(Debug)]
pub enum ImportError {
    IoError(std::io::Error),
    /// The input does not follow the DIMACS `.col` layout. Carries the reason.
    Malformed(String),
    BadIntError(std::num::ParseIntError),
}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> ImportError {
        ImportError::IoError(e)
    }
}

impl From<std::num::ParseIntError> for ImportError {
    fn from(e: std::num::ParseIntError) -> ImportError {
        ImportError::BadIntError(e)
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(_) => write!(f, "Import: IoError"),
            Self::Malformed(msg) => write!(f, "Import: Input is malformed: {}", msg),
            Self::BadIntError(_) => write!(f, "Import: Integer is malformed."),
        }
    }
}

impl Error for ImportError {}

/// Errors of the query layer.
///
/// A proven infeasible instance is not an error: the feasibility operations
/// report it as `Ok(None)`. `Solver` in contrast means the external solver
/// stopped with a status that proves neither feasibility nor infeasibility
/// (timeout, numerical failure), and must never be read as a negative answer.
#[derive(Debug)]
pub enum QueryError {
    InvalidParameter(String),
    Precondition(String),
    Solver(String),
    InvalidSolution(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Self::Precondition(msg) => write!(f, "Precondition violated: {}", msg),
            Self::Solver(status) => write!(f, "Solver stopped without a verdict: {}", status),
            Self::InvalidSolution(msg) => write!(f, "InvalidSolution: {}", msg),
        }
    }
}

impl Error for QueryError {}
