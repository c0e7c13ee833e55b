//! Error types for the accumulator.

use thiserror::Error;

/// Result type alias for accumulator operations
pub type Result<T> = std::result::Result<T, CalcError>;

/// Errors that can occur while operating the accumulator or replaying a script.
#[derive(Error, Debug)]
pub enum CalcError {
    /// An operation was invoked with the wrong number of arguments
    #[error("{op} expects {expected} argument(s) but got {found}")]
    InvalidArgumentCount {
        op: &'static str,
        expected: usize,
        found: usize,
    },

    /// A reduction was requested with no values present
    #[error("cannot {op}: accumulator holds no values")]
    EmptyAccumulator { op: &'static str },

    /// Decimal arithmetic left the representable range
    #[error("{op} overflowed the decimal range")]
    Overflow { op: &'static str },

    /// Operation name not recognised
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// Failed to open or read the script file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed script record
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Missing script file argument
    #[error("Missing script file argument. Usage: accumulator-calc <script.csv>")]
    MissingArgument,
}
