//! Error types for grid editing and search preconditions.

use grid_util::point::Point;
use thiserror::Error;

/// Violated preconditions. A search that simply finds no path is not an error, see
/// [SearchOutcome](crate::SearchOutcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no start cell has been placed")]
    MissingStart,

    #[error("no end cell has been placed")]
    MissingEnd,

    #[error("{0} lies outside the grid")]
    OutOfBounds(Point),

    #[error("{0} is a barrier")]
    Blocked(Point),

    #[error("invalid grid layout: {0}")]
    InvalidLayout(String),

    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, Error>;
