//! Grid-store error type.

use thiserror::Error;

use wh_core::Cell;

/// Errors produced by `wh-grid`.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("cell {cell} is outside the {height}x{width} grid")]
    OutOfBounds { cell: Cell, height: usize, width: usize },

    #[error("cell {0} is a wall and cannot be overwritten")]
    WallOverwrite(Cell),

    #[error("cell {0} is already occupied")]
    Occupied(Cell),

    #[error("grid {height}x{width} is too small (minimum 3x3)")]
    TooSmall { height: usize, width: usize },

    #[error("wall offset 0 leaves no free row for agents")]
    NoAgentRow,

    #[error("{requested} agents requested but the agent row holds {capacity}")]
    TooManyAgents { requested: usize, capacity: usize },
}

pub type GridResult<T> = Result<T, GridError>;
