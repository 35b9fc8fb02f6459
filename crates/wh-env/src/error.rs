use thiserror::Error;

use wh_core::{AgentId, WhError};
use wh_grid::GridError;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("{what} length {got} does not match agent count {expected}")]
    InvalidArgument {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("agent {0} does not exist")]
    UnknownAgent(AgentId),

    /// Out-of-bounds access, wall overwrite, or a construction failure.
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Config(#[from] WhError),
}

impl EnvError {
    /// `true` if a cell outside the grid was computed or supplied.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, EnvError::Grid(GridError::OutOfBounds { .. }))
    }
}

pub type EnvResult<T> = Result<T, EnvError>;
