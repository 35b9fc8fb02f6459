//! Grid coordinates and the five-way action set.
//!
//! Coordinates are signed so that applying an action to a border cell yields
//! a representable (if out-of-bounds) cell.  The grid, not the coordinate,
//! decides whether a cell is valid.

use std::fmt;

use crate::{WhError, WhResult};

// ── Cell ─────────────────────────────────────────────────────────────────────

/// A `(row, col)` position on the grid.  Row 0 is the top border.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The cell reached by applying `action` once.  `Action::Stand` returns
    /// `self`.
    #[inline]
    pub fn step(self, action: Action) -> Cell {
        let (dr, dc) = action.delta();
        Cell::new(self.row + dr, self.col + dc)
    }

    /// Manhattan distance in cells.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ── Action ───────────────────────────────────────────────────────────────────

/// One agent's action for a tick.
///
/// The discriminants are the wire codes used by policy layers
/// (`0` stand, `1` up, `2` down, `3` left, `4` right).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Action {
    #[default]
    Stand = 0,
    Up    = 1,
    Down  = 2,
    Left  = 3,
    Right = 4,
}

impl Action {
    /// All actions in code order.
    pub const ALL: [Action; 5] = [
        Action::Stand,
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
    ];

    /// The four moving actions.
    pub const MOVES: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Unit `(d_row, d_col)` offset.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::Stand => (0, 0),
            Action::Up    => (-1, 0),
            Action::Down  => (1, 0),
            Action::Left  => (0, -1),
            Action::Right => (0, 1),
        }
    }

    /// Numeric action code.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// `true` for every action except `Stand`.  Moving actions are charged
    /// step cost whether or not the move succeeds.
    #[inline]
    pub fn is_move(self) -> bool {
        !matches!(self, Action::Stand)
    }
}

impl TryFrom<u8> for Action {
    type Error = WhError;

    fn try_from(code: u8) -> WhResult<Action> {
        Action::ALL
            .get(code as usize)
            .copied()
            .ok_or(WhError::InvalidAction(code))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Stand => "stand",
            Action::Up    => "up",
            Action::Down  => "down",
            Action::Left  => "left",
            Action::Right => "right",
        })
    }
}
