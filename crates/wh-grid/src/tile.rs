//! Tagged cell content.
//!
//! Ownership of a cell is a pattern match on [`Tile`], not arithmetic on a
//! signed code.  The integer encoding survives only at the edge, for policy
//! layers that consume the grid as a numeric observation:
//!
//! | Tile                                 | Code        |
//! |--------------------------------------|-------------|
//! | `Empty`                              | `0`         |
//! | `Wall`                               | `1`         |
//! | `Box`                                | `2`         |
//! | `Agent { id, carrying: false }`      | `4 + id`    |
//! | `Agent { id, carrying: true }`       | `-(4 + id)` |
//!
//! Code `3` (delivered marker in older encodings) and `-1..=-3` decode to
//! `None`.

use wh_core::AgentId;

/// First code used for agents; agent `id` is `FIRST_AGENT_CODE + id`.
pub const FIRST_AGENT_CODE: i32 = 4;

/// The content of one grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    /// One unclaimed box quadrant.
    Box,
    /// An agent.  Broken agents keep their tile; the broken flag lives in
    /// the environment's registry.
    Agent { id: AgentId, carrying: bool },
}

impl Tile {
    /// An agent tile that is not carrying anything.
    #[inline]
    pub fn idle(id: AgentId) -> Tile {
        Tile::Agent { id, carrying: false }
    }

    /// `true` for `Empty`.
    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Tile::Empty)
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        matches!(self, Tile::Wall)
    }

    #[inline]
    pub fn is_box(self) -> bool {
        matches!(self, Tile::Box)
    }

    /// The agent occupying this tile, if any.
    #[inline]
    pub fn agent(self) -> Option<AgentId> {
        match self {
            Tile::Agent { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Same tile with the carrying flag replaced.  Non-agent tiles are
    /// returned unchanged.
    #[inline]
    pub fn with_carrying(self, carrying: bool) -> Tile {
        match self {
            Tile::Agent { id, .. } => Tile::Agent { id, carrying },
            other => other,
        }
    }

    /// Numeric observation code (see module docs).
    pub fn code(self) -> i32 {
        match self {
            Tile::Empty => 0,
            Tile::Wall => 1,
            Tile::Box => 2,
            Tile::Agent { id, carrying } => {
                let code = FIRST_AGENT_CODE + id.0 as i32;
                if carrying { -code } else { code }
            }
        }
    }

    /// Decode a numeric observation code.
    pub fn from_code(code: i32) -> Option<Tile> {
        match code {
            0 => Some(Tile::Empty),
            1 => Some(Tile::Wall),
            2 => Some(Tile::Box),
            c if c.unsigned_abs() >= FIRST_AGENT_CODE as u32 => Some(Tile::Agent {
                id:       AgentId(c.unsigned_abs() - FIRST_AGENT_CODE as u32),
                carrying: c < 0,
            }),
            _ => None,
        }
    }
}
