//! Arena construction.
//!
//! # Box-cluster arena
//!
//! [`ArenaSpec::build`] lays out a square arena of `n × n` boxes, each box a
//! 2×2 block of quadrant cells:
//!
//! ```text
//! dim = 2 + 2·wall_offset + (n − 1)·box_offset + 2·n
//!
//!   X X X X X X X X X      n = 2, wall_offset = 1, box_offset = 1
//!   X 0 1 . . . . . X    ← agents in row 1 (first free row)
//!   X . # # . # # . X
//!   X . # # . # # . X
//!   X . . . . . . . X    ← box_offset rows/columns between boxes
//!   X . # # . # # . X
//!   X . # # . # # . X
//!   X . . . . . . . X    ← wall_offset rows of space
//!   X X X X X X X X X
//! ```
//!
//! # Explicit layouts
//!
//! [`LayoutBuilder`] places walls, boxes, and agents at given cells on a
//! bordered grid of any shape.  Agent ids follow insertion order.

use wh_core::{AgentId, Cell};

use crate::{Grid, GridError, GridResult, Tile};

/// A constructed grid plus the initial agent positions, indexed by
/// `AgentId`.
#[derive(Clone, Debug)]
pub struct Arena {
    pub grid:   Grid,
    pub agents: Vec<Cell>,
}

// ── ArenaSpec ─────────────────────────────────────────────────────────────────

/// Parameters of the standard box-cluster arena.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaSpec {
    /// Empty cells between the wall border and the outermost boxes.
    pub wall_offset:   usize,
    /// Empty cells between adjacent boxes.
    pub box_offset:    usize,
    /// Boxes per side (`n`); the arena holds `n²` boxes, `4n²` quadrants.
    pub box_grid_size: usize,
    pub agent_count:   usize,
}

impl Default for ArenaSpec {
    fn default() -> Self {
        Self {
            wall_offset:   1,
            box_offset:    1,
            box_grid_size: 2,
            agent_count:   2,
        }
    }
}

impl ArenaSpec {
    /// Side length of the square arena, border included.
    pub fn dim(&self) -> usize {
        let n = self.box_grid_size;
        2 + 2 * self.wall_offset + n.saturating_sub(1) * self.box_offset + 2 * n
    }

    /// Build the arena.
    ///
    /// # Errors
    ///
    /// - [`GridError::TooSmall`] if the arena has no interior.
    /// - [`GridError::NoAgentRow`] if agents are requested but
    ///   `wall_offset == 0` puts boxes in row 1.
    /// - [`GridError::TooManyAgents`] if row 1 cannot hold every agent.
    pub fn build(&self) -> GridResult<Arena> {
        let dim = self.dim();
        let mut grid = Grid::new(dim, dim)?;

        if self.agent_count > 0 {
            if self.wall_offset == 0 && self.box_grid_size > 0 {
                return Err(GridError::NoAgentRow);
            }
            let capacity = dim - 2;
            if self.agent_count > capacity {
                return Err(GridError::TooManyAgents {
                    requested: self.agent_count,
                    capacity,
                });
            }
        }

        for bi in 0..self.box_grid_size {
            for bj in 0..self.box_grid_size {
                let row = (1 + self.wall_offset + bi * (2 + self.box_offset)) as i32;
                let col = (1 + self.wall_offset + bj * (2 + self.box_offset)) as i32;
                for (dr, dc) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
                    grid.set(Cell::new(row + dr, col + dc), Tile::Box)?;
                }
            }
        }

        let mut agents = Vec::with_capacity(self.agent_count);
        for i in 0..self.agent_count {
            let cell = Cell::new(1, 1 + i as i32);
            grid.set(cell, Tile::idle(AgentId(i as u32)))?;
            agents.push(cell);
        }

        Ok(Arena { grid, agents })
    }
}

// ── LayoutBuilder ─────────────────────────────────────────────────────────────

/// Fluent builder for explicit layouts.
///
/// ```rust
/// use wh_core::Cell;
/// use wh_grid::LayoutBuilder;
///
/// let arena = LayoutBuilder::new(3, 5)
///     .agent(Cell::new(1, 1))
///     .boxed(Cell::new(1, 2))
///     .build()
///     .unwrap();
/// assert_eq!(arena.agents, vec![Cell::new(1, 1)]);
/// ```
pub struct LayoutBuilder {
    height: usize,
    width:  usize,
    walls:  Vec<Cell>,
    boxes:  Vec<Cell>,
    agents: Vec<Cell>,
}

impl LayoutBuilder {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            walls:  Vec::new(),
            boxes:  Vec::new(),
            agents: Vec::new(),
        }
    }

    /// Add an interior wall.
    pub fn wall(mut self, cell: Cell) -> Self {
        self.walls.push(cell);
        self
    }

    /// Add one box quadrant.
    pub fn boxed(mut self, cell: Cell) -> Self {
        self.boxes.push(cell);
        self
    }

    /// Add an agent; its id is the number of agents added before it.
    pub fn agent(mut self, cell: Cell) -> Self {
        self.agents.push(cell);
        self
    }

    /// Validate placements and build the arena.
    ///
    /// # Errors
    ///
    /// - [`GridError::OutOfBounds`] for any cell outside the grid.
    /// - [`GridError::Occupied`] if two placements share a cell or a box or
    ///   agent lands on a wall.
    pub fn build(self) -> GridResult<Arena> {
        let mut grid = Grid::new(self.height, self.width)?;

        for &cell in &self.walls {
            if !grid.get(cell)?.is_empty() {
                return Err(GridError::Occupied(cell));
            }
            grid.put_wall(cell)?;
        }
        for &cell in &self.boxes {
            place(&mut grid, cell, Tile::Box)?;
        }
        for (i, &cell) in self.agents.iter().enumerate() {
            place(&mut grid, cell, Tile::idle(AgentId(i as u32)))?;
        }

        Ok(Arena { grid, agents: self.agents })
    }
}

fn place(grid: &mut Grid, cell: Cell, tile: Tile) -> GridResult<()> {
    if !grid.get(cell)?.is_empty() {
        return Err(GridError::Occupied(cell));
    }
    grid.set(cell, tile)
}
