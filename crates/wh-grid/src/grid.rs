//! The `Grid` — an owned, bounds-checked tile buffer.

use wh_core::Cell;

use crate::{GridError, GridResult, Tile};

/// A `height × width` row-major buffer of [`Tile`]s with a wall border.
///
/// Dimensions are fixed at construction.  `Clone` deep-copies the buffer, so
/// a cloned grid can be mutated by a branching rollout without affecting
/// the original.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    height: usize,
    width:  usize,
    tiles:  Vec<Tile>,
}

impl Grid {
    /// An empty grid enclosed by a one-cell wall border.
    ///
    /// # Errors
    ///
    /// [`GridError::TooSmall`] if either dimension is below 3 (no interior).
    pub fn new(height: usize, width: usize) -> GridResult<Self> {
        if height < 3 || width < 3 {
            return Err(GridError::TooSmall { height, width });
        }
        let mut tiles = vec![Tile::Empty; height * width];
        for row in 0..height {
            for col in 0..width {
                if row == 0 || row == height - 1 || col == 0 || col == width - 1 {
                    tiles[row * width + col] = Tile::Wall;
                }
            }
        }
        Ok(Self { height, width, tiles })
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// `true` if `cell` lies inside the buffer (border included).
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.height
            && (cell.col as usize) < self.width
    }

    /// `true` if `cell` is on the outer wall ring.
    #[inline]
    pub fn is_border(&self, cell: Cell) -> bool {
        self.contains(cell)
            && (cell.row == 0
                || cell.col == 0
                || cell.row as usize == self.height - 1
                || cell.col as usize == self.width - 1)
    }

    /// Flat row-major index of `cell`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `cell` is outside the buffer.
    #[inline]
    pub fn index(&self, cell: Cell) -> GridResult<usize> {
        if !self.contains(cell) {
            return Err(GridError::OutOfBounds {
                cell,
                height: self.height,
                width:  self.width,
            });
        }
        Ok(cell.row as usize * self.width + cell.col as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn cell_of(&self, index: usize) -> Cell {
        Cell::new((index / self.width) as i32, (index % self.width) as i32)
    }

    /// Tile at `cell`.
    pub fn get(&self, cell: Cell) -> GridResult<Tile> {
        self.index(cell).map(|i| self.tiles[i])
    }

    /// Overwrite the tile at `cell`.
    ///
    /// # Errors
    ///
    /// - [`GridError::OutOfBounds`] if `cell` is outside the buffer.
    /// - [`GridError::WallOverwrite`] if `cell` currently holds a wall, or if
    ///   `tile` is a wall (walls are placed only at construction).
    pub fn set(&mut self, cell: Cell, tile: Tile) -> GridResult<()> {
        let i = self.index(cell)?;
        if self.tiles[i].is_wall() || tile.is_wall() {
            return Err(GridError::WallOverwrite(cell));
        }
        self.tiles[i] = tile;
        Ok(())
    }

    /// Place an interior wall.  Used by [`LayoutBuilder`](crate::LayoutBuilder).
    pub(crate) fn put_wall(&mut self, cell: Cell) -> GridResult<()> {
        let i = self.index(cell)?;
        self.tiles[i] = Tile::Wall;
        Ok(())
    }

    /// Read-only row-major view of every tile.
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// One row as a slice.
    ///
    /// # Panics
    /// Panics if `row >= height`.
    pub fn row(&self, row: usize) -> &[Tile] {
        &self.tiles[row * self.width..(row + 1) * self.width]
    }

    /// Iterator over `(cell, tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, &t)| (self.cell_of(i), t))
    }

    /// Number of tiles satisfying `pred`.
    pub fn count(&self, pred: impl Fn(Tile) -> bool) -> usize {
        self.tiles.iter().filter(|&&t| pred(t)).count()
    }

    /// Cells still holding an unclaimed box quadrant, row-major.
    pub fn box_cells(&self) -> Vec<Cell> {
        self.iter()
            .filter(|(_, t)| t.is_box())
            .map(|(c, _)| c)
            .collect()
    }

    /// The whole grid in the numeric observation encoding, row-major.
    pub fn codes(&self) -> Vec<i32> {
        self.tiles.iter().map(|t| t.code()).collect()
    }
}
