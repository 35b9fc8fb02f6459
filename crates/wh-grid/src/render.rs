//! Plain-text rendering.
//!
//! Each cell is drawn as a right-aligned, three-character column:
//!
//! | Content                    | Glyph  |
//! |----------------------------|--------|
//! | wall                       | `X`    |
//! | empty                      | `.`    |
//! | empty drop-off point       | `D`    |
//! | box quadrant               | `#`    |
//! | idle agent `id`            | `id`   |
//! | carrying agent `id`        | `id*`  |
//!
//! Rendering never mutates the grid.

use std::fmt;

use wh_core::Cell;

use crate::{Grid, Tile};

/// ANSI "clear screen, cursor home".
const REDRAW_PREFIX: &str = "\x1b[2J\x1b[H";

/// Render `grid` with `drop_offs` marked.
///
/// With `redraw`, the output starts with an ANSI clear-and-home sequence so
/// successive frames printed to a terminal overwrite each other in place.
pub fn render(grid: &Grid, drop_offs: &[Cell], redraw: bool) -> String {
    let mut out = String::with_capacity(grid.height() * (grid.width() * 3 + 1) + 8);
    if redraw {
        out.push_str(REDRAW_PREFIX);
    }
    // Writing into a String cannot fail.
    let _ = write_grid(&mut out, grid, drop_offs);
    out
}

fn write_grid(out: &mut impl fmt::Write, grid: &Grid, drop_offs: &[Cell]) -> fmt::Result {
    for row in 0..grid.height() {
        for (col, tile) in grid.row(row).iter().enumerate() {
            let cell = Cell::new(row as i32, col as i32);
            match *tile {
                Tile::Wall => write!(out, "{:>3}", "X")?,
                Tile::Box => write!(out, "{:>3}", "#")?,
                Tile::Empty if drop_offs.contains(&cell) => write!(out, "{:>3}", "D")?,
                Tile::Empty => write!(out, "{:>3}", ".")?,
                Tile::Agent { id, carrying: false } => write!(out, "{:>3}", id.0)?,
                Tile::Agent { id, carrying: true } => write!(out, "{:>3}", format!("{}*", id.0))?,
            }
        }
        out.write_char('\n')?;
    }
    Ok(())
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self, &[])
    }
}
