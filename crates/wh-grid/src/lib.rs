//! `wh-grid` — the Grid Store.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`tile`]    | `Tile` — tagged cell content, plus the legacy integer encoding  |
//! | [`grid`]    | `Grid` — owned, bounds-checked `height × width` tile buffer     |
//! | [`layout`]  | `ArenaSpec` (box-cluster arena), `LayoutBuilder`, `Arena`       |
//! | [`render`]  | Plain-text rendering with drop-off markers and in-place redraw  |
//! | [`error`]   | `GridError`, `GridResult<T>`                                    |
//!
//! # Invariants maintained here
//!
//! - Border cells are walls, and walls are never overwritten after
//!   construction ([`Grid::set`] refuses).
//! - Every access goes through [`Grid::index`], which turns an out-of-range
//!   cell into [`GridError::OutOfBounds`] instead of touching memory.
//! - `Grid: Clone` is a deep copy; two grids never share a buffer.

pub mod error;
pub mod grid;
pub mod layout;
pub mod render;
pub mod tile;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use grid::Grid;
pub use layout::{Arena, ArenaSpec, LayoutBuilder};
pub use render::render;
pub use tile::Tile;
