//! Core grid data structures for wangbrush
//!
//! This crate provides the types the autotile engine reads and writes:
//! - `Rect` / `Region` - Touched-cell bookkeeping for a paint gesture
//! - `Grid` - Sparse per-cell storage keyed by tile position
//! - `TileLayer` - Addressable tile grid, with `FixedLayer` and `SparseLayer`

mod grid;
mod layer;
mod region;

pub use grid::Grid;
pub use layer::{FixedLayer, SparseLayer, TileLayer};
pub use region::{Rect, Region};

/// A tile position in layer-local coordinates (x to the right, y downward)
pub type TilePos = (i32, i32);
