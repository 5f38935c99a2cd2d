//! Tile layers the autotile engine paints into

use crate::{Rect, Region, TilePos};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An addressable grid of tile references
///
/// `None` means the cell is empty, `Some(idx)` is a tile index.
pub trait TileLayer {
    /// Tile at `pos`, or None when empty or out of bounds
    fn cell_at(&self, pos: TilePos) -> Option<u32>;

    /// Set the tile at `pos`. Writes outside the bounds are ignored.
    fn set_cell(&mut self, pos: TilePos, tile: Option<u32>);

    /// Layer bounds, or None for an unbounded layer
    fn bounds(&self) -> Option<Rect>;
}

/// Number of cells in a `width` x `height` layer, widened before multiplying
fn cell_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// A bounded tile layer with row-major storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedLayer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Tile data - None means empty, Some(idx) is a tile index
    pub tiles: Vec<Option<u32>>,
}

impl FixedLayer {
    /// Create an empty layer of the given size
    pub fn new(name: String, width: u32, height: u32) -> Self {
        let size = cell_count(width, height);
        Self {
            name,
            width,
            height,
            tiles: vec![None; size],
        }
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        pos.0 >= 0 && pos.1 >= 0 && pos.0 < self.width as i32 && pos.1 < self.height as i32
    }

    fn index_of(&self, pos: TilePos) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.1 as usize * self.width as usize + pos.0 as usize)
        } else {
            None
        }
    }

    /// Resize the layer, moving existing cells by `offset`
    ///
    /// Cells that end up outside the new size are dropped.
    pub fn resize(&mut self, width: u32, height: u32, offset: TilePos) {
        let mut resized = FixedLayer::new(std::mem::take(&mut self.name), width, height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if let Some(tile) = self.cell_at((x, y)) {
                    resized.set_cell((x + offset.0, y + offset.1), Some(tile));
                }
            }
        }
        *self = resized;
    }

    /// Positions of all cells matching the predicate
    pub fn region(&self, predicate: impl Fn(Option<u32>) -> bool) -> Region {
        let mut region = Region::new();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if predicate(self.cell_at((x, y))) {
                    region.insert((x, y));
                }
            }
        }
        region
    }
}

impl TileLayer for FixedLayer {
    fn cell_at(&self, pos: TilePos) -> Option<u32> {
        self.index_of(pos)
            .and_then(|idx| self.tiles.get(idx).copied().flatten())
    }

    fn set_cell(&mut self, pos: TilePos, tile: Option<u32>) {
        if let Some(slot) = self.index_of(pos).and_then(|idx| self.tiles.get_mut(idx)) {
            *slot = tile;
        }
    }

    fn bounds(&self) -> Option<Rect> {
        Some(Rect::new(0, 0, self.width as i32, self.height as i32))
    }
}

/// An unbounded tile layer storing only occupied cells
///
/// Used for infinite maps and as the stamp a fill writes into before the
/// result is merged into the real layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseLayer {
    cells: HashMap<TilePos, u32>,
}

impl SparseLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Occupied cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (TilePos, u32)> + '_ {
        let region = self.region(|_| true);
        let cells: Vec<_> = region
            .iter()
            .filter_map(|pos| self.cells.get(&pos).map(|&tile| (pos, tile)))
            .collect();
        cells.into_iter()
    }

    /// Positions of occupied cells whose tile matches the predicate
    pub fn region(&self, predicate: impl Fn(u32) -> bool) -> Region {
        self.cells
            .iter()
            .filter(|&(_, &tile)| predicate(tile))
            .map(|(&pos, _)| pos)
            .collect()
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        self.region(|_| true).bounding_rect()
    }
}

impl TileLayer for SparseLayer {
    fn cell_at(&self, pos: TilePos) -> Option<u32> {
        self.cells.get(&pos).copied()
    }

    fn set_cell(&mut self, pos: TilePos, tile: Option<u32>) {
        match tile {
            Some(tile) => {
                self.cells.insert(pos, tile);
            }
            None => {
                self.cells.remove(&pos);
            }
        }
    }

    fn bounds(&self) -> Option<Rect> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fixed_layer() {
        let layer = FixedLayer::new("Ground".to_string(), 10, 10);

        assert_eq!(layer.name, "Ground");
        assert_eq!(layer.tiles.len(), 100);
        assert!(layer.tiles.iter().all(|t| t.is_none()));
        assert_eq!(layer.bounds(), Some(Rect::new(0, 0, 10, 10)));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_cell_count_does_not_wrap() {
        assert_eq!(cell_count(65_536, 65_536), 1 << 32);
        assert_eq!(cell_count(u32::MAX, 2), u32::MAX as usize * 2);
    }

    #[test]
    fn test_fixed_layer_ignores_out_of_bounds() {
        let mut layer = FixedLayer::new("Ground".to_string(), 4, 4);
        layer.set_cell((-1, 0), Some(3));
        layer.set_cell((4, 4), Some(3));
        layer.set_cell((2, 1), Some(5));

        assert_eq!(layer.cell_at((-1, 0)), None);
        assert_eq!(layer.cell_at((2, 1)), Some(5));
        assert_eq!(layer.tiles[6], Some(5));
        assert_eq!(layer.region(|c| c.is_some()).len(), 1);
    }

    #[test]
    fn test_fixed_layer_resize_with_offset() {
        let mut layer = FixedLayer::new("Ground".to_string(), 2, 2);
        layer.set_cell((0, 0), Some(1));
        layer.set_cell((1, 1), Some(2));

        layer.resize(3, 3, (1, 1));
        assert_eq!(layer.cell_at((1, 1)), Some(1));
        assert_eq!(layer.cell_at((2, 2)), Some(2));
        assert_eq!(layer.cell_at((0, 0)), None);

        layer.resize(1, 1, (-1, -1));
        assert_eq!(layer.cell_at((0, 0)), Some(1));
    }

    #[test]
    fn test_sparse_layer_region_and_bounds() {
        let mut layer = SparseLayer::new();
        assert!(layer.bounding_rect().is_none());

        layer.set_cell((-5, 2), Some(1));
        layer.set_cell((3, -1), Some(2));
        layer.set_cell((0, 0), Some(2));
        layer.set_cell((0, 0), None);

        assert_eq!(layer.len(), 2);
        assert_eq!(layer.region(|t| t == 2).len(), 1);
        assert_eq!(layer.bounding_rect(), Some(Rect::new(-5, -1, 9, 4)));

        let cells: Vec<_> = layer.iter().collect();
        assert_eq!(cells, vec![((3, -1), 2), ((-5, 2), 1)]);
    }
}
