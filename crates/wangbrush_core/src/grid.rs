//! Sparse per-cell storage

use crate::TilePos;
use std::collections::HashMap;

/// A sparse grid over an unbounded plane
///
/// Reading a cell that was never written yields `T::default()`.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    cells: HashMap<TilePos, T>,
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }
}

impl<T: Clone + Default> Grid<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the cell at `pos`
    pub fn get(&self, pos: TilePos) -> T {
        self.cells.get(&pos).cloned().unwrap_or_default()
    }

    /// Get the cell at `pos` if it was ever written
    pub fn get_ref(&self, pos: TilePos) -> Option<&T> {
        self.cells.get(&pos)
    }

    /// Get or create the cell at `pos`
    pub fn get_mut(&mut self, pos: TilePos) -> &mut T {
        self.cells.entry(pos).or_default()
    }

    pub fn set(&mut self, pos: TilePos, value: T) {
        self.cells.insert(pos, value);
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        self.cells.contains_key(&pos)
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

    /// Iterate written cells in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (TilePos, &T)> {
        self.cells.iter().map(|(&pos, value)| (pos, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_default_on_missing() {
        let grid: Grid<u8> = Grid::new();
        assert_eq!(grid.get((10, -10)), 0);
        assert!(grid.get_ref((10, -10)).is_none());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_grid_set_get() {
        let mut grid = Grid::new();
        grid.set((1, 2), 7u32);
        *grid.get_mut((-3, 4)) += 2;

        assert_eq!(grid.get((1, 2)), 7);
        assert_eq!(grid.get((-3, 4)), 2);
        assert_eq!(grid.len(), 2);

        grid.clear();
        assert!(!grid.contains((1, 2)));
    }
}
