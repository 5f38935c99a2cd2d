//! Rectangles and cell regions

use crate::TilePos;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An axis-aligned rectangle of tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A single-cell rectangle at `pos`
    pub const fn unit(pos: TilePos) -> Self {
        Self::new(pos.0, pos.1, 1, 1)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        pos.0 >= self.x && pos.1 >= self.y && pos.0 < self.right() && pos.1 < self.bottom()
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// All positions inside the rectangle, row by row
    pub fn positions(&self) -> impl Iterator<Item = TilePos> + '_ {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| (x, y)))
    }
}

/// A set of tile positions
///
/// Iterates row-major (by y, then x), so anything that walks a region in
/// order together with a seeded RNG produces the same result every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    /// Stored as (y, x) to get row-major ordering from the set
    cells: BTreeSet<(i32, i32)>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pos: TilePos) -> bool {
        self.cells.insert((pos.1, pos.0))
    }

    pub fn add_rect(&mut self, rect: Rect) {
        for pos in rect.positions() {
            self.insert(pos);
        }
    }

    pub fn extend(&mut self, other: &Region) {
        self.cells.extend(other.cells.iter().copied());
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        self.cells.contains(&(pos.1, pos.0))
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

    pub fn iter(&self) -> impl Iterator<Item = TilePos> + '_ {
        self.cells.iter().map(|&(y, x)| (x, y))
    }

    /// Bounding rectangle, or None for an empty region
    pub fn bounding_rect(&self) -> Option<Rect> {
        let mut iter = self.iter();
        let first = iter.next()?;
        let rect = iter.fold(Rect::unit(first), |acc, pos| acc.union(&Rect::unit(pos)));
        Some(rect)
    }

    /// A copy of this region shifted by (dx, dy)
    pub fn translated(&self, dx: i32, dy: i32) -> Region {
        Region {
            cells: self.cells.iter().map(|&(y, x)| (y + dy, x + dx)).collect(),
        }
    }
}

impl FromIterator<TilePos> for Region {
    fn from_iter<I: IntoIterator<Item = TilePos>>(iter: I) -> Self {
        let mut region = Region::new();
        for pos in iter {
            region.insert(pos);
        }
        region
    }
}
