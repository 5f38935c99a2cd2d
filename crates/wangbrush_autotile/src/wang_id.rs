//! Wang IDs: the color signature of a tile's corners and edges
//!
//! Slot layout follows Tiled, clockwise from the top:
//!   7|0|1
//!   6|X|2
//!   5|4|3
//! - Even indices (0,2,4,6) = Edges (Top, Right, Bottom, Left)
//! - Odd indices (1,3,5,7) = Corners (TopRight, BottomRight, BottomLeft, TopLeft)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use wangbrush_core::TilePos;

/// Wang color ID (0 = no color, 1..=color_count = a color of the set)
pub type ColorId = u8;

/// Neighbor offsets around a tile, indexed by WangIndex (y grows downward)
pub const AROUND_TILE_POINTS: [TilePos; WangId::NUM_INDEXES] = [
    (0, -1),  // 0 = Top
    (1, -1),  // 1 = TopRight
    (1, 0),   // 2 = Right
    (1, 1),   // 3 = BottomRight
    (0, 1),   // 4 = Bottom
    (-1, 1),  // 5 = BottomLeft
    (-1, 0),  // 6 = Left
    (-1, -1), // 7 = TopLeft
];

/// The four cells sharing a tile's top-left vertex
///
///   3 0
///   2 1
///
/// Cell `i` touches the vertex with corner `(i + 2) % 4`.
pub const AROUND_VERTEX_POINTS: [TilePos; WangId::NUM_CORNERS] = [(0, -1), (0, 0), (-1, 0), (-1, -1)];

/// Slot of a WangId, doubling as the direction towards the neighbor that
/// shares it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum WangIndex {
    Top = 0,
    TopRight = 1,
    Right = 2,
    BottomRight = 3,
    Bottom = 4,
    BottomLeft = 5,
    Left = 6,
    TopLeft = 7,
}

impl WangIndex {
    pub const ALL: [WangIndex; WangId::NUM_INDEXES] = [
        WangIndex::Top,
        WangIndex::TopRight,
        WangIndex::Right,
        WangIndex::BottomRight,
        WangIndex::Bottom,
        WangIndex::BottomLeft,
        WangIndex::Left,
        WangIndex::TopLeft,
    ];

    /// Create from index (wraps modulo 8)
    #[inline]
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % WangId::NUM_INDEXES]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get the opposite position (across the tile)
    #[inline]
    pub fn opposite(self) -> Self {
        Self::from_index(WangId::opposite_index(self.index()))
    }

    #[inline]
    pub fn is_corner(self) -> bool {
        WangId::is_corner(self.index())
    }

    /// Get next position clockwise
    #[inline]
    pub fn next(self) -> Self {
        Self::from_index(WangId::next_index(self.index()))
    }

    /// Get previous position counter-clockwise
    #[inline]
    pub fn prev(self) -> Self {
        Self::from_index(WangId::prev_index(self.index()))
    }

    /// Offset to the neighbor in this direction on an orthogonal grid
    #[inline]
    pub fn offset(self) -> TilePos {
        AROUND_TILE_POINTS[self.index()]
    }
}

/// Wang ID packed into a u64, 8 bits per slot (slot `i` in bits `8i..8i+8`)
///
/// Used both for color signatures and for masks, where a slot holding
/// [`WangId::INDEX_MASK`] marks it as constrained.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[ColorId; 8]", into = "[ColorId; 8]")]
pub struct WangId(u64);

impl WangId {
    pub const NUM_CORNERS: usize = 4;
    pub const NUM_EDGES: usize = 4;
    pub const NUM_INDEXES: usize = 8;
    pub const BITS_PER_INDEX: usize = 8;
    /// Every bit of one slot set
    pub const INDEX_MASK: ColorId = 0xFF;

    /// No colors (also: a mask constraining nothing)
    pub const EMPTY: Self = WangId(0);
    /// A mask constraining every slot
    pub const FULL_MASK: Self = WangId(u64::MAX);

    pub const fn from_raw(raw: u64) -> Self {
        WangId(raw)
    }

    pub const fn to_raw(self) -> u64 {
        self.0
    }

    pub fn from_colors(colors: [ColorId; 8]) -> Self {
        let mut wang_id = WangId::EMPTY;
        for (i, &color) in colors.iter().enumerate() {
            wang_id.set_index_color(i, color);
        }
        wang_id
    }

    pub fn colors(&self) -> [ColorId; 8] {
        let mut colors = [0; 8];
        for (i, color) in colors.iter_mut().enumerate() {
            *color = self.index_color(i);
        }
        colors
    }

    /// Create a WangId with all positions set to one color
    pub fn filled(color: ColorId) -> Self {
        WangId::from_colors([color; 8])
    }

    /// Only the four corners set to `color`
    pub fn with_corners(color: ColorId) -> Self {
        let mut wang_id = WangId::EMPTY;
        for c in 0..Self::NUM_CORNERS {
            wang_id.set_corner_color(c, color);
        }
        wang_id
    }

    /// Only the four edges set to `color`
    pub fn with_edges(color: ColorId) -> Self {
        let mut wang_id = WangId::EMPTY;
        for e in 0..Self::NUM_EDGES {
            wang_id.set_edge_color(e, color);
        }
        wang_id
    }

    #[inline]
    pub fn index_color(&self, i: usize) -> ColorId {
        let shift = (i % Self::NUM_INDEXES) * Self::BITS_PER_INDEX;
        ((self.0 >> shift) & Self::INDEX_MASK as u64) as ColorId
    }

    #[inline]
    pub fn set_index_color(&mut self, i: usize, color: ColorId) {
        let shift = (i % Self::NUM_INDEXES) * Self::BITS_PER_INDEX;
        self.0 &= !((Self::INDEX_MASK as u64) << shift);
        self.0 |= (color as u64) << shift;
    }

    /// Corner `c` (0=TopRight, 1=BottomRight, 2=BottomLeft, 3=TopLeft)
    #[inline]
    pub fn corner_color(&self, c: usize) -> ColorId {
        self.index_color((c % Self::NUM_CORNERS) * 2 + 1)
    }

    #[inline]
    pub fn set_corner_color(&mut self, c: usize, color: ColorId) {
        self.set_index_color((c % Self::NUM_CORNERS) * 2 + 1, color);
    }

    /// Edge `e` (0=Top, 1=Right, 2=Bottom, 3=Left)
    #[inline]
    pub fn edge_color(&self, e: usize) -> ColorId {
        self.index_color((e % Self::NUM_EDGES) * 2)
    }

    #[inline]
    pub fn set_edge_color(&mut self, e: usize, color: ColorId) {
        self.set_index_color((e % Self::NUM_EDGES) * 2, color);
    }

    /// Get opposite index (position on neighbor that faces us)
    #[inline]
    pub fn opposite_index(i: usize) -> usize {
        (i + 4) % Self::NUM_INDEXES
    }

    /// Check if index is a corner (odd indices: 1,3,5,7)
    #[inline]
    pub fn is_corner(i: usize) -> bool {
        i % 2 == 1
    }

    /// Get next index clockwise
    #[inline]
    pub fn next_index(i: usize) -> usize {
        (i + 1) % Self::NUM_INDEXES
    }

    /// Get previous index counter-clockwise
    #[inline]
    pub fn prev_index(i: usize) -> usize {
        (i + 7) % Self::NUM_INDEXES
    }

    /// A mask with INDEX_MASK on every slot that holds a color
    pub fn mask(&self) -> WangId {
        let mut mask = WangId::EMPTY;
        for i in 0..Self::NUM_INDEXES {
            if self.index_color(i) != 0 {
                mask.set_index_color(i, Self::INDEX_MASK);
            }
        }
        mask
    }

    /// Check if this WangId has any color set
    #[inline]
    pub fn has_any_color(&self) -> bool {
        self.0 != 0
    }

    /// Check if any slot is left without a color
    pub fn has_wildcards(&self) -> bool {
        (0..Self::NUM_INDEXES).any(|i| self.index_color(i) == 0)
    }

    /// Check whether this signature agrees with `desired` on every masked slot
    #[inline]
    pub fn matches(&self, desired: WangId, mask: WangId) -> bool {
        (*self & mask) == (desired & mask)
    }
}

impl From<[ColorId; 8]> for WangId {
    fn from(colors: [ColorId; 8]) -> Self {
        WangId::from_colors(colors)
    }
}

impl From<WangId> for [ColorId; 8] {
    fn from(wang_id: WangId) -> Self {
        wang_id.colors()
    }
}

impl BitAnd for WangId {
    type Output = WangId;

    fn bitand(self, rhs: WangId) -> WangId {
        WangId(self.0 & rhs.0)
    }
}

impl BitOr for WangId {
    type Output = WangId;

    fn bitor(self, rhs: WangId) -> WangId {
        WangId(self.0 | rhs.0)
    }
}

impl Not for WangId {
    type Output = WangId;

    fn not(self) -> WangId {
        WangId(!self.0)
    }
}

impl fmt::Debug for WangId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WangId({:?})", self.colors())
    }
}

impl fmt::Display for WangId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let colors = self.colors();
        for (i, color) in colors.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{color}")?;
        }
        Ok(())
    }
}
