//! Grid geometry: where the neighbor in a given direction lives
//!
//! Orthogonal and isometric maps use the fixed offset tables. Staggered and
//! hexagonal maps shift every other row (or column), so their neighbors
//! depend on the parity of the position.

use crate::wang_id::{WangIndex, AROUND_VERTEX_POINTS};
use serde::{Deserialize, Serialize};
use wangbrush_core::TilePos;

/// Neighbor lookup for one map orientation
pub trait GridGeometry {
    /// The cell sharing slot `direction` of `pos`
    fn neighbor(&self, pos: TilePos, direction: WangIndex) -> TilePos;

    /// The four cells around the top-left vertex of `pos`
    ///
    /// Cell `i` touches the vertex with corner `(i + 2) % 4`.
    fn vertex_cells(&self, pos: TilePos) -> [TilePos; 4] {
        [
            self.neighbor(pos, WangIndex::Top),
            pos,
            self.neighbor(pos, WangIndex::Left),
            self.neighbor(pos, WangIndex::TopLeft),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Orthogonal;

impl GridGeometry for Orthogonal {
    fn neighbor(&self, pos: TilePos, direction: WangIndex) -> TilePos {
        let (dx, dy) = direction.offset();
        (pos.0 + dx, pos.1 + dy)
    }

    fn vertex_cells(&self, pos: TilePos) -> [TilePos; 4] {
        AROUND_VERTEX_POINTS.map(|(dx, dy)| (pos.0 + dx, pos.1 + dy))
    }
}

/// Which axis is staggered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaggerAxis {
    X,
    #[default]
    Y,
}

/// Whether the odd or the even rows (or columns) are shifted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaggerIndex {
    #[default]
    Odd,
    Even,
}

/// Staggered and hexagonal maps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Staggered {
    pub axis: StaggerAxis,
    pub index: StaggerIndex,
}

impl Staggered {
    pub fn new(axis: StaggerAxis, index: StaggerIndex) -> Self {
        Self { axis, index }
    }

    /// True when the row (or column) of `pos` is shifted
    fn is_shifted(&self, pos: TilePos) -> bool {
        let coord = match self.axis {
            StaggerAxis::X => pos.0,
            StaggerAxis::Y => pos.1,
        };
        let parity = coord & 1 == 1;
        match self.index {
            StaggerIndex::Odd => parity,
            StaggerIndex::Even => !parity,
        }
    }

    pub fn top_left(&self, (x, y): TilePos) -> TilePos {
        match (self.axis, self.is_shifted((x, y))) {
            (StaggerAxis::Y, true) => (x, y - 1),
            (StaggerAxis::Y, false) => (x - 1, y - 1),
            (StaggerAxis::X, true) => (x - 1, y),
            (StaggerAxis::X, false) => (x - 1, y - 1),
        }
    }

    pub fn top_right(&self, (x, y): TilePos) -> TilePos {
        match (self.axis, self.is_shifted((x, y))) {
            (StaggerAxis::Y, true) => (x + 1, y - 1),
            (StaggerAxis::Y, false) => (x, y - 1),
            (StaggerAxis::X, true) => (x + 1, y),
            (StaggerAxis::X, false) => (x + 1, y - 1),
        }
    }

    pub fn bottom_left(&self, (x, y): TilePos) -> TilePos {
        match (self.axis, self.is_shifted((x, y))) {
            (StaggerAxis::Y, true) => (x, y + 1),
            (StaggerAxis::Y, false) => (x - 1, y + 1),
            (StaggerAxis::X, true) => (x - 1, y + 1),
            (StaggerAxis::X, false) => (x - 1, y),
        }
    }

    pub fn bottom_right(&self, (x, y): TilePos) -> TilePos {
        match (self.axis, self.is_shifted((x, y))) {
            (StaggerAxis::Y, true) => (x + 1, y + 1),
            (StaggerAxis::Y, false) => (x, y + 1),
            (StaggerAxis::X, true) => (x + 1, y + 1),
            (StaggerAxis::X, false) => (x + 1, y),
        }
    }
}

impl GridGeometry for Staggered {
    fn neighbor(&self, pos: TilePos, direction: WangIndex) -> TilePos {
        // Edges face the diagonal neighbors, corners the cells two steps away
        let corner_offset = |stagger_x: TilePos, stagger_y: TilePos| match self.axis {
            StaggerAxis::X => stagger_x,
            StaggerAxis::Y => stagger_y,
        };
        let (dx, dy) = match direction {
            WangIndex::Top => return self.top_right(pos),
            WangIndex::Right => return self.bottom_right(pos),
            WangIndex::Bottom => return self.bottom_left(pos),
            WangIndex::Left => return self.top_left(pos),
            WangIndex::TopRight => corner_offset((2, 0), (1, 0)),
            WangIndex::BottomRight => corner_offset((0, 1), (0, 2)),
            WangIndex::BottomLeft => corner_offset((-2, 0), (-1, 0)),
            WangIndex::TopLeft => corner_offset((0, -1), (0, -2)),
        };
        (pos.0 + dx, pos.1 + dy)
    }

    fn vertex_cells(&self, pos: TilePos) -> [TilePos; 4] {
        [
            self.top_right(pos),
            pos,
            self.top_left(pos),
            self.top_right(self.top_left(pos)),
        ]
    }
}

/// Map orientation, selecting the geometry used for painting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapOrientation {
    #[default]
    Orthogonal,
    Isometric,
    Staggered {
        axis: StaggerAxis,
        index: StaggerIndex,
    },
    Hexagonal {
        axis: StaggerAxis,
        index: StaggerIndex,
    },
}

impl MapOrientation {
    pub fn geometry(&self) -> Box<dyn GridGeometry> {
        match *self {
            MapOrientation::Orthogonal | MapOrientation::Isometric => Box::new(Orthogonal),
            MapOrientation::Staggered { axis, index } | MapOrientation::Hexagonal { axis, index } => {
                Box::new(Staggered::new(axis, index))
            }
        }
    }
}
