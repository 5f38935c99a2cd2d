//! Mapping a cursor position to the tile and direction a brush paints
//!
//! World coordinates are y-down with tile `(0, 0)` spanning `[0, tile_size)`
//! on both axes.

use crate::painter::BrushMode;
use crate::wang_id::WangIndex;
use wangbrush_core::TilePos;

/// Tile and slot under the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaintTarget {
    pub pos: TilePos,
    /// `None` when the brush cannot paint
    pub direction: Option<WangIndex>,
}

impl PaintTarget {
    /// The vertex at `(vx, vy)`, expressed as the top-left corner of the
    /// tile right of and below it
    fn vertex(vx: i32, vy: i32) -> Self {
        Self {
            pos: (vx, vy),
            direction: Some(WangIndex::TopLeft),
        }
    }

    fn slot(pos: TilePos, direction: WangIndex) -> Self {
        Self {
            pos,
            direction: Some(direction),
        }
    }
}

/// Determine the paint target for a cursor position
///
/// Corner brushes snap to the nearest vertex, edge brushes to the nearest
/// edge. Mixed brushes split each tile into a 3x3 grid of zones: the outer
/// zones pick the corner or edge they touch and the center zone falls back
/// to the nearest vertex.
pub fn paint_target(world_x: f32, world_y: f32, tile_size: f32, mode: BrushMode) -> PaintTarget {
    let fx = world_x / tile_size;
    let fy = world_y / tile_size;
    let tile_x = fx.floor() as i32;
    let tile_y = fy.floor() as i32;
    let pos = (tile_x, tile_y);

    // Position within the tile, 0.0 to 1.0 also for negative coordinates
    let local_x = fx - fx.floor();
    let local_y = fy - fy.floor();

    let nearest_vertex = || {
        let vx = if local_x < 0.5 { tile_x } else { tile_x + 1 };
        let vy = if local_y < 0.5 { tile_y } else { tile_y + 1 };
        PaintTarget::vertex(vx, vy)
    };

    match mode {
        BrushMode::Idle => PaintTarget {
            pos,
            direction: None,
        },
        BrushMode::PaintCorner => nearest_vertex(),
        BrushMode::PaintEdge => {
            let distances = [
                (local_y, WangIndex::Top),
                (1.0 - local_x, WangIndex::Right),
                (1.0 - local_y, WangIndex::Bottom),
                (local_x, WangIndex::Left),
            ];
            let mut best = distances[0];
            for candidate in &distances[1..] {
                if candidate.0 < best.0 {
                    best = *candidate;
                }
            }
            PaintTarget::slot(pos, best.1)
        }
        BrushMode::PaintEdgeAndCorner => {
            let zone = |local: f32| {
                if local < 0.33 {
                    0
                } else if local < 0.67 {
                    1
                } else {
                    2
                }
            };

            match (zone(local_x), zone(local_y)) {
                (0, 0) => PaintTarget::vertex(tile_x, tile_y),
                (2, 0) => PaintTarget::vertex(tile_x + 1, tile_y),
                (0, 2) => PaintTarget::vertex(tile_x, tile_y + 1),
                (2, 2) => PaintTarget::vertex(tile_x + 1, tile_y + 1),
                (1, 0) => PaintTarget::slot(pos, WangIndex::Top),
                (2, 1) => PaintTarget::slot(pos, WangIndex::Right),
                (1, 2) => PaintTarget::slot(pos, WangIndex::Bottom),
                (0, 1) => PaintTarget::slot(pos, WangIndex::Left),
                _ => nearest_vertex(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_snaps_to_nearest_vertex() {
        let target = paint_target(10.0, 10.0, 32.0, BrushMode::PaintCorner);
        assert_eq!(target, PaintTarget::vertex(0, 0));

        // Lower right quarter of tile (1, 0) is nearest the vertex of (2, 1)
        let target = paint_target(60.0, 20.0, 32.0, BrushMode::PaintCorner);
        assert_eq!(target.pos, (2, 1));
        assert_eq!(target.direction, Some(WangIndex::TopLeft));
    }

    #[test]
    fn test_edge_picks_nearest_edge() {
        let at = |x, y| paint_target(x, y, 32.0, BrushMode::PaintEdge).direction;
        assert_eq!(at(16.0, 2.0), Some(WangIndex::Top));
        assert_eq!(at(30.0, 16.0), Some(WangIndex::Right));
        assert_eq!(at(16.0, 31.0), Some(WangIndex::Bottom));
        assert_eq!(at(1.0, 16.0), Some(WangIndex::Left));

        let target = paint_target(40.0, 75.0, 32.0, BrushMode::PaintEdge);
        assert_eq!(target.pos, (1, 2));
        assert_eq!(target.direction, Some(WangIndex::Left));
    }

    #[test]
    fn test_mixed_zones() {
        let at = |x, y| paint_target(x, y, 30.0, BrushMode::PaintEdgeAndCorner);
        assert_eq!(at(35.0, 35.0), PaintTarget::vertex(1, 1));
        assert_eq!(at(58.0, 35.0), PaintTarget::vertex(2, 1));
        assert_eq!(at(58.0, 58.0), PaintTarget::vertex(2, 2));
        assert_eq!(at(45.0, 32.0), PaintTarget::slot((1, 1), WangIndex::Top));
        assert_eq!(at(32.0, 45.0), PaintTarget::slot((1, 1), WangIndex::Left));
        assert_eq!(at(58.0, 45.0), PaintTarget::slot((1, 1), WangIndex::Right));

        // Center zone, nearer the bottom-right vertex
        assert_eq!(at(47.0, 47.0), PaintTarget::vertex(2, 2));
    }

    #[test]
    fn test_negative_coordinates() {
        let target = paint_target(-4.0, -28.0, 32.0, BrushMode::PaintCorner);
        assert_eq!(target.pos, (0, -1));

        let target = paint_target(-16.0, -30.0, 32.0, BrushMode::PaintEdge);
        assert_eq!(target.pos, (-1, -1));
        assert_eq!(target.direction, Some(WangIndex::Top));
    }

    #[test]
    fn test_idle_has_no_direction() {
        let target = paint_target(40.0, 10.0, 32.0, BrushMode::Idle);
        assert_eq!(target.pos, (1, 0));
        assert_eq!(target.direction, None);
    }
}
