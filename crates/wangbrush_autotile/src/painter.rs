//! Interactive terrain painting
//!
//! A [`WangPainter`] turns paint gestures (a tile position and the direction
//! under the cursor) into constraints on its [`FillRegion`], then commits
//! them into a tile layer through the [`WangFiller`].

use crate::config::PainterSettings;
use crate::fill_region::FillRegion;
use crate::filler::WangFiller;
use crate::geometry::{GridGeometry, Orthogonal};
use crate::wang_id::{ColorId, WangIndex};
use crate::wang_set::{WangSet, WangSetType};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wangbrush_core::{SparseLayer, TileLayer, TilePos};

/// Which slots a paint stroke targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrushMode {
    PaintCorner,
    PaintEdge,
    PaintEdgeAndCorner,
    /// No wang set selected
    #[default]
    Idle,
}

/// Require `color` at slot `index` of `pos` and at every slot of a
/// neighboring cell that touches it
///
/// For an edge that is the opposite edge of the neighbor across it. For a
/// corner it is the opposite corner of the diagonal neighbor and the touching
/// corners of the two edge neighbors sharing the vertex.
pub fn constrain_slot(
    fill: &mut FillRegion,
    geometry: &dyn GridGeometry,
    color: ColorId,
    pos: TilePos,
    index: WangIndex,
) {
    fill.constrain(pos, index, color);
    fill.constrain(geometry.neighbor(pos, index), index.opposite(), color);

    if index.is_corner() {
        let prev = index.prev();
        let next = index.next();
        fill.constrain(
            geometry.neighbor(pos, prev),
            WangIndex::from_index(prev.index() + 3),
            color,
        );
        fill.constrain(
            geometry.neighbor(pos, next),
            WangIndex::from_index(next.index() + 5),
            color,
        );
    }
}

/// Write the constraints of one stroke into `fill`
///
/// In tile mode every slot of `pos` used by the brush is painted and the
/// direction is ignored. Otherwise only `direction` is painted, and `None`
/// paints nothing.
pub fn generate_terrain_at(
    fill: &mut FillRegion,
    geometry: &dyn GridGeometry,
    brush_mode: BrushMode,
    color: ColorId,
    pos: TilePos,
    direction: Option<WangIndex>,
    use_tile_mode: bool,
) {
    if use_tile_mode {
        let indexes: &[usize] = match brush_mode {
            BrushMode::PaintCorner => WangSetType::Corner.active_indexes(),
            BrushMode::PaintEdge => WangSetType::Edge.active_indexes(),
            BrushMode::PaintEdgeAndCorner => WangSetType::Mixed.active_indexes(),
            BrushMode::Idle => &[],
        };
        // Center first, so it is in the region even for an idle brush
        fill.region.insert(pos);
        for &i in indexes {
            constrain_slot(fill, geometry, color, pos, WangIndex::from_index(i));
        }
    } else if let Some(direction) = direction {
        constrain_slot(fill, geometry, color, pos, direction);
    }
}

/// Paints terrain colors of one wang set
pub struct WangPainter<'a> {
    wang_set: Option<&'a WangSet>,
    current_color: ColorId,
    brush_mode: BrushMode,
    current_fill: FillRegion,
    geometry: Box<dyn GridGeometry>,
    corrections_enabled: bool,
    rng: SmallRng,
}

impl Default for WangPainter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> WangPainter<'a> {
    /// Orthogonal painter with corrections enabled, seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Like [`WangPainter::new`] with reproducible random choices
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    pub fn from_settings(settings: &PainterSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut painter = Self::with_rng(rng);
        painter.geometry = settings.orientation.geometry();
        painter.corrections_enabled = settings.corrections_enabled;
        painter
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            wang_set: None,
            current_color: 0,
            brush_mode: BrushMode::Idle,
            current_fill: FillRegion::new(),
            geometry: Box::new(Orthogonal),
            corrections_enabled: true,
            rng,
        }
    }

    pub fn brush_mode(&self) -> BrushMode {
        self.brush_mode
    }

    pub fn color(&self) -> ColorId {
        self.current_color
    }

    pub fn wang_set(&self) -> Option<&'a WangSet> {
        self.wang_set
    }

    /// Constraints painted since the last commit or clear
    pub fn fill(&self) -> &FillRegion {
        &self.current_fill
    }

    pub fn geometry(&self) -> &dyn GridGeometry {
        self.geometry.as_ref()
    }

    pub fn set_geometry(&mut self, geometry: Box<dyn GridGeometry>) {
        self.geometry = geometry;
    }

    pub fn corrections_enabled(&self) -> bool {
        self.corrections_enabled
    }

    pub fn set_corrections_enabled(&mut self, enabled: bool) {
        self.corrections_enabled = enabled;
    }

    pub fn set_wang_set(&mut self, wang_set: Option<&'a WangSet>) {
        let unchanged = match (self.wang_set, wang_set) {
            (Some(current), Some(new)) => std::ptr::eq(current, new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }

        self.current_color = 0;
        self.wang_set = wang_set;
        self.brush_mode = match wang_set.map(|set| set.set_type) {
            Some(WangSetType::Corner) => BrushMode::PaintCorner,
            Some(WangSetType::Edge) => BrushMode::PaintEdge,
            Some(WangSetType::Mixed) => BrushMode::PaintEdgeAndCorner,
            None => BrushMode::Idle,
        };
    }

    pub fn set_color(&mut self, color: ColorId) {
        if color == self.current_color {
            return;
        }
        self.current_color = color;

        let Some(wang_set) = self.wang_set else {
            return;
        };

        self.brush_mode = match wang_set.set_type {
            WangSetType::Corner => BrushMode::PaintCorner,
            WangSetType::Edge => BrushMode::PaintEdge,
            WangSetType::Mixed => {
                // Pick a mode from where the color is actually used
                let usage = wang_set.color_usage(color);
                if usage.as_edge == usage.as_corner {
                    BrushMode::PaintEdgeAndCorner
                } else if usage.as_edge {
                    BrushMode::PaintEdge
                } else {
                    BrushMode::PaintCorner
                }
            }
        };
    }

    /// Map the direction under the cursor to one the brush can paint
    pub fn desired_direction(&self, initial: WangIndex) -> WangIndex {
        match self.brush_mode {
            BrushMode::Idle => initial,
            // Corners are always painted as the top-left vertex of a tile
            BrushMode::PaintCorner => WangIndex::TopLeft,
            BrushMode::PaintEdge => match initial {
                WangIndex::BottomRight => WangIndex::Bottom,
                WangIndex::BottomLeft => WangIndex::Left,
                WangIndex::TopLeft => WangIndex::Top,
                WangIndex::TopRight => WangIndex::Right,
                edge => edge,
            },
            BrushMode::PaintEdgeAndCorner => match initial {
                WangIndex::BottomRight | WangIndex::BottomLeft | WangIndex::TopRight => {
                    WangIndex::TopLeft
                }
                other => other,
            },
        }
    }

    /// Paint a stroke into the painter's own fill region
    ///
    /// # Panics
    /// Panics when no wang set is selected.
    pub fn set_terrain(
        &mut self,
        color: ColorId,
        pos: TilePos,
        direction: Option<WangIndex>,
        use_tile_mode: bool,
    ) {
        let direction = self.prepare_stroke(color, direction);
        generate_terrain_at(
            &mut self.current_fill,
            self.geometry.as_ref(),
            self.brush_mode,
            color,
            pos,
            direction,
            use_tile_mode,
        );
    }

    /// Paint a stroke into a fill region owned by the caller
    ///
    /// # Panics
    /// Panics when no wang set is selected.
    pub fn set_terrain_in(
        &mut self,
        fill: &mut FillRegion,
        color: ColorId,
        pos: TilePos,
        direction: Option<WangIndex>,
        use_tile_mode: bool,
    ) {
        let direction = self.prepare_stroke(color, direction);
        generate_terrain_at(
            fill,
            self.geometry.as_ref(),
            self.brush_mode,
            color,
            pos,
            direction,
            use_tile_mode,
        );
    }

    fn prepare_stroke(&mut self, color: ColorId, direction: Option<WangIndex>) -> Option<WangIndex> {
        self.set_color(color);
        assert!(
            self.brush_mode != BrushMode::Idle,
            "WangPainter: cannot paint without a wang set"
        );
        direction.map(|dir| self.desired_direction(dir))
    }

    /// Require `color` at exactly slot `index` of `pos`, bypassing the brush
    ///
    /// # Panics
    /// Panics when no wang set is selected.
    pub fn paint_index(&mut self, color: ColorId, pos: TilePos, index: WangIndex) {
        assert!(
            self.wang_set.is_some(),
            "WangPainter: cannot paint without a wang set"
        );
        constrain_slot(&mut self.current_fill, self.geometry.as_ref(), color, pos, index);
    }

    /// Drop everything painted since the last commit
    pub fn clear(&mut self) {
        self.current_fill.clear();
    }

    /// Resolve the painted constraints without touching `layer`
    ///
    /// Returns the tiles a commit would write. The painter's random state is
    /// left as it was, so a following commit makes the same choices.
    pub fn preview<L: TileLayer + ?Sized>(&self, layer: &L) -> SparseLayer {
        let mut rng = self.rng.clone();
        self.solve(layer, &mut rng)
    }

    fn solve<L: TileLayer + ?Sized>(&self, layer: &L, rng: &mut SmallRng) -> SparseLayer {
        let mut stamp = SparseLayer::new();
        let Some(wang_set) = self.wang_set else {
            return stamp;
        };
        if self.current_fill.is_empty() {
            return stamp;
        }

        let mut filler = WangFiller::new(wang_set, self.geometry.as_ref());
        filler.set_corrections_enabled(self.corrections_enabled);
        filler.fill_region(&mut stamp, layer, &self.current_fill, rng);
        stamp
    }

    /// Fill the painted region into `layer` and clear it
    ///
    /// Only cells that received a tile are written. Returns the number of
    /// cells written.
    pub fn commit<L: TileLayer + ?Sized>(&mut self, layer: &mut L) -> usize {
        if self.wang_set.is_none() {
            if !self.current_fill.is_empty() {
                log::warn!("WangPainter::commit: no wang set selected, discarding paint");
            }
            self.clear();
            return 0;
        }

        let mut rng = self.rng.clone();
        let stamp = self.solve(&*layer, &mut rng);
        self.rng = rng;
        let bounds = layer.bounds();

        let mut written = 0;
        for (pos, tile) in stamp.iter() {
            if bounds.map_or(true, |rect| rect.contains(pos)) {
                layer.set_cell(pos, Some(tile));
                written += 1;
            }
        }
        log::debug!(
            "WangPainter::commit: wrote {} tiles from {} painted cells",
            written,
            self.current_fill.region.len()
        );

        self.clear();
        written
    }
}
