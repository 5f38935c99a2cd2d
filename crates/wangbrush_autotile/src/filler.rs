//! Tiled-style WangFiller
//!
//! Resolves the constraints collected in a [`FillRegion`] into concrete
//! tiles. Works in three phases:
//!
//! 1. Build constraints: user constraints are hard, the cell's current tile
//!    (and with corrections enabled, the tiles around the region) become soft
//!    preferences.
//! 2. Place tiles in row-major order, propagating each placed tile onto the
//!    neighbors that still have to be placed or that hold a tile.
//! 3. Single-pass corrections of outside tiles that no longer fit. These do
//!    not propagate any further.
//!
//! Results are written into a stamp layer. Cells the filler could not
//! resolve are left out of the stamp, so their current tile stays.

use crate::fill_region::{CellInfo, FillRegion};
use crate::geometry::GridGeometry;
use crate::random::{RandomPicker, RandomTaker};
use crate::wang_id::{WangId, WangIndex};
use crate::wang_set::WangSet;
use rand::Rng;
use wangbrush_core::{Grid, Region, SparseLayer, TileLayer, TilePos};

/// Summary of one fill pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Region cells that received a tile
    pub placed: usize,
    /// Outside cells replaced by the correction pass
    pub corrected: usize,
    /// Placed cells that needed at least one constraint dropped
    pub relaxed: usize,
    /// Region cells left untouched because nothing matched
    pub skipped: usize,
}

/// Fills a region with Wang tiles based on constraints
pub struct WangFiller<'a> {
    wang_set: &'a WangSet,
    geometry: &'a dyn GridGeometry,
    /// Whether tiles outside the region may be replaced to fit
    corrections_enabled: bool,
}

impl<'a> WangFiller<'a> {
    pub fn new(wang_set: &'a WangSet, geometry: &'a dyn GridGeometry) -> Self {
        Self {
            wang_set,
            geometry,
            corrections_enabled: false,
        }
    }

    pub fn set_corrections_enabled(&mut self, enabled: bool) {
        self.corrections_enabled = enabled;
    }

    pub fn corrections_enabled(&self) -> bool {
        self.corrections_enabled
    }

    fn wang_id_at<L: TileLayer + ?Sized>(&self, layer: &L, pos: TilePos) -> WangId {
        layer
            .cell_at(pos)
            .and_then(|tile| self.wang_set.wang_id_of(tile))
            .unwrap_or(WangId::EMPTY)
    }

    /// Build preferred colors from the 8 surrounding tiles
    ///
    /// Tiles inside the region are about to be replaced and contribute nothing.
    fn wang_id_from_surroundings<L: TileLayer + ?Sized>(
        &self,
        back: &L,
        region: &Region,
        pos: TilePos,
    ) -> WangId {
        let neighbors = WangIndex::ALL.map(|dir| {
            let neighbor = self.geometry.neighbor(pos, dir);
            if region.contains(neighbor) {
                WangId::EMPTY
            } else {
                self.wang_id_at(back, neighbor)
            }
        });

        let mut result = WangId::EMPTY;

        // Get edge colors from opposite sides of neighbors
        for i in [0, 2, 4, 6] {
            let opp = WangId::opposite_index(i);
            result.set_index_color(i, neighbors[i].index_color(opp));
        }

        // Get corner colors with fallback to the edge neighbors sharing them
        for i in [1, 3, 5, 7] {
            let mut color = neighbors[i].index_color(WangId::opposite_index(i));

            if color == 0 {
                let left_idx = WangId::prev_index(i);
                color = neighbors[left_idx].index_color((i + 2) % 8);
            }

            if color == 0 {
                let right_idx = WangId::next_index(i);
                color = neighbors[right_idx].index_color((i + 6) % 8);
            }

            result.set_index_color(i, color);
        }

        result
    }

    /// Sum of transition penalties over the soft preferences of `info`
    fn penalty(&self, info: &CellInfo, tile_wang: WangId) -> u32 {
        (0..WangId::NUM_INDEXES)
            .filter(|&i| !info.is_constrained(i))
            .filter_map(|i| {
                let want = info.desired.index_color(i);
                (want != 0).then(|| self.wang_set.transition_penalty(want, tile_wang.index_color(i)))
            })
            .sum()
    }

    /// Pick among the lowest-penalty tiles that satisfy the hard constraints
    fn pick_best(&self, info: &CellInfo, rng: &mut impl Rng) -> Option<u32> {
        let candidates = self.wang_set.candidates(info.desired, info.mask);
        if candidates.is_empty() {
            return None;
        }

        let scored: Vec<(u32, f32, u32)> = candidates
            .into_iter()
            .filter_map(|(tile, weight)| {
                let wang_id = self.wang_set.wang_id_of(tile)?;
                Some((tile, weight, self.penalty(info, wang_id)))
            })
            .collect();
        let lowest = scored.iter().map(|&(_, _, penalty)| penalty).min()?;

        let mut picker = RandomPicker::new();
        for &(tile, weight, penalty) in &scored {
            if penalty == lowest {
                picker.add(tile, weight as f64);
            }
        }
        if picker.is_empty() {
            return None;
        }
        Some(*picker.pick(rng))
    }

    /// Masked slot to give up on when nothing matches
    ///
    /// Prefers the least significant slot whose color no pickable tile
    /// carries there, otherwise the least significant masked slot.
    fn slot_to_relax(&self, info: &CellInfo) -> Option<usize> {
        let masked: Vec<usize> = (0..WangId::NUM_INDEXES)
            .filter(|&i| info.is_constrained(i))
            .collect();

        let unsatisfiable = masked.iter().copied().find(|&i| {
            let want = info.desired.index_color(i);
            !self
                .wang_set
                .wang_ids()
                .any(|(tile, wang_id)| {
                    wang_id.index_color(i) == want && self.wang_set.tile_weight(tile) > 0.0
                })
        });

        unsatisfiable.or_else(|| masked.first().copied())
    }

    /// Find the best tile for `info`, relaxing constraints when needed
    ///
    /// Returns the tile and whether any constraint had to be dropped.
    pub fn find_best_match(&self, info: &CellInfo, rng: &mut impl Rng) -> Option<(u32, bool)> {
        let mut info = *info;
        let mut relaxed = false;

        loop {
            if let Some(tile) = self.pick_best(&info, rng) {
                return Some((tile, relaxed));
            }

            // Dropped slots stay as soft preferences
            let slot = self.slot_to_relax(&info)?;
            log::debug!(
                "find_best_match: no tile for {} under mask {}, relaxing index {}",
                info.desired,
                info.mask,
                slot
            );
            info.mask.set_index_color(slot, 0);
            relaxed = true;
        }
    }

    /// Re-solve an outside cell, trying distinct candidates until one also
    /// agrees with every soft preference
    fn find_correction(&self, info: &CellInfo, rng: &mut impl Rng) -> Option<u32> {
        let mut taker = RandomTaker::new();
        for (tile, weight) in self.wang_set.candidates(info.desired, info.mask) {
            taker.add(tile, weight as f64);
        }

        let mut best: Option<(u32, u32)> = None;
        while !taker.is_empty() {
            let tile = taker.take(rng);
            let Some(wang_id) = self.wang_set.wang_id_of(tile) else {
                continue;
            };
            let penalty = self.penalty(info, wang_id);
            if penalty == 0 {
                return Some(tile);
            }
            if best.map_or(true, |(_, best_penalty)| penalty < best_penalty) {
                best = Some((tile, penalty));
            }
        }

        best.map(|(tile, _)| tile)
    }

    /// Check if a cell violates its hard constraints given a tile's WangId
    fn violates_constraints(info: &CellInfo, tile_wang: WangId) -> bool {
        (0..WangId::NUM_INDEXES).any(|i| {
            let want = info.desired.index_color(i);
            info.is_constrained(i) && want != 0 && want != tile_wang.index_color(i)
        })
    }

    /// Set hard constraints on the neighbor at `dir` from a placed tile
    ///
    /// Across an edge the two corners on either side are shared as well.
    fn update_adjacent(
        cells: &mut Grid<CellInfo>,
        fill: &FillRegion,
        placed: WangId,
        neighbor: TilePos,
        dir: usize,
    ) {
        let opp = WangId::opposite_index(dir);
        let mut facing = vec![(dir, opp)];
        if !WangId::is_corner(dir) {
            facing.push((WangId::prev_index(dir), WangId::next_index(opp)));
            facing.push((WangId::next_index(dir), WangId::prev_index(opp)));
        }

        let user = fill.cell(neighbor);
        let cell = cells.get_mut(neighbor);
        for (ours, theirs) in facing {
            let color = placed.index_color(ours);
            if color == 0 || user.is_constrained(theirs) {
                continue;
            }
            cell.constrain(WangIndex::from_index(theirs), color);
        }
    }

    /// Fill the region of `fill` into `target`, reading existing tiles from
    /// `back`
    pub fn fill_region<L: TileLayer + ?Sized>(
        &self,
        target: &mut SparseLayer,
        back: &L,
        fill: &FillRegion,
        rng: &mut impl Rng,
    ) -> FillReport {
        let mut report = FillReport::default();
        if fill.is_empty() {
            return report;
        }

        let region = &fill.region;
        let mut cells: Grid<CellInfo> = Grid::new();
        let mut corrections = Region::new();

        // Phase 1: hard constraints from the user, soft ones from what is there
        for pos in region.iter() {
            let mut info = fill.cell(pos);
            let mut preserved = WangId::EMPTY;

            let current = self.wang_id_at(back, pos);
            for i in 0..WangId::NUM_INDEXES {
                if !info.is_constrained(i) && current.index_color(i) != 0 {
                    info.desired.set_index_color(i, current.index_color(i));
                    preserved.set_index_color(i, WangId::INDEX_MASK);
                }
            }

            if self.corrections_enabled {
                let around = self.wang_id_from_surroundings(back, region, pos);
                for i in 0..WangId::NUM_INDEXES {
                    let color = around.index_color(i);
                    if !info.is_constrained(i) && preserved.index_color(i) == 0 && color != 0 {
                        info.desired.set_index_color(i, color);
                    }
                }
            }

            cells.set(pos, info);
        }

        // Phase 2: place tiles and propagate
        for pos in region.iter() {
            let info = cells.get(pos);

            let Some((tile, relaxed)) = self.find_best_match(&info, rng) else {
                log::trace!("fill_region: no tile for {:?}, leaving it untouched", pos);
                report.skipped += 1;
                continue;
            };
            log::trace!("fill_region: placed tile {} at {:?}", tile, pos);
            target.set_cell(pos, Some(tile));
            report.placed += 1;
            if relaxed {
                report.relaxed += 1;
            }

            let placed = self.wang_id_at(&*target, pos);
            for dir in WangIndex::ALL {
                let neighbor = self.geometry.neighbor(pos, dir);
                let inside = region.contains(neighbor);

                // Only pending region cells and outside cells holding a tile
                if inside {
                    if target.cell_at(neighbor).is_some() {
                        continue;
                    }
                } else if !self.corrections_enabled || back.cell_at(neighbor).is_none() {
                    continue;
                }

                Self::update_adjacent(&mut cells, fill, placed, neighbor, dir.index());

                if !inside {
                    let current = self.wang_id_at(back, neighbor);
                    if Self::violates_constraints(&cells.get(neighbor), current) {
                        corrections.insert(neighbor);
                    }
                }
            }
        }

        // Phase 3: single-pass corrections
        for pos in corrections.iter() {
            let mut info = cells.get(pos);
            let current = self.wang_id_at(back, pos);
            if !Self::violates_constraints(&info, current) {
                continue;
            }

            for i in 0..WangId::NUM_INDEXES {
                if !info.is_constrained(i) && current.index_color(i) != 0 {
                    info.desired.set_index_color(i, current.index_color(i));
                }
            }

            if let Some(tile) = self.find_correction(&info, rng) {
                log::trace!("fill_region: corrected {:?} to tile {}", pos, tile);
                target.set_cell(pos, Some(tile));
                report.corrected += 1;
            }
        }

        log::debug!(
            "fill_region '{}': {} placed, {} corrected, {} relaxed, {} skipped",
            self.wang_set.name,
            report.placed,
            report.corrected,
            report.relaxed,
            report.skipped
        );
        report
    }
}
