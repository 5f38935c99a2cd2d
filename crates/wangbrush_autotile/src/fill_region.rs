//! The constraint buffer accumulated during one paint gesture

use crate::wang_id::{ColorId, WangId, WangIndex};
use wangbrush_core::{Grid, Rect, Region, TilePos};

/// Information about constraints for a single cell
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct CellInfo {
    /// Desired colors at each slot
    pub desired: WangId,
    /// INDEX_MASK on every slot that is hard-constrained (must match exactly)
    pub mask: WangId,
}

impl CellInfo {
    /// Require `color` at `index`
    pub fn constrain(&mut self, index: WangIndex, color: ColorId) {
        self.desired.set_index_color(index.index(), color);
        self.mask.set_index_color(index.index(), WangId::INDEX_MASK);
    }

    pub fn is_constrained(&self, index: usize) -> bool {
        self.mask.index_color(index) != 0
    }

    /// The desired colors with unconstrained slots cleared
    pub fn masked_desired(&self) -> WangId {
        self.desired & self.mask
    }
}

/// User constraints per cell plus the set of cells they touch
#[derive(Clone, Default, Debug)]
pub struct FillRegion {
    pub grid: Grid<CellInfo>,
    pub region: Region,
}

impl FillRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.region.clear();
    }

    /// Require `color` at slot `index` of the cell at `pos`
    pub fn constrain(&mut self, pos: TilePos, index: WangIndex, color: ColorId) {
        self.grid.get_mut(pos).constrain(index, color);
        self.region.add_rect(Rect::unit(pos));
    }

    pub fn cell(&self, pos: TilePos) -> CellInfo {
        self.grid.get(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constrain_sets_mask_and_region() {
        let mut fill = FillRegion::new();
        assert!(fill.is_empty());

        fill.constrain((2, 3), WangIndex::Right, 4);
        fill.constrain((2, 3), WangIndex::TopLeft, 1);

        let cell = fill.cell((2, 3));
        assert_eq!(cell.desired.index_color(2), 4);
        assert!(cell.is_constrained(2));
        assert!(cell.is_constrained(7));
        assert!(!cell.is_constrained(0));
        assert_eq!(fill.region.len(), 1);
        assert!(fill.region.contains((2, 3)));
    }

    #[test]
    fn test_masked_desired_drops_soft_slots() {
        let mut cell = CellInfo::default();
        cell.desired.set_index_color(0, 3);
        cell.constrain(WangIndex::Bottom, 2);

        assert_eq!(cell.masked_desired().colors(), [0, 0, 0, 0, 2, 0, 0, 0]);
    }

    #[test]
    fn test_clear_twice() {
        let mut fill = FillRegion::new();
        fill.constrain((0, 0), WangIndex::Top, 1);
        fill.clear();
        fill.clear();
        assert!(fill.is_empty());
        assert!(fill.grid.is_empty());
    }
}
