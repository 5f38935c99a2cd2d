//! Wang sets: the catalog mapping tiles to their color signatures
//!
//! A WangSet belongs to one tileset and lists the colors (terrains) it uses
//! together with the WangId of every tile that takes part in autotiling.

use crate::error::{AutotileError, Result};
use crate::wang_id::{ColorId, WangId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Simple RGBA color for terrain visualization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

const CORNER_INDEXES: [usize; 4] = [1, 3, 5, 7];
const EDGE_INDEXES: [usize; 4] = [0, 2, 4, 6];
const ALL_INDEXES: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

/// Type of wang set - determines which slots of a WangId are used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WangSetType {
    /// 4 corners per tile
    /// Good for basic terrain transitions
    #[default]
    Corner,
    /// 4 edges per tile
    /// Good for roads, platforms, paths
    Edge,
    /// 4 corners + 4 edges per tile
    /// Most flexible, requires more tiles
    Mixed,
}

impl WangSetType {
    /// WangId indexes that carry colors for this set type
    pub fn active_indexes(&self) -> &'static [usize] {
        match self {
            WangSetType::Corner => &CORNER_INDEXES,
            WangSetType::Edge => &EDGE_INDEXES,
            WangSetType::Mixed => &ALL_INDEXES,
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        match self {
            WangSetType::Corner => WangId::is_corner(index),
            WangSetType::Edge => !WangId::is_corner(index),
            WangSetType::Mixed => true,
        }
    }

    /// Get the number of positions used by this set type
    pub fn position_count(&self) -> usize {
        self.active_indexes().len()
    }

    /// Get the name for a WangId index
    pub fn position_name(index: usize) -> &'static str {
        match index {
            0 => "Top",
            1 => "Top-Right",
            2 => "Right",
            3 => "Bottom-Right",
            4 => "Bottom",
            5 => "Bottom-Left",
            6 => "Left",
            7 => "Top-Left",
            _ => "Unknown",
        }
    }
}

/// A color within a set (e.g., "Grass", "Dirt", "Water")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WangColor {
    pub id: Uuid,
    pub name: String,
    /// Display color for UI visualization
    pub color: Color,
    /// Relative likelihood of tiles using this color
    #[serde(default = "default_probability")]
    pub probability: f32,
}

fn default_probability() -> f32 {
    1.0
}

impl WangColor {
    pub fn new(name: String, color: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            color,
            probability: 1.0,
        }
    }
}

/// Where a color shows up in the tiles of a set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorUsage {
    pub as_corner: bool,
    pub as_edge: bool,
}

/// A wang set attached to a tileset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WangSet {
    pub id: Uuid,
    pub name: String,
    /// Which tileset this set belongs to
    pub tileset_id: Uuid,
    pub set_type: WangSetType,
    /// Colors of this set; color id `n` is `colors[n - 1]`
    pub colors: Vec<WangColor>,
    /// Tile index -> signature
    wang_ids: BTreeMap<u32, WangId>,
    /// Per-tile probability, 1.0 when absent
    #[serde(default)]
    tile_probabilities: BTreeMap<u32, f32>,
}

impl WangSet {
    /// Colors are stored in 8-bit slots with 0 meaning "no color"
    pub const MAX_COLORS: usize = ColorId::MAX as usize;

    pub fn new(name: String, tileset_id: Uuid, set_type: WangSetType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            tileset_id,
            set_type,
            colors: Vec::new(),
            wang_ids: BTreeMap::new(),
            tile_probabilities: BTreeMap::new(),
        }
    }

    /// Add a new color to this set, returning its id (starting at 1)
    ///
    /// Fails once the set holds [`WangSet::MAX_COLORS`] colors.
    pub fn add_color(&mut self, name: String, color: Color) -> Result<ColorId> {
        if self.colors.len() >= Self::MAX_COLORS {
            return Err(AutotileError::TooManyColors {
                max: Self::MAX_COLORS,
            });
        }
        self.colors.push(WangColor::new(name, color));
        Ok(self.colors.len() as ColorId)
    }

    /// Remove a color by id
    ///
    /// Slots using the color are cleared and higher colors shift down by one.
    pub fn remove_color(&mut self, color: ColorId) -> Option<WangColor> {
        if color == 0 || color as usize > self.colors.len() {
            return None;
        }

        for wang_id in self.wang_ids.values_mut() {
            for i in 0..WangId::NUM_INDEXES {
                let c = wang_id.index_color(i);
                if c == color {
                    wang_id.set_index_color(i, 0);
                } else if c > color {
                    wang_id.set_index_color(i, c - 1);
                }
            }
        }
        self.wang_ids.retain(|_, wang_id| wang_id.has_any_color());

        Some(self.colors.remove(color as usize - 1))
    }

    pub fn color_count(&self) -> usize {
        self.colors.len()
    }

    pub fn color(&self, color: ColorId) -> Option<&WangColor> {
        if color == 0 {
            return None;
        }
        self.colors.get(color as usize - 1)
    }

    /// Get color id by name
    pub fn color_by_name(&self, name: &str) -> Option<ColorId> {
        self.colors
            .iter()
            .position(|c| c.name == name)
            .map(|i| (i + 1) as ColorId)
    }

    /// Assign a signature to a tile. An empty signature removes the tile.
    pub fn set_wang_id(&mut self, tile: u32, wang_id: WangId) -> Result<()> {
        let color_count = self.color_count();
        for index in 0..WangId::NUM_INDEXES {
            let color = wang_id.index_color(index);
            if color == 0 {
                continue;
            }
            if !self.set_type.is_active(index) {
                return Err(AutotileError::InactiveSlot {
                    tile,
                    index,
                    set_type: self.set_type,
                });
            }
            if color as usize > color_count {
                return Err(AutotileError::ColorOutOfRange {
                    tile,
                    index,
                    color,
                    color_count,
                });
            }
        }

        if wang_id.has_any_color() {
            self.wang_ids.insert(tile, wang_id);
        } else {
            self.wang_ids.remove(&tile);
        }
        Ok(())
    }

    pub fn remove_tile(&mut self, tile: u32) -> Option<WangId> {
        self.tile_probabilities.remove(&tile);
        self.wang_ids.remove(&tile)
    }

    pub fn wang_id_of(&self, tile: u32) -> Option<WangId> {
        self.wang_ids.get(&tile).copied()
    }

    /// All (tile, signature) pairs in tile order
    pub fn wang_ids(&self) -> impl Iterator<Item = (u32, WangId)> + '_ {
        self.wang_ids.iter().map(|(&tile, &wang_id)| (tile, wang_id))
    }

    pub fn tile_count(&self) -> usize {
        self.wang_ids.len()
    }

    pub fn set_tile_probability(&mut self, tile: u32, probability: f32) {
        self.tile_probabilities.insert(tile, probability);
    }

    pub fn tile_probability(&self, tile: u32) -> f32 {
        self.tile_probabilities.get(&tile).copied().unwrap_or(1.0)
    }

    /// Product of the probabilities of every color used by the signature
    pub fn wang_id_probability(&self, wang_id: WangId) -> f32 {
        (0..WangId::NUM_INDEXES)
            .filter_map(|i| self.color(wang_id.index_color(i)))
            .map(|c| c.probability)
            .product()
    }

    /// Selection weight of a tile
    pub fn tile_weight(&self, tile: u32) -> f32 {
        match self.wang_id_of(tile) {
            Some(wang_id) => self.tile_probability(tile) * self.wang_id_probability(wang_id),
            None => 0.0,
        }
    }

    /// Tiles whose signature agrees with `desired` on every masked slot,
    /// together with their selection weight
    pub fn candidates(&self, desired: WangId, mask: WangId) -> Vec<(u32, f32)> {
        self.wang_ids()
            .filter(|(_, wang_id)| wang_id.has_any_color() && wang_id.matches(desired, mask))
            .map(|(tile, _)| (tile, self.tile_weight(tile)))
            .filter(|&(_, weight)| weight > 0.0)
            .collect()
    }

    /// Calculate transition penalty between two colors
    /// Returns 0 for the same color, positive for different colors
    pub fn transition_penalty(&self, from: ColorId, to: ColorId) -> u32 {
        if from == to {
            0
        } else {
            // Simple penalty: 1 per mismatch
            1
        }
    }

    /// Scan every tile for where `color` is used
    pub fn color_usage(&self, color: ColorId) -> ColorUsage {
        let mut usage = ColorUsage::default();
        if color == 0 || color as usize > self.color_count() {
            return usage;
        }

        for wang_id in self.wang_ids.values() {
            for i in 0..WangId::NUM_INDEXES {
                if wang_id.index_color(i) == color {
                    let is_corner = WangId::is_corner(i);
                    usage.as_corner |= is_corner;
                    usage.as_edge |= !is_corner;
                }
            }
        }
        usage
    }

    /// Find all tiles that use only `color` on their active slots (useful for finding "fill" tiles)
    pub fn uniform_tiles(&self, color: ColorId) -> Vec<u32> {
        let active = self.set_type.active_indexes();
        self.wang_ids()
            .filter(|(_, wang_id)| active.iter().all(|&i| wang_id.index_color(i) == color))
            .map(|(tile, _)| tile)
            .collect()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
