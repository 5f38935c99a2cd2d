//! Tiled-compatible Wang tile painting
//!
//! This crate provides the Wang filler and painter used to paint terrain
//! colors onto a tile layer, picking tiles whose corner and edge colors
//! agree with what was painted and with the tiles around it.
//!
//! # Features
//! - Corner, Edge, and Mixed wang set types
//! - Weighted random tile choice with probability-aware constraint relaxation
//! - Optional corrections of tiles around the painted region
//! - Orthogonal, isometric, staggered and hexagonal map geometry
//!
//! # Example
//!
//! ```rust
//! use wangbrush_autotile::{Color, WangId, WangIndex, WangPainter, WangSet, WangSetType};
//! use wangbrush_autotile::wangbrush_core::{FixedLayer, TileLayer};
//! use uuid::Uuid;
//!
//! let mut wang_set = WangSet::new("Ground".to_string(), Uuid::new_v4(), WangSetType::Corner);
//! let grass = wang_set.add_color("Grass".to_string(), Color::GREEN).unwrap();
//! let dirt = wang_set.add_color("Dirt".to_string(), Color::rgb(0.6, 0.4, 0.2)).unwrap();
//! wang_set.set_wang_id(0, WangId::with_corners(grass)).unwrap();
//! wang_set.set_wang_id(1, WangId::with_corners(dirt)).unwrap();
//!
//! let mut layer = FixedLayer::new("Ground".to_string(), 10, 10);
//! let mut painter = WangPainter::with_seed(1);
//! painter.set_wang_set(Some(&wang_set));
//! painter.set_terrain(dirt, (5, 5), None, true);
//! painter.commit(&mut layer);
//!
//! assert_eq!(layer.cell_at((5, 5)), Some(1));
//! ```

pub mod config;
pub mod error;
pub mod fill_region;
pub mod filler;
pub mod geometry;
pub mod painter;
pub mod random;
pub mod target;
pub mod wang_id;
pub mod wang_set;

// Re-export main types at crate root
pub use config::{AutotileConfig, PainterSettings};
pub use error::{AutotileError, Result};
pub use fill_region::{CellInfo, FillRegion};
pub use filler::{FillReport, WangFiller};
pub use geometry::{GridGeometry, MapOrientation, Orthogonal, StaggerAxis, StaggerIndex, Staggered};
pub use painter::{constrain_slot, generate_terrain_at, BrushMode, WangPainter};
pub use random::{RandomPicker, RandomTaker};
pub use target::{paint_target, PaintTarget};
pub use wang_id::{ColorId, WangId, WangIndex};
pub use wang_set::{Color, ColorUsage, WangColor, WangSet, WangSetType};

// Re-export wangbrush_core
pub use wangbrush_core;
