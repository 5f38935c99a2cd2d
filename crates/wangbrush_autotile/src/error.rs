//! Errors for catalog edits and configuration I/O

use crate::wang_id::ColorId;
use crate::wang_set::WangSetType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutotileError {
    #[error("Failed to read or write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),
    #[error("Tile {tile}: color {color} at index {index} exceeds the {color_count} colors of the set")]
    ColorOutOfRange {
        tile: u32,
        index: usize,
        color: ColorId,
        color_count: usize,
    },
    #[error("Tile {tile}: index {index} is not used by {set_type:?} sets")]
    InactiveSlot {
        tile: u32,
        index: usize,
        set_type: WangSetType,
    },
    #[error("A wang set holds at most {max} colors")]
    TooManyColors { max: usize },
}

pub type Result<T> = std::result::Result<T, AutotileError>;
