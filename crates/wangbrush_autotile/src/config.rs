//! Project configuration: painter settings and the wang sets of a project
//!
//! Painter settings live in a small TOML file. The wang sets themselves are
//! stored as JSON alongside the rest of the project data.

use crate::error::Result;
use crate::geometry::MapOrientation;
use crate::wang_set::WangSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Settings a [`WangPainter`](crate::WangPainter) is created from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainterSettings {
    /// Let the filler replace tiles outside the painted region
    pub corrections_enabled: bool,
    /// Fixed seed for reproducible tile choices
    pub seed: Option<u64>,
    pub orientation: MapOrientation,
}

impl Default for PainterSettings {
    fn default() -> Self {
        Self {
            corrections_enabled: true,
            seed: None,
            orientation: MapOrientation::Orthogonal,
        }
    }
}

impl PainterSettings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        log::info!("Loaded painter settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?)?;
        log::info!("Saved painter settings to {}", path.display());
        Ok(())
    }
}

/// Configuration for autotiling in a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutotileConfig {
    #[serde(default)]
    pub painter: PainterSettings,
    /// All wang sets defined in the project
    #[serde(default)]
    pub wang_sets: Vec<WangSet>,
}

impl AutotileConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_wang_set(&mut self, wang_set: WangSet) {
        self.wang_sets.push(wang_set);
    }

    pub fn wang_set(&self, id: Uuid) -> Option<&WangSet> {
        self.wang_sets.iter().find(|ws| ws.id == id)
    }

    pub fn wang_set_mut(&mut self, id: Uuid) -> Option<&mut WangSet> {
        self.wang_sets.iter_mut().find(|ws| ws.id == id)
    }

    pub fn remove_wang_set(&mut self, id: Uuid) -> Option<WangSet> {
        let pos = self.wang_sets.iter().position(|ws| ws.id == id)?;
        Some(self.wang_sets.remove(pos))
    }

    /// All wang sets defined for one tileset
    pub fn wang_sets_for_tileset(&self, tileset_id: Uuid) -> Vec<&WangSet> {
        self.wang_sets
            .iter()
            .filter(|ws| ws.tileset_id == tileset_id)
            .collect()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!(
            "Loaded {} wang sets from {}",
            config.wang_sets.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutotileError;
    use crate::geometry::{StaggerAxis, StaggerIndex};
    use crate::wang_id::WangId;
    use crate::wang_set::{Color, WangSetType};

    #[test]
    fn test_settings_defaults_fill_missing_keys() {
        let settings = PainterSettings::from_toml_str("seed = 7\n").unwrap();
        assert!(settings.corrections_enabled);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.orientation, MapOrientation::Orthogonal);

        assert_eq!(PainterSettings::from_toml_str("").unwrap(), PainterSettings::default());
    }

    #[test]
    fn test_settings_staggered_orientation() {
        let toml = r#"
corrections_enabled = false

[orientation.staggered]
axis = "X"
index = "Even"
"#;
        let settings = PainterSettings::from_toml_str(toml).unwrap();
        assert!(!settings.corrections_enabled);
        assert_eq!(
            settings.orientation,
            MapOrientation::Staggered {
                axis: StaggerAxis::X,
                index: StaggerIndex::Even,
            }
        );

        let reparsed = PainterSettings::from_toml_str(&settings.to_toml_string().unwrap()).unwrap();
        assert_eq!(reparsed, settings);
    }

    #[test]
    fn test_settings_invalid_toml() {
        let err = PainterSettings::from_toml_str("corrections_enabled = \"yes\"").unwrap_err();
        assert!(matches!(err, AutotileError::TomlParse(_)));
    }

    #[test]
    fn test_settings_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("painter.toml");

        let settings = PainterSettings {
            corrections_enabled: false,
            seed: Some(42),
            orientation: MapOrientation::Isometric,
        };
        settings.save(&path).unwrap();
        assert_eq!(PainterSettings::load(&path).unwrap(), settings);

        let missing = PainterSettings::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, AutotileError::Io(_)));
    }

    #[test]
    fn test_wang_set_lookup() {
        let tileset = Uuid::new_v4();
        let mut config = AutotileConfig::new();
        let ground = WangSet::new("Ground".to_string(), tileset, WangSetType::Corner);
        let roads = WangSet::new("Roads".to_string(), tileset, WangSetType::Edge);
        let other = WangSet::new("Walls".to_string(), Uuid::new_v4(), WangSetType::Mixed);
        let ground_id = ground.id;
        config.add_wang_set(ground);
        config.add_wang_set(roads);
        config.add_wang_set(other);

        assert_eq!(config.wang_sets_for_tileset(tileset).len(), 2);
        config.wang_set_mut(ground_id).unwrap().add_color("Grass".to_string(), Color::GREEN).unwrap();
        assert_eq!(config.wang_set(ground_id).unwrap().color_count(), 1);

        let removed = config.remove_wang_set(ground_id).unwrap();
        assert_eq!(removed.name, "Ground");
        assert!(config.wang_set(ground_id).is_none());
        assert!(config.remove_wang_set(ground_id).is_none());
    }

    #[test]
    fn test_config_file_keeps_wang_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autotile.json");

        let mut set = WangSet::new("Ground".to_string(), Uuid::new_v4(), WangSetType::Corner);
        set.add_color("Grass".to_string(), Color::GREEN).unwrap();
        set.set_wang_id(4, WangId::with_corners(1)).unwrap();
        let id = set.id;

        let mut config = AutotileConfig::new();
        config.painter.seed = Some(1);
        config.add_wang_set(set);
        config.save(&path).unwrap();

        let loaded = AutotileConfig::load(&path).unwrap();
        assert_eq!(loaded.painter.seed, Some(1));
        assert_eq!(
            loaded.wang_set(id).unwrap().wang_id_of(4),
            Some(WangId::with_corners(1))
        );
    }
}
