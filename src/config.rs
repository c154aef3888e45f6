// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor configuration.
//!
//! Settings are read from a YAML file named by `DOCKYARD_CONFIG`, or from
//! `config.yaml` in the platform config directory. Missing fields fall back
//! to the defaults below.

use crate::util::geometry::GridSpec;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "DOCKYARD_CONFIG";

/// Invalid configuration values.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("grid block size must be positive, got {0}")]
    BlockSize(f64),
    #[error("grid must be at least 1x1 blocks, got {width}x{height}")]
    GridSize { width: u32, height: u32 },
    #[error("door size must be positive, got {width}x{height}")]
    DoorSize { width: f64, height: f64 },
    #[error("initial scale must be positive, got {0}")]
    InitialScale(f64),
    #[error("zoom step must be greater than 1, got {0}")]
    ZoomStep(f64),
}

/// Grid layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Side of one block in world pixels.
    pub block_size: f64,
    /// Blocks across.
    pub width: u32,
    /// Blocks down.
    pub height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            block_size: 300.0,
            width: 22,
            height: 11,
        }
    }
}

/// Door dimensions in world pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 200.0,
        }
    }
}

/// Canvas view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub initial_scale: f64,
    /// Scale factor applied per scroll step.
    pub zoom_step: f64,
    pub show_grid: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            initial_scale: 0.15,
            zoom_step: 1.05,
            show_grid: true,
        }
    }
}

/// All editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub grid: GridConfig,
    pub door: DoorConfig,
    pub view: ViewConfig,
    /// Point cost of one hull tile.
    pub hull_tile_cost: u32,
    /// Undo steps kept.
    pub history_limit: usize,
    /// Custom element catalog; the built-in one is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// Restore the last design at startup and save it on exit.
    pub autosave: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            door: DoorConfig::default(),
            view: ViewConfig::default(),
            hull_tile_cost: 10,
            history_limit: 50,
            catalog_path: None,
            autosave: true,
        }
    }
}

impl EditorConfig {
    pub fn grid_spec(&self) -> GridSpec {
        GridSpec::new(self.grid.block_size, self.grid.width, self.grid.height)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grid.block_size > 0.0) {
            return Err(ConfigError::BlockSize(self.grid.block_size));
        }
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::GridSize {
                width: self.grid.width,
                height: self.grid.height,
            });
        }
        if !(self.door.width > 0.0 && self.door.height > 0.0) {
            return Err(ConfigError::DoorSize {
                width: self.door.width,
                height: self.door.height,
            });
        }
        if !(self.view.initial_scale > 0.0) {
            return Err(ConfigError::InitialScale(self.view.initial_scale));
        }
        if !(self.view.zoom_step > 1.0) {
            return Err(ConfigError::ZoomStep(self.view.zoom_step));
        }
        Ok(())
    }

    /// Parse and validate YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EditorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml_str(&yaml).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// `config.yaml` in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "Dockyard", "Dockyard")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Resolve the config: explicit env path, then the default file, then defaults.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            log::info!("Loading config from {} ({})", path.display(), CONFIG_ENV_VAR);
            return Self::load_from(&path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                log::info!("Loading config from {}", path.display());
                Self::load_from(&path)
            }
            _ => {
                log::info!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());

        let grid = config.grid_spec();
        assert_eq!(grid.width_px(), 6600.0);
        assert_eq!(grid.height_px(), 3300.0);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "grid:\n  width: 10\nhull_tile_cost: 12\n";
        let config = EditorConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.grid.width, 10);
        assert_eq!(config.grid.height, 11);
        assert_eq!(config.grid.block_size, 300.0);
        assert_eq!(config.hull_tile_cost, 12);
        assert!(config.autosave);
    }

    #[test]
    fn test_rejects_zoom_step_at_or_below_one() {
        let mut config = EditorConfig::default();
        config.view.zoom_step = 1.0;
        assert_eq!(config.validate(), Err(ConfigError::ZoomStep(1.0)));

        let err = EditorConfig::from_yaml_str("view:\n  zoom_step: 0.5\n").unwrap_err();
        assert!(err.to_string().contains("zoom step"));
    }

    #[test]
    fn test_rejects_empty_grid() {
        let mut config = EditorConfig::default();
        config.grid.height = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridSize {
                width: 22,
                height: 0
            })
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "door:\n  width: 40\n  height: 250\nautosave: false\n").unwrap();

        let config = EditorConfig::load_from(&path).unwrap();
        assert_eq!(config.door.width, 40.0);
        assert_eq!(config.door.height, 250.0);
        assert!(!config.autosave);

        let missing = EditorConfig::load_from(&dir.path().join("missing.yaml"));
        assert!(missing.is_err());
    }
}
