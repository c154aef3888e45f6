// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Autosave storage.
//!
//! The editor persists its whole design through [`DesignStore`]. The file
//! store writes a small versioned JSON envelope into the user data
//! directory; a write goes to a temporary file first and is renamed into
//! place.

use crate::models::design::Design;
use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version written into new autosave files.
pub const AUTOSAVE_VERSION: u32 = 1;

const AUTOSAVE_FILE: &str = "autosave.json";

/// Somewhere the current design can be kept between sessions.
pub trait DesignStore {
    /// The stored design, if there is one.
    fn load(&self) -> Result<Option<Design>>;

    /// Replace the stored design.
    fn save(&mut self, design: &Design) -> Result<()>;
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    version: u32,
    design: Design,
}

/// Stores the design as a JSON file.
#[derive(Debug, Clone)]
pub struct FileDesignStore {
    path: PathBuf,
}

impl FileDesignStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory.
    pub fn in_data_dir() -> Option<Self> {
        ProjectDirs::from("io", "Dockyard", "Dockyard")
            .map(|dirs| Self::new(dirs.data_dir().join(AUTOSAVE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DesignStore for FileDesignStore {
    fn load(&self) -> Result<Option<Design>> {
        if !self.path.exists() {
            log::info!("No autosave at {}", self.path.display());
            return Ok(None);
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read autosave {}", self.path.display()))?;
        let envelope: Envelope = serde_json::from_str(&json)
            .with_context(|| format!("Invalid autosave {}", self.path.display()))?;
        if envelope.version != AUTOSAVE_VERSION {
            bail!(
                "Unsupported autosave version {} (expected {})",
                envelope.version,
                AUTOSAVE_VERSION
            );
        }

        log::info!(
            "Restored design '{}' ({} elements) from {}",
            envelope.design.title,
            envelope.design.elements.len(),
            self.path.display()
        );
        Ok(Some(envelope.design))
    }

    fn save(&mut self, design: &Design) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        }

        let envelope = Envelope {
            version: AUTOSAVE_VERSION,
            design: design.clone(),
        };
        let json = serde_json::to_string(&envelope).context("Failed to serialize design")?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        log::info!("Autosaved design to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store, used when no data directory is available.
#[derive(Debug, Default)]
pub struct MemoryDesignStore {
    design: Option<Design>,
}

impl DesignStore for MemoryDesignStore {
    fn load(&self) -> Result<Option<Design>> {
        Ok(self.design.clone())
    }

    fn save(&mut self, design: &Design) -> Result<()> {
        self.design = Some(design.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hull::GridCoord;
    use crate::util::geometry::GridSpec;

    fn design() -> Design {
        let mut design = Design::new(&GridSpec::new(300.0, 22, 11));
        design.title = "Autosaved".to_string();
        design.hull = design.hull.with_tile(GridCoord::new(1, 2));
        design
    }

    #[test]
    fn test_missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDesignStore::new(dir.path().join("autosave.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileDesignStore::new(dir.path().join("nested").join("autosave.json"));

        store.save(&design()).unwrap();
        assert_eq!(store.load().unwrap(), Some(design()));
        assert!(!store.path().with_extension("json.tmp").exists());

        // Saving again replaces the old design.
        let mut changed = design();
        changed.title = "Second".to_string();
        store.save(&changed).unwrap();
        assert_eq!(store.load().unwrap().unwrap().title, "Second");
    }

    #[test]
    fn test_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autosave.json");
        let envelope = serde_json::json!({ "version": 99, "design": design() });
        std::fs::write(&path, envelope.to_string()).unwrap();

        let err = FileDesignStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("version 99"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autosave.json");
        std::fs::write(&path, "garbage").unwrap();

        assert!(FileDesignStore::new(&path).load().is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryDesignStore::default();
        assert!(store.load().unwrap().is_none());
        store.save(&design()).unwrap();
        assert_eq!(store.load().unwrap(), Some(design()));
    }
}
