// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Design serialization and deserialization.
//!
//! This module handles saving and opening designs in YAML and JSON
//! formats. The format follows the file extension.

use crate::models::design::Design;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Supported design file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignFormat {
    Json,
    Yaml,
}

impl DesignFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(DesignFormat::Json),
            Some("yaml") | Some("yml") => Ok(DesignFormat::Yaml),
            other => bail!("Unsupported file extension: {:?}", other),
        }
    }
}

/// Export a design to YAML format.
pub fn export_yaml(design: &Design, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(design)?;
    std::fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Export a design to JSON format.
pub fn export_json(design: &Design, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(design)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Import a design from YAML format.
pub fn import_yaml(path: &Path) -> Result<Design> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let design = serde_yaml::from_str(&yaml)
        .with_context(|| format!("Invalid design file {}", path.display()))?;
    Ok(design)
}

/// Import a design from JSON format.
pub fn import_json(path: &Path) -> Result<Design> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let design = serde_json::from_str(&json)
        .with_context(|| format!("Invalid design file {}", path.display()))?;
    Ok(design)
}

/// Save a design in the format named by the path's extension.
pub fn save_design(design: &Design, path: &Path) -> Result<()> {
    match DesignFormat::from_path(path)? {
        DesignFormat::Json => export_json(design, path)?,
        DesignFormat::Yaml => export_yaml(design, path)?,
    }
    log::info!(
        "Saved design '{}' ({} elements) to {}",
        design.title,
        design.elements.len(),
        path.display()
    );
    Ok(())
}

/// Open a design in the format named by the path's extension.
pub fn open_design(path: &Path) -> Result<Design> {
    let design = match DesignFormat::from_path(path)? {
        DesignFormat::Json => import_json(path)?,
        DesignFormat::Yaml => import_yaml(path)?,
    };
    log::info!(
        "Opened design '{}' ({} elements) from {}",
        design.title,
        design.elements.len(),
        path.display()
    );
    Ok(design)
}
