// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ship element catalog.
//!
//! The catalog is the list of elements the user can place. A default
//! catalog is compiled into the binary; a custom JSON file can replace it.
//! The built-in entries carry no artwork and draw as labelled placeholders;
//! a custom catalog names its images relative to its own file.

use super::element::{ElementCategory, ShipElement};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const BUILTIN_CATALOG: &str = include_str!("../../assets/ship-elements.json");

/// The placeable elements and where their artwork lives.
#[derive(Debug, Clone)]
pub struct Catalog {
    elements: Vec<ShipElement>,
    /// Directory that artwork paths are relative to.
    base_dir: PathBuf,
}

impl Catalog {
    /// The catalog shipped with the application.
    pub fn builtin() -> Result<Self> {
        let elements = Self::parse(BUILTIN_CATALOG).context("Built-in catalog is invalid")?;
        Ok(Self {
            elements,
            base_dir: builtin_base_dir(),
        })
    }

    /// Load a catalog from a JSON file. Artwork resolves next to the file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let elements = Self::parse(&json)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        log::info!("Loaded {} catalog elements from {}", elements.len(), path.display());
        Ok(Self { elements, base_dir })
    }

    fn parse(json: &str) -> Result<Vec<ShipElement>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn elements(&self) -> &[ShipElement] {
        &self.elements
    }

    pub fn get(&self, index: usize) -> Option<&ShipElement> {
        self.elements.get(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element indices grouped by category, categories in first-appearance order.
    pub fn grouped(&self) -> Vec<(ElementCategory, Vec<usize>)> {
        let mut groups: Vec<(ElementCategory, Vec<usize>)> = Vec::new();
        for (index, element) in self.elements.iter().enumerate() {
            match groups.iter_mut().find(|(category, _)| *category == element.category) {
                Some((_, indices)) => indices.push(index),
                None => groups.push((element.category, vec![index])),
            }
        }
        groups
    }

    /// Find the element whose artwork has the same file name as `image_src`.
    pub fn find_by_image(&self, image_src: &str) -> Option<&ShipElement> {
        let wanted = file_name(image_src);
        self.elements.iter().find(|element| {
            element
                .image_file_name
                .as_deref()
                .is_some_and(|name| file_name(name) == wanted)
        })
    }

    /// Absolute path of an element's artwork, if it has any.
    pub fn image_path(&self, element: &ShipElement) -> Option<PathBuf> {
        element
            .image_file_name
            .as_ref()
            .map(|name| self.base_dir.join(name))
    }
}

/// `assets/` next to the running executable.
fn builtin_base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("assets")))
        .unwrap_or_else(|| PathBuf::from("assets"))
}

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.elements().iter().any(ShipElement::is_weapon));
    }

    #[test]
    fn test_builtin_artwork_resolves() {
        let catalog = Catalog::builtin().unwrap();
        for element in catalog.elements() {
            if let Some(path) = catalog.image_path(element) {
                assert!(path.exists(), "{} names missing artwork {}", element.name, path.display());
            }
            assert!(element.image_width.is_some() && element.image_height.is_some());
        }
    }

    #[test]
    fn test_grouped_keeps_first_appearance_order() {
        let json = r#"[
            {"name": "A", "type": "thruster", "tacticalValue": 1},
            {"name": "B", "type": "hallway", "tacticalValue": 1},
            {"name": "C", "type": "thruster", "tacticalValue": 1}
        ]"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let catalog = Catalog::load(file.path()).unwrap();

        let groups = catalog.grouped();
        assert_eq!(
            groups,
            vec![
                (ElementCategory::Thruster, vec![0, 2]),
                (ElementCategory::Hallway, vec![1]),
            ]
        );
    }

    #[test]
    fn test_find_by_image_matches_basename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "Hallway", "type": "hallway", "tacticalValue": 5, "imageFileName": "images/hallway.png"},
                {"name": "Laser Gun", "type": "laserGunControlRoom", "tacticalValue": 40, "imageFileName": "images/laser-gun.png"}
            ]"#,
        )
        .unwrap();
        let catalog = Catalog::load(&path).unwrap();
        let found = catalog
            .find_by_image("http://localhost:4200/assets/images/laser-gun.png")
            .unwrap();
        assert_eq!(found.name, "Laser Gun");
        assert!(catalog.find_by_image("nothing.png").is_none());
    }

    #[test]
    fn test_image_path_is_relative_to_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"name": "T", "type": "thruster", "tacticalValue": 1, "imageFileName": "img/t.png"}]"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        let element = catalog.get(0).unwrap();
        assert_eq!(catalog.image_path(element), Some(dir.path().join("img/t.png")));
    }

    #[test]
    fn test_load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{").unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse catalog"));
    }
}
