// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! PNG export of the rendered design.

use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// Write RGBA8 pixels as a PNG file.
pub fn save_png(path: &Path, width: u32, height: u32, rgba: Vec<u8>) -> Result<()> {
    let img = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| anyhow!("Pixel buffer does not match {}x{}", width, height))?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Exported {}x{} image to {}", width, height, path.display());
    Ok(())
}

/// Suggested file name for an exported design.
pub fn export_file_name(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "ship.png".to_string()
    } else {
        format!("{}.png", stem)
    }
}
