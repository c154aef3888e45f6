// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Element artwork loading.
//!
//! Images are decoded to RGBA8 off the UI thread; the app turns finished
//! results into textures as they arrive.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};

/// A decoded RGBA8 image.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl LoadedImage {
    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }
}

/// Decode an image file to RGBA8.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// Result of one background load, keyed by the image's catalog name.
pub type ImageLoadResult = (String, Result<LoadedImage, String>);

/// Decode a batch of images on a background thread.
///
/// Results arrive on the returned channel one by one; the channel closes
/// once every job has been sent.
pub fn spawn_loader(jobs: Vec<(String, PathBuf)>) -> Receiver<ImageLoadResult> {
    let (sender, receiver) = channel();

    std::thread::spawn(move || {
        for (key, path) in jobs {
            let result = load_image(&path).map_err(|e| format!("{:#}", e));
            // The receiver logs failures.
            if let Ok(img) = &result {
                log::debug!("Loaded {} ({}x{})", path.display(), img.width, img.height);
            }
            if sender.send((key, result)).is_err() {
                // Receiver dropped, nobody is waiting any more
                break;
            }
        }
    });

    receiver
}
