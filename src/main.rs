// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dockyard - ship interior layout editor
//!
//! A cross-platform desktop application for laying out a starship on a
//! block grid: paint the hull, place weapons, engines and shields, add
//! doors and an outline, and export a record sheet with the armament table
//! and total point cost.

mod app;
mod config;
mod editor;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::DockyardApp;
use config::EditorConfig;
use io::storage::{DesignStore, FileDesignStore, MemoryDesignStore};
use models::catalog::Catalog;

fn main() -> Result<()> {
    // Initialize logging, `info` unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EditorConfig::load().unwrap_or_else(|e| {
        log::error!("{:#}; using default settings", e);
        EditorConfig::default()
    });

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path).or_else(|e| {
            log::error!("{:#}; falling back to the built-in catalog", e);
            Catalog::builtin()
        })?,
        None => Catalog::builtin()?,
    };
    log::info!("Catalog has {} elements", catalog.len());

    let store: Option<Box<dyn DesignStore>> = if config.autosave {
        match FileDesignStore::in_data_dir() {
            Some(store) => {
                log::info!("Autosave file: {}", store.path().display());
                Some(Box::new(store))
            }
            None => {
                log::warn!("No data directory available, autosave lasts for this session only");
                Some(Box::new(MemoryDesignStore::default()))
            }
        }
    } else {
        None
    };

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Dockyard - Ship Layout Editor"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Dockyard",
        options,
        Box::new(|_cc| Ok(Box::new(DockyardApp::new(config, catalog, store)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
