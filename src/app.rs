// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait, managing the overall application state and
//! coordinating between the UI panels, the editor core and file I/O.

use crate::config::EditorConfig;
use crate::editor::tool::Tool;
use crate::editor::viewport::Viewport;
use crate::editor::EditorCore;
use crate::io::media::{self, ImageLoadResult};
use crate::io::storage::DesignStore;
use crate::io::{export, serialization};
use crate::models::catalog::Catalog;
use crate::ui::{canvas, sidebar, toolbar};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

/// Progress of a PNG export.
enum ExportState {
    /// The export scene is drawn this frame and a screenshot requested.
    Framing { path: PathBuf, saved_view: Viewport },
    /// Waiting for the screenshot event.
    Capturing { path: PathBuf, saved_view: Viewport },
}

/// Main application state.
pub struct DockyardApp {
    editor: EditorCore,
    catalog: Catalog,

    /// Autosave target, if autosave is on
    store: Option<Box<dyn DesignStore>>,

    /// Element artwork keyed by catalog image name
    textures: HashMap<String, egui::TextureHandle>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<ImageLoadResult>>,

    export: Option<ExportState>,

    /// Screen rect of the canvas last frame
    canvas_rect: egui::Rect,

    /// Status bar message
    status: Option<String>,
}

impl DockyardApp {
    /// Create the application, restoring the autosaved design if there is one.
    pub fn new(
        config: EditorConfig,
        catalog: Catalog,
        store: Option<Box<dyn DesignStore>>,
    ) -> Self {
        let mut status = None;
        let restored = store.as_ref().and_then(|store| match store.load() {
            Ok(design) => design,
            Err(e) => {
                log::error!("Failed to restore autosave: {:#}", e);
                status = Some(format!("Could not restore last design: {}", e));
                None
            }
        });

        let editor = match restored {
            Some(design) => match EditorCore::restore(config.clone(), design) {
                Ok(editor) => editor,
                Err(e) => {
                    log::warn!("Ignoring autosave: {}", e);
                    EditorCore::new(config)
                }
            },
            None => EditorCore::new(config),
        };

        let mut app = Self {
            editor,
            catalog,
            store,
            textures: HashMap::new(),
            image_loader: None,
            export: None,
            canvas_rect: egui::Rect::NOTHING,
            status,
        };
        app.load_artwork();
        app
    }

    /// Start decoding all element artwork in the background.
    fn load_artwork(&mut self) {
        let mut seen = HashSet::new();
        let placed = self
            .editor
            .design()
            .elements
            .iter()
            .map(|placed| &placed.element);
        let jobs: Vec<(String, PathBuf)> = self
            .catalog
            .elements()
            .iter()
            .chain(placed)
            .filter_map(|element| {
                let name = element.image_file_name.clone()?;
                if self.textures.contains_key(&name) {
                    return None;
                }
                // Saved designs may name artwork by another path; match on the file name.
                let source = self.catalog.find_by_image(&name).unwrap_or(element);
                let path = self.catalog.image_path(source)?;
                seen.insert(name.clone()).then_some((name, path))
            })
            .collect();

        if jobs.is_empty() {
            return;
        }
        log::info!("Loading {} element images", jobs.len());
        self.image_loader = Some(media::spawn_loader(jobs));
    }

    /// Turn finished background loads into textures.
    fn poll_artwork(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.image_loader else {
            return;
        };

        let mut finished = false;
        loop {
            match receiver.try_recv() {
                Ok((name, Ok(img))) => {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(img.size(), &img.pixels);
                    let texture = ctx.load_texture(&name, color_image, egui::TextureOptions::LINEAR);
                    self.textures.insert(name, texture);
                }
                Ok((name, Err(e))) => {
                    log::warn!("No artwork for {}: {}", name, e);
                }
                Err(std::sync::mpsc::TryRecvError::Empty) => break,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    finished = true;
                    break;
                }
            }
        }

        if finished {
            log::info!("Loaded {} element images", self.textures.len());
            self.image_loader = None;
        } else {
            ctx.request_repaint();
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Write the design to the autosave store.
    fn autosave(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        match store.save(self.editor.design()) {
            Ok(()) => {
                self.editor.mark_saved();
                self.set_status("Design saved");
            }
            Err(e) => {
                log::error!("Autosave failed: {:#}", e);
                self.set_status(format!("Autosave failed: {}", e));
            }
        }
    }

    fn save_design_as(&mut self) {
        let name = export::export_file_name(&self.editor.design().title).replace(".png", ".json");
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .add_filter("YAML", &["yaml", "yml"])
            .set_file_name(name)
            .save_file()
        else {
            return;
        };

        match serialization::save_design(self.editor.design(), &path) {
            Ok(()) => self.set_status(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("Failed to save design: {:#}", e);
                self.set_status(format!("Save failed: {}", e));
            }
        }
    }

    fn open_design(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Designs", &["json", "yaml", "yml"])
            .pick_file()
        else {
            return;
        };

        let result = serialization::open_design(&path)
            .and_then(|design| self.editor.load_design(design).map_err(anyhow::Error::from));
        match result {
            Ok(()) => {
                self.set_status(format!("Opened {}", path.display()));
                self.load_artwork();
            }
            Err(e) => {
                log::error!("Failed to open design: {:#}", e);
                self.set_status(format!("Open failed: {}", e));
            }
        }
    }

    fn confirm_clear(&mut self) {
        let answer = rfd::MessageDialog::new()
            .set_title("Clear design")
            .set_description("Remove all hull tiles, elements, doors and outline points?")
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        if answer == rfd::MessageDialogResult::Yes {
            self.editor.clear();
            self.set_status("Design cleared");
        }
    }

    fn start_export(&mut self) {
        if self.export.is_some() {
            return;
        }
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name(export::export_file_name(&self.editor.design().title))
            .save_file()
        else {
            return;
        };

        let saved_view = self.editor.viewport;
        self.editor.frame_for_export(
            f64::from(self.canvas_rect.width()),
            f64::from(self.canvas_rect.height()),
        );
        self.export = Some(ExportState::Framing { path, saved_view });
    }

    /// Advance the export after the canvas has been drawn this frame.
    fn drive_export(&mut self, ctx: &egui::Context) {
        match self.export.take() {
            Some(ExportState::Framing { path, saved_view }) => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot);
                self.export = Some(ExportState::Capturing { path, saved_view });
                ctx.request_repaint();
            }
            Some(ExportState::Capturing { path, saved_view }) => {
                let screenshot = ctx.input(|i| {
                    i.events.iter().find_map(|event| match event {
                        egui::Event::Screenshot { image, .. } => Some(image.clone()),
                        _ => None,
                    })
                });
                let Some(screenshot) = screenshot else {
                    self.export = Some(ExportState::Capturing { path, saved_view });
                    ctx.request_repaint();
                    return;
                };

                let region = screenshot.region(&self.canvas_rect, Some(ctx.pixels_per_point()));
                let [width, height] = region.size;
                let pixels = region
                    .pixels
                    .iter()
                    .flat_map(|c| c.to_srgba_unmultiplied())
                    .collect();
                match export::save_png(&path, width as u32, height as u32, pixels) {
                    Ok(()) => self.set_status(format!("Exported {}", path.display())),
                    Err(e) => {
                        log::error!("Export failed: {:#}", e);
                        self.set_status(format!("Export failed: {}", e));
                    }
                }
                self.editor.viewport = saved_view;
            }
            None => {}
        }
    }

    fn handle_canvas_action(&mut self, action: canvas::CanvasAction) {
        let result = match action {
            canvas::CanvasAction::DropElement { index, at } => match self.catalog.get(index) {
                Some(element) => self.editor.drop_element(element.clone(), at).map(|_| ()),
                None => Ok(()),
            },
            canvas::CanvasAction::Duplicate { id, at } => self.editor.duplicate(id, at).map(|_| ()),
            canvas::CanvasAction::Delete(id) => self.editor.delete(id),
            canvas::CanvasAction::ClearDoors => {
                self.editor.clear_doors();
                Ok(())
            }
            canvas::CanvasAction::ClearPenPoints => {
                self.editor.clear_pen_points();
                Ok(())
            }
            canvas::CanvasAction::None => Ok(()),
        };

        if let Err(e) = result {
            log::warn!("{}", e);
            self.set_status(e.to_string());
        }
    }

    /// Handle keyboard shortcuts.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Only process if no text field is focused (to avoid editing the title)
        if ctx.wants_keyboard_input() {
            return;
        }

        let tool_keys = [
            (egui::Key::G, Tool::Select),
            (egui::Key::B, Tool::Brush),
            (egui::Key::E, Tool::Eraser),
            (egui::Key::D, Tool::Door),
        ];
        for (key, tool) in tool_keys {
            if ctx.input(|i| i.modifiers.command && i.key_pressed(key)) {
                self.editor.set_tool(tool);
            }
        }

        // Handle undo (Ctrl+Z)
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift) {
            self.editor.undo();
        }

        // Handle redo (Ctrl+Shift+Z or Ctrl+Y)
        if ctx.input(|i| {
            (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        }) {
            self.editor.redo();
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace))
            && self.editor.selected().is_some()
        {
            if let Err(e) = self.editor.delete_selected() {
                self.set_status(e.to_string());
            }
        }

        if ctx.input(|i| i.key_pressed(egui::Key::R) && !i.modifiers.command) {
            let clockwise = !ctx.input(|i| i.modifiers.shift);
            if let Err(e) = self.editor.rotate_selected(clockwise) {
                self.set_status(e.to_string());
            }
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.editor.deselect();
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Design...").clicked() {
                        ui.close_menu();
                        self.open_design();
                    }
                    if ui.button("Save Design As...").clicked() {
                        ui.close_menu();
                        self.save_design_as();
                    }
                    if ui
                        .add_enabled(self.store.is_some(), egui::Button::new("Save Session"))
                        .clicked()
                    {
                        ui.close_menu();
                        self.autosave();
                    }
                    ui.separator();
                    if ui.button("Export PNG...").clicked() {
                        ui.close_menu();
                        self.start_export();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    if ui
                        .add_enabled(self.editor.can_undo(), egui::Button::new("Undo (Ctrl+Z)"))
                        .clicked()
                    {
                        self.editor.undo();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(self.editor.can_redo(), egui::Button::new("Redo (Ctrl+Y)"))
                        .clicked()
                    {
                        self.editor.redo();
                        ui.close_menu();
                    }

                    ui.separator();

                    let has_selection = self.editor.selected().is_some();
                    if ui
                        .add_enabled(has_selection, egui::Button::new("Rotate Selected (R)"))
                        .clicked()
                    {
                        if let Err(e) = self.editor.rotate_selected(true) {
                            self.set_status(e.to_string());
                        }
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(has_selection, egui::Button::new("Delete Selected"))
                        .clicked()
                    {
                        if let Err(e) = self.editor.delete_selected() {
                            self.set_status(e.to_string());
                        }
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    let mut show_grid = self.editor.show_grid();
                    if ui.checkbox(&mut show_grid, "Show Grid").changed() {
                        self.editor.set_show_grid(show_grid);
                    }
                    if ui.button("Reset Zoom").clicked() {
                        self.editor.reset_view();
                        ui.close_menu();
                    }
                });
            });
        });
    }
}

impl eframe::App for DockyardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_artwork(ctx);

        if ctx.input(|i| i.viewport().close_requested()) {
            self.autosave();
        }

        self.menu_bar(ctx);

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, &mut self.editor))
            .inner;
        match toolbar_action {
            toolbar::ToolbarAction::Export => self.start_export(),
            toolbar::ToolbarAction::Clear => self.confirm_clear(),
            toolbar::ToolbarAction::None => {}
        }

        // Ship details and catalog (left side)
        egui::SidePanel::left("sidebar")
            .default_width(260.0)
            .show(ctx, |ui| {
                sidebar::show(ui, &mut self.editor, &self.catalog, &self.textures)
            });

        // Panels stay put during an export so the canvas keeps its size.
        let exporting = self.export.is_some();
        if !exporting {
            self.handle_shortcuts(ctx);
        }

        if let Some(warning) = self.editor.take_warning() {
            self.status = Some(warning);
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Tool: {}", self.editor.tool().label()));
                ui.separator();
                ui.label(format!("Zoom: {:.0}%", self.editor.viewport.scale * 100.0));
                if self.editor.is_dirty() {
                    ui.separator();
                    ui.label(egui::RichText::new("unsaved").weak());
                }
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status);
                }
                if self.image_loader.is_some() {
                    ui.spinner();
                }
            });
        });

        // Main canvas (center)
        let (canvas_action, canvas_rect) = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| canvas::show(ui, &mut self.editor, &self.textures, exporting))
            .inner;
        self.canvas_rect = canvas_rect;
        self.handle_canvas_action(canvas_action);

        self.drive_export(ctx);
    }
}
