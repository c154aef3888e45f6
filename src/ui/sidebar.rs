// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ship details and element catalog panel.
//!
//! Shows the ship title and total cost, and lists the catalog grouped by
//! category. Catalog entries are drag sources; dropping one on the canvas
//! places it.

use crate::editor::EditorCore;
use crate::models::catalog::Catalog;
use crate::models::element::ShipElement;
use egui::TextureHandle;
use std::collections::HashMap;

const THUMBNAIL_HEIGHT: f32 = 32.0;

/// Display the sidebar.
pub fn show(
    ui: &mut egui::Ui,
    editor: &mut EditorCore,
    catalog: &Catalog,
    textures: &HashMap<String, TextureHandle>,
) {
    ui.heading("Ship");
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.label("Title:");
        let mut title = editor.design().title.clone();
        if ui.text_edit_singleline(&mut title).changed() {
            editor.set_title(title);
        }
    });

    ui.label(
        egui::RichText::new(format!("Total cost: {}", editor.total_cost()))
            .strong()
            .size(16.0),
    );
    ui.label(format!(
        "{} elements, {} hull tiles",
        editor.design().elements.len(),
        editor.design().hull.tile_count()
    ));

    ui.separator();
    ui.heading("Elements");
    ui.label(egui::RichText::new("Drag onto the grid to place").weak());
    ui.add_space(4.0);

    if catalog.is_empty() {
        ui.label(egui::RichText::new("The element catalog is empty").italics());
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (category, indices) in catalog.grouped() {
            egui::CollapsingHeader::new(category.label())
                .default_open(true)
                .show(ui, |ui| {
                    for index in indices {
                        let Some(element) = catalog.get(index) else {
                            continue;
                        };
                        let id = egui::Id::new(("catalog_element", index));
                        let response = ui
                            .dnd_drag_source(id, index, |ui| element_row(ui, element, textures))
                            .response;
                        response.on_hover_ui(|ui| element_tooltip(ui, element));
                    }
                });
        }
    });
}

fn element_row(ui: &mut egui::Ui, element: &ShipElement, textures: &HashMap<String, TextureHandle>) {
    ui.horizontal(|ui| {
        let texture = element
            .image_file_name
            .as_ref()
            .and_then(|name| textures.get(name));
        if let Some(texture) = texture {
            let [w, h] = texture.size();
            let aspect = w as f32 / h.max(1) as f32;
            ui.add(
                egui::Image::new(texture)
                    .fit_to_exact_size(egui::vec2(THUMBNAIL_HEIGHT * aspect, THUMBNAIL_HEIGHT)),
            );
        }
        ui.label(&element.name);
        if element.is_weapon() {
            ui.label("⚔");
        }
        ui.label(egui::RichText::new(format!("{} pts", element.tactical_value)).weak());
    });
}

fn element_tooltip(ui: &mut egui::Ui, element: &ShipElement) {
    ui.label(egui::RichText::new(&element.name).strong());
    ui.label(format!("Cost: {}", element.tactical_value));
    if let Some(weapon) = &element.weapon {
        let mut stats = format!(
            "Damage {}, accuracy {}, range {}",
            weapon.damage, weapon.accuracy, weapon.range
        );
        if let Some(ammo) = weapon.ammo {
            stats.push_str(&format!(", ammo {}", ammo));
        }
        ui.label(stats);
    }
    if let Some(engine) = &element.engine {
        ui.label(format!("Thrust {}", engine.thrust));
    }
    if let Some(shield) = &element.shield {
        ui.label(format!("Capacitors {}", shield.capacitors));
    }
    for note in &element.notes {
        ui.label(egui::RichText::new(note).italics());
    }
}
