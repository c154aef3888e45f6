// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tool selection UI.
//!
//! This module provides the toolbar interface for selecting editing tools,
//! toggling the grid and the common undo, redo, export and clear actions.

use crate::editor::tool::Tool;
use crate::editor::EditorCore;

/// Actions the app handles itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    Export,
    Clear,
}

/// Display the toolbar with tool selection buttons.
pub fn show(ui: &mut egui::Ui, editor: &mut EditorCore) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");

        ui.separator();

        for tool in Tool::ALL {
            let mut button = ui.selectable_label(editor.tool() == tool, tool.label());
            if let Some(shortcut) = tool.shortcut() {
                button = button.on_hover_text(shortcut);
            }
            if button.clicked() {
                editor.set_tool(tool);
            }
        }

        ui.separator();

        let mut show_grid = editor.show_grid();
        if ui.checkbox(&mut show_grid, "Grid").changed() {
            editor.set_show_grid(show_grid);
        }

        ui.separator();

        if ui
            .add_enabled(editor.can_undo(), egui::Button::new("⟲ Undo"))
            .on_hover_text("Ctrl+Z")
            .clicked()
        {
            editor.undo();
        }
        if ui
            .add_enabled(editor.can_redo(), egui::Button::new("⟳ Redo"))
            .on_hover_text("Ctrl+Y")
            .clicked()
        {
            editor.redo();
        }

        ui.separator();

        if ui.button("🖼 Export").clicked() {
            action = ToolbarAction::Export;
        }
        if ui.button("🗑 Clear").clicked() {
            action = ToolbarAction::Clear;
        }

        ui.separator();

        // Tool description
        ui.label(egui::RichText::new(editor.tool().hint()).italics().weak());
    });

    action
}
