// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the ship design.
//!
//! This module paints the scene built by the editor and routes pointer,
//! scroll, drag-and-drop and context menu input back into it.

use crate::editor::scene::{self, SceneOptions, Shape};
use crate::editor::tool::{PointerButton, Tool};
use crate::editor::viewport::ZoomDirection;
use crate::editor::EditorCore;
use crate::models::design::Rotation;
use crate::util::geometry::{self, Point};
use egui::epaint::Vertex;
use egui::{Color32, FontId, Mesh, Pos2, Rect, Sense, TextureHandle};
use std::collections::HashMap;
use uuid::Uuid;

/// Result of canvas interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasAction {
    None,
    /// A catalog entry was dropped at a canvas-local position.
    DropElement { index: usize, at: Point },
    Duplicate { id: Uuid, at: Point },
    Delete(Uuid),
    ClearDoors,
    ClearPenPoints,
}

/// Display the design canvas and handle mouse interactions.
///
/// Returns the action requested plus the screen rect the canvas occupies.
pub fn show(
    ui: &mut egui::Ui,
    editor: &mut EditorCore,
    textures: &HashMap<String, TextureHandle>,
    exporting: bool,
) -> (CanvasAction, Rect) {
    let mut action = CanvasAction::None;
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
    let rect = response.rect;
    let local = |pos: Pos2| Point::new(f64::from(pos.x - rect.min.x), f64::from(pos.y - rect.min.y));

    if !exporting {
        route_pointer(ui, editor, &response, local);

        if let Some(index) = response.dnd_release_payload::<usize>() {
            if let Some(pos) = ui.input(|i| i.pointer.latest_pos()) {
                action = CanvasAction::DropElement {
                    index: *index,
                    at: local(pos),
                };
            }
        }

        if response.secondary_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                editor.open_context_menu(local(pos));
            }
        }
    }

    // Paint
    painter.rect_filled(rect, 0.0, backdrop(exporting));
    let options = if exporting {
        SceneOptions::export()
    } else {
        SceneOptions::editing(editor.show_grid())
    };
    let shapes = scene::build_scene(editor, options);
    let view = ScreenTransform {
        origin: rect.min,
        offset: editor.viewport.offset,
        scale: editor.viewport.scale,
    };
    for shape in &shapes {
        paint_shape(&painter, shape, &view, textures);
    }

    if !exporting {
        let menu = response.context_menu(|ui| {
            if let Some(chosen) = context_menu_ui(ui, editor) {
                action = chosen;
                ui.close_menu();
            }
        });
        if menu.is_none() && editor.context_menu().is_some() {
            editor.close_context_menu();
        }
    }

    (action, rect)
}

/// Feed this frame's pointer input into the editor state machine.
fn route_pointer(
    ui: &egui::Ui,
    editor: &mut EditorCore,
    response: &egui::Response,
    local: impl Fn(Pos2) -> Point,
) {
    let buttons = [
        (egui::PointerButton::Primary, PointerButton::Primary),
        (egui::PointerButton::Middle, PointerButton::Middle),
    ];
    let (pressed, released, latest, delta, scroll) = ui.input(|i| {
        let pressed = buttons
            .iter()
            .find(|(button, _)| i.pointer.button_pressed(*button))
            .map(|(_, button)| *button);
        let released = buttons
            .iter()
            .any(|(button, _)| i.pointer.button_released(*button));
        (
            pressed,
            released,
            i.pointer.latest_pos(),
            i.pointer.delta(),
            i.raw_scroll_delta.y,
        )
    });

    // Presses only start on the canvas; moves and releases are followed anywhere.
    if let (Some(button), Some(pos)) = (pressed, latest) {
        if response.hovered() {
            editor.pointer_pressed(button, local(pos));
        }
    }
    if let Some(pos) = latest {
        if delta != egui::Vec2::ZERO && !editor.gesture().is_idle() {
            editor.pointer_moved(local(pos));
        }
        if released {
            editor.pointer_released(local(pos));
        }
    }

    if editor.gesture().is_idle() {
        match response.hover_pos() {
            Some(pos) => editor.hover(local(pos)),
            None => editor.hover_left(),
        }
    }

    if response.hovered() {
        // egui reports scrolling down as a negative delta
        if let (Some(direction), Some(pos)) = (ZoomDirection::from_scroll(-scroll), latest) {
            editor.zoom(local(pos), direction);
        }
    }
}

fn context_menu_ui(ui: &mut egui::Ui, editor: &EditorCore) -> Option<CanvasAction> {
    let Some(menu) = editor.context_menu() else {
        ui.close_menu();
        return None;
    };

    if let Some(id) = menu.target {
        if let Some(placed) = editor.design().element(id) {
            ui.label(egui::RichText::new(&placed.element.name).strong());
            ui.separator();
        }
        if ui.button("Duplicate").clicked() {
            return Some(CanvasAction::Duplicate { id, at: menu.world });
        }
        if ui.button("Delete").clicked() {
            return Some(CanvasAction::Delete(id));
        }
    }

    match editor.tool() {
        Tool::Door => {
            if ui.button("Clear doors").clicked() {
                return Some(CanvasAction::ClearDoors);
            }
        }
        Tool::Pen => {
            if ui.button("Clear pen points").clicked() {
                return Some(CanvasAction::ClearPenPoints);
            }
        }
        Tool::Select | Tool::Brush | Tool::Eraser => {}
    }
    None
}

/// Canvas fill behind the scene; exports print on white.
fn backdrop(exporting: bool) -> Color32 {
    if exporting {
        Color32::WHITE
    } else {
        Color32::from_gray(40)
    }
}

/// World to screen mapping for one frame.
struct ScreenTransform {
    origin: Pos2,
    offset: Point,
    scale: f64,
}

impl ScreenTransform {
    fn pos(&self, p: Point) -> Pos2 {
        Pos2::new(
            self.origin.x + (p.x * self.scale + self.offset.x) as f32,
            self.origin.y + (p.y * self.scale + self.offset.y) as f32,
        )
    }

    fn rect(&self, r: geometry::Rect) -> Rect {
        Rect::from_min_max(
            self.pos(r.origin()),
            self.pos(Point::new(r.right(), r.bottom())),
        )
    }

    fn len(&self, world: f64) -> f32 {
        (world * self.scale) as f32
    }
}

fn color(c: scene::Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn stroke(s: Option<scene::Stroke>, view: &ScreenTransform) -> egui::Stroke {
    match s {
        Some(s) => egui::Stroke::new(view.len(s.width).max(0.5), color(s.color)),
        None => egui::Stroke::NONE,
    }
}

fn paint_shape(
    painter: &egui::Painter,
    shape: &Shape,
    view: &ScreenTransform,
    textures: &HashMap<String, TextureHandle>,
) {
    match shape {
        Shape::Rect { rect, fill, stroke: s } => {
            let r = view.rect(*rect);
            if let Some(fill) = fill {
                painter.rect_filled(r, 0.0, color(*fill));
            }
            if s.is_some() {
                painter.rect_stroke(r, 0.0, stroke(*s, view));
            }
        }
        Shape::Circle {
            center,
            radius,
            fill,
            stroke: s,
        } => {
            let fill = fill.map(color).unwrap_or(Color32::TRANSPARENT);
            painter.circle(view.pos(*center), view.len(*radius), fill, stroke(*s, view));
        }
        Shape::Polygon {
            points,
            fill,
            stroke: s,
        } => {
            let screen: Vec<Pos2> = points.iter().map(|p| view.pos(*p)).collect();
            if let Some(fill) = fill {
                let mut mesh = Mesh::default();
                for pos in &screen {
                    mesh.colored_vertex(*pos, color(*fill));
                }
                for [a, b, c] in geometry::triangulate(points) {
                    mesh.add_triangle(a as u32, b as u32, c as u32);
                }
                painter.add(mesh);
            }
            painter.add(egui::epaint::PathShape::closed_line(screen, stroke(*s, view)));
        }
        Shape::Line { from, to, stroke: s } => {
            painter.line_segment([view.pos(*from), view.pos(*to)], stroke(Some(*s), view));
        }
        Shape::Image {
            image,
            rect,
            rotation,
            label,
            ..
        } => match textures.get(image) {
            Some(texture) => {
                painter.add(image_mesh(texture.id(), view.rect(*rect), *rotation));
            }
            None => {
                let mut fallback = Vec::new();
                scene::push_placeholder(&mut fallback, *rect, label);
                for shape in &fallback {
                    paint_shape(painter, shape, view, textures);
                }
            }
        },
        Shape::Text {
            pos,
            text,
            size,
            bold,
            color: c,
        } => {
            let at = view.pos(*pos);
            let font = FontId::proportional(view.len(*size).max(1.0));
            painter.text(at, egui::Align2::LEFT_TOP, text, font.clone(), color(*c));
            if *bold {
                // No bold face in the default fonts; overdraw slightly offset.
                let nudge = egui::vec2(view.len(2.0).max(0.5), 0.0);
                painter.text(at + nudge, egui::Align2::LEFT_TOP, text, font, color(*c));
            }
        }
    }
}

/// Texture coordinates for the top-left, top-right, bottom-right and
/// bottom-left screen corners of an image turned by `rotation`.
fn rotated_uvs(rotation: Rotation) -> [Pos2; 4] {
    let uv = [
        Pos2::new(0.0, 0.0),
        Pos2::new(1.0, 0.0),
        Pos2::new(1.0, 1.0),
        Pos2::new(0.0, 1.0),
    ];
    let quarters = usize::from(rotation.degrees() / 90);
    std::array::from_fn(|corner| uv[(corner + 4 - quarters) % 4])
}

fn image_mesh(texture: egui::TextureId, rect: Rect, rotation: Rotation) -> Mesh {
    let mut mesh = Mesh::with_texture(texture);
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    for (pos, uv) in corners.into_iter().zip(rotated_uvs(rotation)) {
        mesh.vertices.push(Vertex {
            pos,
            uv,
            color: Color32::WHITE,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrotated_uvs() {
        let uvs = rotated_uvs(Rotation::Deg0);
        assert_eq!(uvs[0], Pos2::new(0.0, 0.0));
        assert_eq!(uvs[2], Pos2::new(1.0, 1.0));
    }

    #[test]
    fn test_quarter_turn_moves_top_left_to_top_right() {
        let uvs = rotated_uvs(Rotation::Deg90);
        // Image top-left now shows in the screen top-right corner.
        assert_eq!(uvs[1], Pos2::new(0.0, 0.0));
        assert_eq!(uvs[0], Pos2::new(0.0, 1.0));

        let half = rotated_uvs(Rotation::Deg180);
        assert_eq!(half[0], Pos2::new(1.0, 1.0));
    }

    #[test]
    fn test_export_backdrop_is_white() {
        assert_eq!(backdrop(true), Color32::WHITE);
        assert_ne!(backdrop(false), Color32::WHITE);
    }

    #[test]
    fn test_screen_transform() {
        let view = ScreenTransform {
            origin: Pos2::new(10.0, 20.0),
            offset: Point::new(5.0, 5.0),
            scale: 0.5,
        };
        assert_eq!(view.pos(Point::new(100.0, 40.0)), Pos2::new(65.0, 45.0));
        assert_eq!(view.len(300.0), 150.0);
    }
}
