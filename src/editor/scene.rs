// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Declarative scene description.
//!
//! The canvas is drawn from a flat list of shapes in world coordinates,
//! rebuilt from the editor state every frame. Shapes are painted in list
//! order, so the list is the layer order.

use super::core::EditorCore;
use crate::models::design::{Design, Rotation};
use crate::util::geometry::{GridSpec, Point, Rect};
use uuid::Uuid;

/// Armament box width in world pixels.
pub const ARMAMENT_WIDTH: f64 = 800.0;
/// Height of the title line above the table.
pub const ARMAMENT_TITLE_HEIGHT: f64 = 100.0;
const ARMAMENT_TABLE_HEIGHT: f64 = 400.0;
const ARMAMENT_FOOTER_HEIGHT: f64 = 200.0;
const ARMAMENT_TEXT_PADDING: f64 = 15.0;
const ARMAMENT_ROW_SPACING: f64 = 50.0;
const ARMAMENT_FIRST_ROW: f64 = 175.0;
/// Left edge of the DMG and ACC columns.
const DAMAGE_COLUMN_X: f64 = 500.0;
const ACCURACY_COLUMN_X: f64 = 650.0;

const PEN_POINT_RADIUS: f64 = 25.0;
const PEN_POINT_STROKE: f64 = 5.0;

/// Area covered by the armament box at `origin`.
pub fn armament_bounds(origin: Point) -> Rect {
    Rect::from_origin(
        origin,
        ARMAMENT_WIDTH,
        ARMAMENT_TITLE_HEIGHT + ARMAMENT_TABLE_HEIGHT + ARMAMENT_FOOTER_HEIGHT,
    )
}

/// Renderer-independent colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const GRID_LINE: Rgba = Rgba::rgb(0xD3, 0xD3, 0xD3);
    pub const FILL_GRAY: Rgba = Rgba::rgb(0xCD, 0xCD, 0xCD);
    pub const HULL: Rgba = Rgba::rgb(0x80, 0x80, 0x80);
    pub const SHADOW: Rgba = Rgba::new(0xCD, 0xCD, 0xCD, 160);
    pub const SELECTION: Rgba = Rgba::rgb(0x1E, 0x90, 0xFF);
    pub const PLACEHOLDER: Rgba = Rgba::rgb(0xB0, 0xC4, 0xDE);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// Outline of a filled shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Rgba,
}

impl Stroke {
    pub fn new(width: f64, color: Rgba) -> Self {
        Self { width, color }
    }
}

/// One drawable item in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        rect: Rect,
        fill: Option<Rgba>,
        stroke: Option<Stroke>,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Option<Rgba>,
        stroke: Option<Stroke>,
    },
    /// Closed polygon.
    Polygon {
        points: Vec<Point>,
        fill: Option<Rgba>,
        stroke: Option<Stroke>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    /// Element artwork drawn into `rect` (already rotated). Renderers that
    /// have no texture for `image` draw a placeholder labelled `label`.
    Image {
        element: Uuid,
        image: String,
        rect: Rect,
        rotation: Rotation,
        label: String,
    },
    /// Text anchored at its top-left corner.
    Text {
        pos: Point,
        text: String,
        size: f64,
        bold: bool,
        color: Rgba,
    },
}

/// What to include besides the design itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneOptions {
    pub show_grid: bool,
    /// Selection, shadows and pen point handles.
    pub show_overlays: bool,
}

impl SceneOptions {
    /// The editing view.
    pub fn editing(show_grid: bool) -> Self {
        Self {
            show_grid,
            show_overlays: true,
        }
    }

    /// Just the design, for image export.
    pub fn export() -> Self {
        Self {
            show_grid: false,
            show_overlays: false,
        }
    }
}

/// Build the shape list for the current editor state.
pub fn build_scene(editor: &EditorCore, options: SceneOptions) -> Vec<Shape> {
    let grid = editor.grid();
    let design = editor.design();
    let door = &editor.config().door;
    let mut shapes = Vec::new();

    shapes.push(Shape::Rect {
        rect: grid.bounds(),
        fill: Some(Rgba::WHITE),
        stroke: None,
    });

    if let Some(outline) = design.outline() {
        shapes.push(Shape::Polygon {
            points: outline.to_vec(),
            fill: Some(Rgba::FILL_GRAY),
            stroke: Some(Stroke::new(PEN_POINT_STROKE, Rgba::BLACK)),
        });
    }

    if options.show_grid {
        push_grid_lines(&mut shapes, grid);
    }

    for coord in design.hull.tiles() {
        shapes.push(Shape::Rect {
            rect: grid.cell_rect(coord),
            fill: Some(Rgba::HULL),
            stroke: Some(Stroke::new(4.0, Rgba::WHITE)),
        });
    }

    for placed_door in &design.doors {
        for leaf in grid.door_leaves(*placed_door, door.width, door.height) {
            shapes.push(door_leaf(leaf, Rgba::FILL_GRAY));
        }
    }

    for placed in &design.elements {
        let rect = placed.bounds(grid.block_size);
        match &placed.element.image_file_name {
            Some(image) => shapes.push(Shape::Image {
                element: placed.id,
                image: image.clone(),
                rect,
                rotation: placed.rotation,
                label: placed.element.name.clone(),
            }),
            None => push_placeholder(&mut shapes, rect, &placed.element.name),
        }
    }

    if options.show_overlays {
        for point in &design.pen_points {
            shapes.push(pen_point(*point, None));
        }

        if let Some(shadow) = editor.door_shadow() {
            for leaf in grid.door_leaves(shadow, door.width, door.height) {
                shapes.push(door_leaf(leaf, Rgba::SHADOW));
            }
        }
        if let Some(shadow) = editor.pen_shadow() {
            shapes.push(pen_point(shadow, Some(Rgba::SHADOW)));
        }

        if let Some(placed) = editor.selected().and_then(|id| design.element(id)) {
            shapes.push(Shape::Rect {
                rect: placed.bounds(grid.block_size),
                fill: None,
                stroke: Some(Stroke::new(12.0, Rgba::SELECTION)),
            });
        }
    }

    push_armament_box(&mut shapes, design, editor.total_cost());
    shapes
}

fn push_grid_lines(shapes: &mut Vec<Shape>, grid: &GridSpec) {
    let stroke = Stroke::new(1.0, Rgba::GRID_LINE);
    let (width, height) = (grid.width_px(), grid.height_px());
    for column in 0..=grid.width {
        let x = f64::from(column) * grid.block_size;
        shapes.push(Shape::Line {
            from: Point::new(x, 0.0),
            to: Point::new(x, height),
            stroke,
        });
    }
    for row in 0..=grid.height {
        let y = f64::from(row) * grid.block_size;
        shapes.push(Shape::Line {
            from: Point::new(0.0, y),
            to: Point::new(width, y),
            stroke,
        });
    }
}

fn door_leaf(rect: Rect, fill: Rgba) -> Shape {
    Shape::Rect {
        rect,
        fill: Some(fill),
        stroke: Some(Stroke::new(6.0, Rgba::WHITE)),
    }
}

fn pen_point(center: Point, fill: Option<Rgba>) -> Shape {
    Shape::Circle {
        center,
        radius: PEN_POINT_RADIUS,
        fill,
        stroke: Some(Stroke::new(PEN_POINT_STROKE, Rgba::BLACK)),
    }
}

/// Labelled box for elements without artwork.
pub fn push_placeholder(shapes: &mut Vec<Shape>, rect: Rect, label: &str) {
    shapes.push(Shape::Rect {
        rect,
        fill: Some(Rgba::PLACEHOLDER),
        stroke: Some(Stroke::new(4.0, Rgba::BLACK)),
    });
    shapes.push(Shape::Text {
        pos: Point::new(rect.x + ARMAMENT_TEXT_PADDING, rect.y + ARMAMENT_TEXT_PADDING),
        text: label.to_string(),
        size: 40.0,
        bold: false,
        color: Rgba::BLACK,
    });
}

/// Title, weapon table and cost footer.
fn push_armament_box(shapes: &mut Vec<Shape>, design: &Design, total_cost: u32) {
    let origin = design.armament_origin;
    let at = |x: f64, y: f64| Point::new(origin.x + x, origin.y + y);
    let table_y = ARMAMENT_TITLE_HEIGHT;
    let footer_y = table_y + ARMAMENT_TABLE_HEIGHT;

    let cell = |x: f64, y: f64, width: f64, height: f64| Shape::Rect {
        rect: Rect::from_origin(at(x, y), width, height),
        fill: Some(Rgba::WHITE),
        stroke: Some(Stroke::new(2.0, Rgba::BLACK)),
    };
    shapes.push(cell(0.0, table_y, DAMAGE_COLUMN_X, ARMAMENT_TABLE_HEIGHT));
    shapes.push(cell(
        DAMAGE_COLUMN_X,
        table_y,
        ACCURACY_COLUMN_X - DAMAGE_COLUMN_X,
        ARMAMENT_TABLE_HEIGHT,
    ));
    shapes.push(cell(
        ACCURACY_COLUMN_X,
        table_y,
        ARMAMENT_WIDTH - ACCURACY_COLUMN_X,
        ARMAMENT_TABLE_HEIGHT,
    ));
    shapes.push(cell(0.0, footer_y, ARMAMENT_WIDTH, ARMAMENT_FOOTER_HEIGHT));

    let text = |pos: Point, text: String, size: f64, bold: bool| Shape::Text {
        pos,
        text,
        size,
        bold,
        color: Rgba::BLACK,
    };

    shapes.push(text(at(0.0, 0.0), design.title.clone(), 100.0, true));

    let header_y = table_y + ARMAMENT_TEXT_PADDING;
    for (x, header) in [
        (0.0, "WEAPON"),
        (DAMAGE_COLUMN_X, "DMG"),
        (ACCURACY_COLUMN_X, "ACC"),
    ] {
        shapes.push(text(
            at(x + ARMAMENT_TEXT_PADDING, header_y),
            header.to_string(),
            50.0,
            true,
        ));
    }

    for (index, weapon) in design.weapon_details().into_iter().enumerate() {
        let y = ARMAMENT_FIRST_ROW + index as f64 * ARMAMENT_ROW_SPACING;
        shapes.push(text(at(ARMAMENT_TEXT_PADDING, y), weapon.name, 40.0, false));
        shapes.push(text(
            at(DAMAGE_COLUMN_X + ARMAMENT_TEXT_PADDING + 10.0, y),
            weapon.damage.to_string(),
            40.0,
            false,
        ));
        shapes.push(text(
            at(ACCURACY_COLUMN_X + ARMAMENT_TEXT_PADDING + 10.0, y),
            weapon.accuracy.to_string(),
            40.0,
            false,
        ));
    }

    shapes.push(text(
        at(ARMAMENT_TEXT_PADDING, footer_y + ARMAMENT_TEXT_PADDING),
        format!("TOTAL COST: {}", total_cost),
        50.0,
        true,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::editor::tool::{PointerButton, Tool};
    use crate::models::element::{ElementCategory, ShipElement, WeaponStats};

    fn editor() -> EditorCore {
        let mut config = EditorConfig::default();
        config.view.initial_scale = 1.0;
        EditorCore::new(config)
    }

    fn texts(shapes: &[Shape]) -> Vec<&str> {
        shapes
            .iter()
            .filter_map(|shape| match shape {
                Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn line_count(shapes: &[Shape]) -> usize {
        shapes
            .iter()
            .filter(|shape| matches!(shape, Shape::Line { .. }))
            .count()
    }

    fn gun(name: &str, image: Option<&str>) -> ShipElement {
        let mut element = ShipElement::new(name, ElementCategory::GaussRifleControlRoom, 30);
        element.image_file_name = image.map(str::to_string);
        element.weapon = Some(WeaponStats {
            damage: 5,
            accuracy: 2,
            range: 30,
            ammo: None,
        });
        element
    }

    #[test]
    fn test_empty_design_layers() {
        let editor = editor();
        let shapes = build_scene(&editor, SceneOptions::editing(true));

        assert!(matches!(
            &shapes[0],
            Shape::Rect { fill: Some(Rgba::WHITE), .. }
        ));
        // 23 vertical and 12 horizontal lines on a 22x11 grid
        assert_eq!(line_count(&shapes), 35);
        assert_eq!(
            texts(&shapes),
            vec!["", "WEAPON", "DMG", "ACC", "TOTAL COST: 0"]
        );
    }

    #[test]
    fn test_export_hides_grid_and_overlays() {
        let mut editor = editor();
        editor.set_tool(Tool::Pen);
        editor.pointer_pressed(PointerButton::Primary, Point::new(10.0, 10.0));
        editor.pointer_released(Point::new(10.0, 10.0));
        editor.hover(Point::new(310.0, 10.0));

        let editing = build_scene(&editor, SceneOptions::editing(true));
        let export = build_scene(&editor, SceneOptions::export());

        let circles = |shapes: &[Shape]| {
            shapes
                .iter()
                .filter(|shape| matches!(shape, Shape::Circle { .. }))
                .count()
        };
        assert_eq!(circles(&editing), 2);
        assert_eq!(circles(&export), 0);
        assert_eq!(line_count(&export), 0);
    }

    #[test]
    fn test_doors_draw_two_leaves() {
        let mut editor = editor();
        editor.set_tool(Tool::Door);
        editor.pointer_pressed(PointerButton::Primary, Point::new(310.0, 150.0));
        editor.pointer_released(Point::new(310.0, 150.0));
        editor.hover_left();

        let shapes = build_scene(&editor, SceneOptions::export());
        let leaves: Vec<Rect> = shapes
            .iter()
            .filter_map(|shape| match shape {
                Shape::Rect {
                    rect,
                    fill: Some(Rgba::FILL_GRAY),
                    ..
                } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(
            leaves,
            vec![
                Rect::new(285.0, 50.0, 30.0, 100.0),
                Rect::new(285.0, 150.0, 30.0, 100.0)
            ]
        );
    }

    #[test]
    fn test_armament_rows_and_cost() {
        let mut editor = editor();
        editor.set_title("Lancer");
        editor
            .drop_element(gun("Gauss Rifle", Some("images/gauss.png")), Point::new(10.0, 10.0))
            .unwrap();
        editor
            .drop_element(gun("Gauss Rifle", Some("images/gauss.png")), Point::new(10.0, 610.0))
            .unwrap();

        let shapes = build_scene(&editor, SceneOptions::export());
        assert_eq!(
            texts(&shapes),
            vec!["Lancer", "WEAPON", "DMG", "ACC", "Gauss Rifle", "5", "2", "TOTAL COST: 60"]
        );

        let origin = editor.design().armament_origin;
        let row = shapes.iter().find_map(|shape| match shape {
            Shape::Text { text, pos, .. } if text == "Gauss Rifle" => Some(*pos),
            _ => None,
        });
        assert_eq!(row, Some(Point::new(origin.x + 15.0, origin.y + 175.0)));
    }

    #[test]
    fn test_elements_without_artwork_use_placeholder() {
        let mut editor = editor();
        let with_art = editor
            .drop_element(gun("Gauss Rifle", Some("images/gauss.png")), Point::new(10.0, 10.0))
            .unwrap();
        editor
            .drop_element(
                ShipElement::new("Hallway", ElementCategory::Hallway, 5),
                Point::new(910.0, 10.0),
            )
            .unwrap();

        let shapes = build_scene(&editor, SceneOptions::export());
        let images: Vec<Uuid> = shapes
            .iter()
            .filter_map(|shape| match shape {
                Shape::Image { element, .. } => Some(*element),
                _ => None,
            })
            .collect();
        assert_eq!(images, vec![with_art]);
        assert!(texts(&shapes).contains(&"Hallway"));
    }

    #[test]
    fn test_selection_outline() {
        let mut editor = editor();
        editor
            .drop_element(gun("Gauss Rifle", None), Point::new(10.0, 10.0))
            .unwrap();
        editor.pointer_pressed(PointerButton::Primary, Point::new(100.0, 100.0));
        editor.pointer_released(Point::new(100.0, 100.0));

        let shapes = build_scene(&editor, SceneOptions::editing(false));
        assert!(shapes.iter().any(|shape| matches!(
            shape,
            Shape::Rect {
                fill: None,
                stroke: Some(Stroke { color: Rgba::SELECTION, .. }),
                ..
            }
        )));
    }

    #[test]
    fn test_armament_bounds() {
        let bounds = armament_bounds(Point::new(0.0, 3600.0));
        assert_eq!(bounds, Rect::new(0.0, 3600.0, 800.0, 700.0));
    }
}
