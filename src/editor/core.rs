// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor state and operations.
//!
//! `EditorCore` owns the design and everything about how the user is
//! editing it: the selected tool, the gesture in progress, selection,
//! placement shadows, the view and undo history. It knows nothing about
//! egui; the canvas feeds it canvas-local pointer positions.

use super::history::History;
use super::scene;
use super::tool::{Gesture, Grab, PointerButton, PointerEvent, Tool, Transition};
use super::viewport::{Viewport, ZoomDirection};
use crate::config::EditorConfig;
use crate::models::design::{Design, DesignError, PlacedElement, Rotation};
use crate::models::door::Door;
use crate::models::element::ShipElement;
use crate::util::geometry::{GridSpec, Point, Rect};
use uuid::Uuid;

/// Grid blocks between a duplicated element and the click that made it.
const DUPLICATE_OFFSET_BLOCKS: f64 = 2.0;

/// Rejected edits.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EditError {
    #[error("position ({x:.0}, {y:.0}) is outside the grid")]
    OutOfBounds { x: f64, y: f64 },
    #[error("{0} does not fit inside the grid there")]
    DoesNotFit(String),
    #[error("{0} would overlap another element")]
    Overlaps(String),
    #[error("no placed element with id {0}")]
    UnknownElement(Uuid),
    #[error("nothing is selected")]
    NothingSelected,
    #[error("design grid is {found_w}x{found_h} but the editor grid is {expected_w}x{expected_h}")]
    GridMismatch {
        expected_w: u32,
        expected_h: u32,
        found_w: u32,
        found_h: u32,
    },
    #[error("invalid design: {0}")]
    InvalidDesign(#[from] DesignError),
}

/// Open right-click menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenu {
    /// Element under the click, if any.
    pub target: Option<Uuid>,
    /// World position of the click.
    pub world: Point,
}

/// The renderer-independent editor.
pub struct EditorCore {
    config: EditorConfig,
    grid: GridSpec,
    design: Design,
    tool: Tool,
    gesture: Gesture,
    /// Design as it was when the current gesture began.
    gesture_origin: Option<Design>,
    last_screen: Option<Point>,
    selected: Option<Uuid>,
    door_shadow: Option<Door>,
    pen_shadow: Option<Point>,
    context_menu: Option<ContextMenu>,
    pub viewport: Viewport,
    show_grid: bool,
    history: History,
    dirty: bool,
    warning: Option<String>,
}

impl EditorCore {
    /// Create an editor with an empty design.
    pub fn new(config: EditorConfig) -> Self {
        let grid = config.grid_spec();
        let design = Design::new(&grid);
        Self::with_design(config, design)
    }

    /// Create an editor showing a saved design, if it was made for this grid.
    pub fn restore(config: EditorConfig, design: Design) -> Result<Self, EditError> {
        check_design(&config.grid_spec(), &design)?;
        Ok(Self::with_design(config, design))
    }

    fn with_design(config: EditorConfig, design: Design) -> Self {
        let grid = config.grid_spec();
        Self {
            viewport: Viewport::new(config.view.initial_scale),
            show_grid: config.view.show_grid,
            history: History::new(config.history_limit),
            grid,
            design,
            tool: Tool::default(),
            gesture: Gesture::Idle,
            gesture_origin: None,
            last_screen: None,
            selected: None,
            door_shadow: None,
            pen_shadow: None,
            context_menu: None,
            dirty: false,
            warning: None,
            config,
        }
    }

    // --- Queries ---

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn design(&self) -> &Design {
        &self.design
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn door_shadow(&self) -> Option<Door> {
        self.door_shadow
    }

    pub fn pen_shadow(&self) -> Option<Point> {
        self.pen_shadow
    }

    pub fn context_menu(&self) -> Option<ContextMenu> {
        self.context_menu
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn total_cost(&self) -> u32 {
        self.design.total_cost(self.config.hull_tile_cost)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Whether the design changed since the last save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// The last rejected gesture, for the status bar.
    pub fn take_warning(&mut self) -> Option<String> {
        self.warning.take()
    }

    /// Grid plus armament box, the area an export frames.
    pub fn content_bounds(&self) -> Rect {
        self.grid
            .bounds()
            .union(&scene::armament_bounds(self.design.armament_origin))
    }

    // --- Tool and view ---

    /// Switch tools, finishing any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        self.finish_gesture();
        self.tool = tool;
        self.door_shadow = None;
        self.pen_shadow = None;
        self.context_menu = None;
        log::info!("Tool changed to {:?}", tool);
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    /// Zoom one step around a canvas position.
    pub fn zoom(&mut self, screen: Point, direction: ZoomDirection) {
        self.viewport
            .zoom_at(screen, direction, self.config.view.zoom_step);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset(self.config.view.initial_scale);
    }

    /// Prepare for export: clear overlays and fit everything in the canvas.
    pub fn frame_for_export(&mut self, canvas_width: f64, canvas_height: f64) {
        self.finish_gesture();
        self.selected = None;
        self.door_shadow = None;
        self.pen_shadow = None;
        self.context_menu = None;
        let bounds = self.content_bounds();
        self.viewport.fit(&bounds, canvas_width, canvas_height, 8.0);
    }

    // --- Pointer input ---

    pub fn pointer_pressed(&mut self, button: PointerButton, screen: Point) {
        self.handle(PointerEvent::Press(button), screen);
    }

    pub fn pointer_moved(&mut self, screen: Point) {
        self.handle(PointerEvent::Move, screen);
    }

    pub fn pointer_released(&mut self, screen: Point) {
        self.handle(PointerEvent::Release, screen);
    }

    /// Pointer over the canvas with no button held: update placement shadows.
    pub fn hover(&mut self, screen: Point) {
        let world = self.viewport.screen_to_world(screen);
        match self.tool {
            Tool::Door => self.door_shadow = self.grid.door_at(world),
            Tool::Pen => self.pen_shadow = self.vertex_near(world),
            Tool::Select | Tool::Brush | Tool::Eraser => {}
        }
    }

    /// Pointer left the canvas.
    pub fn hover_left(&mut self) {
        self.door_shadow = None;
        self.pen_shadow = None;
    }

    fn handle(&mut self, event: PointerEvent, screen: Point) {
        match self.gesture.next(self.tool, event) {
            Transition::Enter(next) => {
                self.gesture = next;
                self.enter(screen);
            }
            Transition::Stay => {
                if event == PointerEvent::Move && !self.gesture.is_idle() {
                    self.update(screen);
                }
            }
            Transition::Exit => self.finish_gesture(),
        }
        self.last_screen = Some(screen);
    }

    fn enter(&mut self, screen: Point) {
        self.context_menu = None;
        let selecting = matches!(self.gesture, Gesture::Selecting { .. });
        if self.gesture.edits_design() && !selecting {
            self.gesture_origin = Some(self.design.clone());
        }

        let world = self.viewport.screen_to_world(screen);
        match self.gesture {
            Gesture::Painting => self.paint(world),
            Gesture::Erasing => self.erase(world),
            Gesture::PlacingDoor => {
                self.door_shadow = self.grid.door_at(world);
                self.place_door_at_shadow();
            }
            Gesture::PlacingPoint => {
                self.pen_shadow = self.vertex_near(world);
                self.add_pen_point_at_shadow();
            }
            Gesture::Selecting { .. } => {
                let grab = self.grab_at(world);
                // Raising the grabbed element alone is not an edit.
                self.gesture_origin = Some(self.design.clone());
                self.gesture = Gesture::Selecting { grab };
            }
            Gesture::Panning | Gesture::Idle => {}
        }
    }

    fn update(&mut self, screen: Point) {
        let world = self.viewport.screen_to_world(screen);
        let (dx, dy) = match self.last_screen {
            Some(last) => (screen.x - last.x, screen.y - last.y),
            None => (0.0, 0.0),
        };

        match self.gesture {
            Gesture::Painting => self.paint(world),
            Gesture::Erasing => self.erase(world),
            Gesture::PlacingDoor => {
                self.door_shadow = self.grid.door_at(world);
                self.place_door_at_shadow();
            }
            Gesture::PlacingPoint => self.pen_shadow = self.vertex_near(world),
            Gesture::Selecting { grab: Some(grab) } => {
                let dx = self.viewport.screen_dist_to_world(dx);
                let dy = self.viewport.screen_dist_to_world(dy);
                self.drag(grab, dx, dy);
            }
            Gesture::Panning => self.viewport.pan(dx, dy),
            Gesture::Selecting { grab: None } | Gesture::Idle => {}
        }
    }

    /// Run the exit handler of the current gesture and return to Idle.
    fn finish_gesture(&mut self) {
        if let Gesture::Selecting {
            grab: Some(Grab::Element { id, origin }),
        } = self.gesture
        {
            self.settle_element(id, origin);
        }

        self.gesture = Gesture::Idle;
        if let Some(before) = self.gesture_origin.take() {
            self.commit(before);
        }
    }

    // --- Gesture handlers ---

    fn paint(&mut self, world: Point) {
        if let Some(coord) = self.grid.to_grid_coords(world) {
            self.design.hull = self.design.hull.with_tile(coord);
        }
    }

    fn erase(&mut self, world: Point) {
        if let Some(coord) = self.grid.to_grid_coords(world) {
            self.design.hull = self.design.hull.without_tile(coord);
        }
    }

    fn place_door_at_shadow(&mut self) {
        if let Some(door) = self.door_shadow {
            if self.design.add_door(door) {
                log::debug!("Placed door {:?}", door);
            }
        }
    }

    fn add_pen_point_at_shadow(&mut self) {
        if let Some(point) = self.pen_shadow {
            self.design.pen_points.push(point);
            log::debug!(
                "Added outline point ({:.0}, {:.0}), total: {}",
                point.x,
                point.y,
                self.design.pen_points.len()
            );
        }
    }

    /// Nearest grid vertex, if it lies on the grid.
    fn vertex_near(&self, world: Point) -> Option<Point> {
        let vertex = self.grid.snap_round(world);
        self.grid.contains(vertex).then_some(vertex)
    }

    fn grab_at(&mut self, world: Point) -> Option<Grab> {
        if let Some(id) = self.design.element_at(world, self.grid.block_size) {
            self.design.bring_to_front(id);
            self.selected = Some(id);
            let origin = self.design.element(id).map(|placed| placed.position)?;
            return Some(Grab::Element { id, origin });
        }

        self.selected = None;
        if scene::armament_bounds(self.design.armament_origin).contains(world) {
            return Some(Grab::Armament);
        }
        None
    }

    fn drag(&mut self, grab: Grab, dx: f64, dy: f64) {
        match grab {
            Grab::Element { id, .. } => {
                let block = self.grid.block_size;
                let grid = self.grid;
                if let Some(placed) = self.design.element_mut(id) {
                    let moved = placed.position.translate(dx, dy);
                    let (w, h) = placed.size(block);
                    // Stop at the grid edge rather than leaving it.
                    if grid.contains_rect(&Rect::from_origin(moved, w, h)) {
                        placed.position = moved;
                    }
                }
            }
            Grab::Armament => {
                self.design.armament_origin = self.design.armament_origin.translate(dx, dy);
            }
        }
    }

    /// Snap a dragged element onto the grid, or put it back where it started.
    fn settle_element(&mut self, id: Uuid, origin: Point) {
        let block = self.grid.block_size;
        let Some(placed) = self.design.element(id) else {
            return;
        };
        let snapped = self.grid.snap_round(placed.position);
        let (w, h) = placed.size(block);
        let bounds = Rect::from_origin(snapped, w, h);
        let name = placed.element.name.clone();

        let target = if !self.grid.contains_rect(&bounds) {
            self.warn(EditError::DoesNotFit(name));
            origin
        } else if self.design.overlaps_other(id, &bounds, block) {
            self.warn(EditError::Overlaps(name));
            origin
        } else {
            snapped
        };

        let grid = self.grid;
        if let Some(placed) = self.design.element_mut(id) {
            placed.position = target;
            if let Some(coord) = grid.to_grid_coords(target) {
                placed.grid = coord;
            }
        }
    }

    fn warn(&mut self, err: EditError) {
        log::warn!("{}", err);
        self.warning = Some(err.to_string());
    }

    /// Record `before` as an undo step if the design changed since.
    fn commit(&mut self, before: Design) {
        if before != self.design {
            self.history.push(before);
            self.dirty = true;
        }
    }

    // --- Element operations ---

    /// Check that an element fits at `position` without overlapping others.
    fn check_placement(&self, placed: &PlacedElement) -> Result<(), EditError> {
        let bounds = placed.bounds(self.grid.block_size);
        if !self.grid.contains_rect(&bounds) {
            return Err(EditError::DoesNotFit(placed.element.name.clone()));
        }
        if self
            .design
            .overlaps_other(placed.id, &bounds, self.grid.block_size)
        {
            return Err(EditError::Overlaps(placed.element.name.clone()));
        }
        Ok(())
    }

    /// Place a catalog element dropped at a canvas position.
    pub fn drop_element(&mut self, element: ShipElement, screen: Point) -> Result<Uuid, EditError> {
        let world = self.viewport.screen_to_world(screen);
        self.place_element(element, world, Rotation::Deg0)
    }

    fn place_element(
        &mut self,
        element: ShipElement,
        world: Point,
        rotation: Rotation,
    ) -> Result<Uuid, EditError> {
        if !self.grid.contains(world) {
            return Err(EditError::OutOfBounds {
                x: world.x,
                y: world.y,
            });
        }
        let position = self.grid.snap_floor(world);
        let coord = self
            .grid
            .to_grid_coords(position)
            .ok_or(EditError::OutOfBounds {
                x: position.x,
                y: position.y,
            })?;
        let placed = PlacedElement::new(element, position, coord, rotation);
        self.check_placement(&placed)?;

        let id = placed.id;
        log::info!(
            "Placed {} ({}) at ({}, {}), total elements: {}",
            placed.element.name,
            placed.element.category,
            coord.x,
            coord.y,
            self.design.elements.len() + 1
        );
        let before = self.design.clone();
        self.design.elements.push(placed);
        self.commit(before);
        Ok(id)
    }

    /// Copy an element two blocks to the right of `world`, keeping its rotation.
    pub fn duplicate(&mut self, id: Uuid, world: Point) -> Result<Uuid, EditError> {
        let source = self
            .design
            .element(id)
            .ok_or(EditError::UnknownElement(id))?;
        let element = source.element.clone();
        let rotation = source.rotation;

        let at = self
            .grid
            .snap_floor(world)
            .translate(self.grid.block_size * DUPLICATE_OFFSET_BLOCKS, 0.0);
        self.context_menu = None;
        self.place_element(element, at, rotation)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<(), EditError> {
        let before = self.design.clone();
        let removed = self
            .design
            .remove_element(id)
            .ok_or(EditError::UnknownElement(id))?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.context_menu = None;
        log::info!(
            "Deleted {}, total elements: {}",
            removed.element.name,
            self.design.elements.len()
        );
        self.commit(before);
        Ok(())
    }

    pub fn delete_selected(&mut self) -> Result<(), EditError> {
        let id = self.selected.ok_or(EditError::NothingSelected)?;
        self.delete(id)
    }

    /// Turn the selected element a quarter turn in place.
    pub fn rotate_selected(&mut self, clockwise: bool) -> Result<(), EditError> {
        let id = self.selected.ok_or(EditError::NothingSelected)?;
        let mut rotated = self
            .design
            .element(id)
            .cloned()
            .ok_or(EditError::UnknownElement(id))?;
        rotated.rotation = if clockwise {
            rotated.rotation.clockwise()
        } else {
            rotated.rotation.counter_clockwise()
        };
        self.check_placement(&rotated)?;

        let before = self.design.clone();
        if let Some(placed) = self.design.element_mut(id) {
            placed.rotation = rotated.rotation;
        }
        self.commit(before);
        Ok(())
    }

    // --- Bulk operations ---

    pub fn clear_doors(&mut self) {
        let before = self.design.clone();
        self.design.doors.clear();
        self.context_menu = None;
        self.commit(before);
    }

    pub fn clear_pen_points(&mut self) {
        let before = self.design.clone();
        self.design.pen_points.clear();
        self.context_menu = None;
        self.commit(before);
    }

    /// Remove everything from the grid (undoable).
    pub fn clear(&mut self) {
        self.finish_gesture();
        let before = self.design.clone();
        self.design.clear();
        self.selected = None;
        self.context_menu = None;
        self.commit(before);
        log::info!("Cleared design");
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if title != self.design.title {
            self.design.title = title;
            self.dirty = true;
        }
    }

    /// Replace the design with one loaded from a file (undoable).
    pub fn load_design(&mut self, design: Design) -> Result<(), EditError> {
        check_design(&self.grid, &design)?;
        self.finish_gesture();
        let before = std::mem::replace(&mut self.design, design);
        self.selected = None;
        self.context_menu = None;
        self.commit(before);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
        self.context_menu = None;
    }

    // --- Context menu ---

    /// Open the context menu for a right click. Returns whether it opened.
    pub fn open_context_menu(&mut self, screen: Point) -> bool {
        let world = self.viewport.screen_to_world(screen);
        let target = self.design.element_at(world, self.grid.block_size);
        let has_tool_actions = matches!(self.tool, Tool::Door | Tool::Pen);
        if target.is_none() && !has_tool_actions {
            self.context_menu = None;
            return false;
        }
        self.context_menu = Some(ContextMenu { target, world });
        true
    }

    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    // --- History ---

    pub fn undo(&mut self) -> bool {
        self.finish_gesture();
        let current = self.design.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore_snapshot(previous);
                log::info!("Undo");
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.finish_gesture();
        let current = self.design.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.restore_snapshot(next);
                log::info!("Redo");
                true
            }
            None => false,
        }
    }

    fn restore_snapshot(&mut self, design: Design) {
        self.design = design;
        if let Some(id) = self.selected {
            if self.design.element(id).is_none() {
                self.selected = None;
            }
        }
        self.context_menu = None;
        self.dirty = true;
    }
}

fn check_design(grid: &GridSpec, design: &Design) -> Result<(), EditError> {
    if design.hull.width() != grid.width || design.hull.height() != grid.height {
        return Err(EditError::GridMismatch {
            expected_w: grid.width,
            expected_h: grid.height,
            found_w: design.hull.width(),
            found_h: design.hull.height(),
        });
    }
    design.validate(grid)?;
    Ok(())
}
