// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ship design state.
//!
//! A `Design` is the complete user-editable state of the editor: hull tiles,
//! placed elements, doors, background pen points and the armament box. It is
//! the unit of undo, autosave and file export.

use super::door::Door;
use super::element::ShipElement;
use super::hull::{GridCoord, HullGrid};
use crate::util::geometry::{GridSpec, Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Minimum number of pen points that close a background outline.
pub const MIN_OUTLINE_POINTS: usize = 3;

/// Inconsistent design data, usually from a hand-edited or foreign file.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DesignError {
    #[error("door {0:?} is listed twice")]
    DuplicateDoor(Door),
    #[error("door {0:?} is not on a grid line")]
    DoorOffGrid(Door),
    #[error("element id {0} is used twice")]
    DuplicateElement(Uuid),
    #[error("{name} ({id}) lies outside the grid")]
    ElementOffGrid { id: Uuid, name: String },
}

/// Element rotation in quarter turns, clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Nearest quarter turn to an arbitrary angle in degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        let quarters = (degrees / 90.0).round().rem_euclid(4.0) as u8;
        match quarters {
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            3 => Rotation::Deg270,
            _ => Rotation::Deg0,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn clockwise(self) -> Self {
        Self::from_degrees(f64::from(self.degrees()) + 90.0)
    }

    pub fn counter_clockwise(self) -> Self {
        Self::from_degrees(f64::from(self.degrees()) - 90.0)
    }

    /// Whether width and height swap under this rotation.
    pub fn is_sideways(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl From<f64> for Rotation {
    fn from(degrees: f64) -> Self {
        Rotation::from_degrees(degrees)
    }
}

impl From<Rotation> for f64 {
    fn from(rotation: Rotation) -> Self {
        f64::from(rotation.degrees())
    }
}

/// A ship element placed on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedElement {
    pub id: Uuid,
    pub element: ShipElement,
    /// Cell under the element's top-left corner.
    pub grid: GridCoord,
    /// Top-left corner in world pixels.
    pub position: Point,
    #[serde(default)]
    pub rotation: Rotation,
}

impl PlacedElement {
    /// Place an element with a fresh id.
    pub fn new(element: ShipElement, position: Point, grid: GridCoord, rotation: Rotation) -> Self {
        Self {
            id: Uuid::new_v4(),
            element,
            grid,
            position,
            rotation,
        }
    }

    /// Size on the grid after rotation.
    pub fn size(&self, block_size: f64) -> (f64, f64) {
        let (w, h) = self.element.footprint(block_size);
        if self.rotation.is_sideways() {
            (h, w)
        } else {
            (w, h)
        }
    }

    /// Occupied area. Rotation turns the footprint in place around its top-left corner.
    pub fn bounds(&self, block_size: f64) -> Rect {
        let (w, h) = self.size(block_size);
        Rect::from_origin(self.position, w, h)
    }
}

/// One row of the armament box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponDetail {
    pub name: String,
    pub damage: u32,
    pub accuracy: u32,
}

/// The complete editable ship design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    #[serde(default)]
    pub title: String,
    pub hull: HullGrid,
    /// Placed elements; later entries draw on top.
    #[serde(default)]
    pub elements: Vec<PlacedElement>,
    #[serde(default)]
    pub doors: Vec<Door>,
    /// Background outline vertices, in placement order.
    #[serde(default)]
    pub pen_points: Vec<Point>,
    /// Top-left corner of the armament box.
    pub armament_origin: Point,
}

impl Design {
    /// An empty design for the given grid. The armament box starts below the grid.
    pub fn new(grid: &GridSpec) -> Self {
        Self {
            title: String::new(),
            hull: HullGrid::new(grid.width, grid.height),
            elements: Vec::new(),
            doors: Vec::new(),
            pen_points: Vec::new(),
            armament_origin: Point::new(0.0, grid.height_px() + grid.block_size),
        }
    }

    pub fn element(&self, id: Uuid) -> Option<&PlacedElement> {
        self.elements.iter().find(|placed| placed.id == id)
    }

    pub fn element_mut(&mut self, id: Uuid) -> Option<&mut PlacedElement> {
        self.elements.iter_mut().find(|placed| placed.id == id)
    }

    /// Topmost element under `p`.
    pub fn element_at(&self, p: Point, block_size: f64) -> Option<Uuid> {
        self.elements
            .iter()
            .rev()
            .find(|placed| placed.bounds(block_size).contains(p))
            .map(|placed| placed.id)
    }

    /// Move an element to the end of the draw order.
    pub fn bring_to_front(&mut self, id: Uuid) {
        if let Some(index) = self.elements.iter().position(|placed| placed.id == id) {
            let placed = self.elements.remove(index);
            self.elements.push(placed);
        }
    }

    /// Remove an element, returning it if it existed.
    pub fn remove_element(&mut self, id: Uuid) -> Option<PlacedElement> {
        let index = self.elements.iter().position(|placed| placed.id == id)?;
        Some(self.elements.remove(index))
    }

    /// Whether `rect` overlaps any element other than `id`.
    pub fn overlaps_other(&self, id: Uuid, rect: &Rect, block_size: f64) -> bool {
        self.elements
            .iter()
            .filter(|placed| placed.id != id)
            .any(|placed| placed.bounds(block_size).overlaps(rect))
    }

    /// Add a door unless one is already on that edge.
    pub fn add_door(&mut self, door: Door) -> bool {
        if self.doors.contains(&door) {
            return false;
        }
        self.doors.push(door);
        true
    }

    /// Check the invariants editing maintains but a loaded file may break.
    pub fn validate(&self, grid: &GridSpec) -> Result<(), DesignError> {
        let mut doors = HashSet::new();
        for door in &self.doors {
            let on_grid = match *door {
                Door::Vertical { x, y } => x <= grid.width && y < grid.height,
                Door::Horizontal { x, y } => x < grid.width && y <= grid.height,
            };
            if !on_grid {
                return Err(DesignError::DoorOffGrid(*door));
            }
            if !doors.insert(*door) {
                return Err(DesignError::DuplicateDoor(*door));
            }
        }

        let mut ids = HashSet::new();
        for placed in &self.elements {
            if !ids.insert(placed.id) {
                return Err(DesignError::DuplicateElement(placed.id));
            }
            let inside = grid.contains_rect(&placed.bounds(grid.block_size))
                && placed.grid.x < grid.width
                && placed.grid.y < grid.height;
            if !inside {
                return Err(DesignError::ElementOffGrid {
                    id: placed.id,
                    name: placed.element.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Closed background outline, once enough pen points exist.
    pub fn outline(&self) -> Option<&[Point]> {
        (self.pen_points.len() >= MIN_OUTLINE_POINTS).then_some(self.pen_points.as_slice())
    }

    /// Remove everything drawn on the grid. Title and armament box stay.
    pub fn clear(&mut self) {
        self.hull = HullGrid::new(self.hull.width(), self.hull.height());
        self.elements.clear();
        self.doors.clear();
        self.pen_points.clear();
    }

    /// Sum of element point costs plus a fixed cost per hull tile.
    pub fn total_cost(&self, hull_tile_cost: u32) -> u32 {
        let elements: u32 = self
            .elements
            .iter()
            .map(|placed| placed.element.tactical_value)
            .sum();
        let hull = u32::try_from(self.hull.tile_count())
            .unwrap_or(u32::MAX)
            .saturating_mul(hull_tile_cost);
        elements.saturating_add(hull)
    }

    /// Distinct weapons by name, in placement order.
    pub fn weapon_details(&self) -> Vec<WeaponDetail> {
        let mut details: Vec<WeaponDetail> = Vec::new();
        for placed in &self.elements {
            let Some(weapon) = placed.element.weapon else {
                continue;
            };
            if details.iter().any(|detail| detail.name == placed.element.name) {
                continue;
            }
            details.push(WeaponDetail {
                name: placed.element.name.clone(),
                damage: weapon.damage,
                accuracy: weapon.accuracy,
            });
        }
        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::element::{ElementCategory, WeaponStats};

    fn grid() -> GridSpec {
        GridSpec::new(300.0, 22, 11)
    }

    fn laser() -> ShipElement {
        let mut element = ShipElement::new("Laser Gun", ElementCategory::LaserGunControlRoom, 40);
        element.image_width = Some(600);
        element.image_height = Some(300);
        element.weapon = Some(WeaponStats {
            damage: 3,
            accuracy: 4,
            range: 24,
            ammo: None,
        });
        element
    }

    fn place(design: &mut Design, element: ShipElement, x: f64, y: f64) -> Uuid {
        let grid = grid();
        let position = Point::new(x, y);
        let coord = grid.to_grid_coords(position).unwrap();
        let placed = PlacedElement::new(element, position, coord, Rotation::Deg0);
        let id = placed.id;
        design.elements.push(placed);
        id
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(0.0), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(89.6), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(-90.0), Rotation::Deg270);
        assert_eq!(Rotation::from_degrees(540.0), Rotation::Deg180);
        assert_eq!(Rotation::Deg270.clockwise(), Rotation::Deg0);
        assert_eq!(Rotation::Deg0.counter_clockwise(), Rotation::Deg270);
    }

    #[test]
    fn test_rotation_serializes_as_degrees() {
        assert_eq!(serde_json::to_string(&Rotation::Deg90).unwrap(), "90.0");
        let parsed: Rotation = serde_json::from_str("179.99").unwrap();
        assert_eq!(parsed, Rotation::Deg180);
    }

    #[test]
    fn test_sideways_bounds_swap_size() {
        let mut design = Design::new(&grid());
        let id = place(&mut design, laser(), 300.0, 300.0);
        design.element_mut(id).unwrap().rotation = Rotation::Deg90;

        let bounds = design.element(id).unwrap().bounds(300.0);
        assert_eq!(bounds, Rect::new(300.0, 300.0, 300.0, 600.0));
    }

    #[test]
    fn test_total_cost_counts_elements_and_hull() {
        let mut design = Design::new(&grid());
        place(&mut design, laser(), 0.0, 0.0);
        place(&mut design, laser(), 600.0, 0.0);
        design.hull = design
            .hull
            .with_tile(GridCoord::new(0, 0))
            .with_tile(GridCoord::new(1, 0))
            .with_tile(GridCoord::new(2, 0));

        assert_eq!(design.total_cost(10), 40 + 40 + 30);
    }

    #[test]
    fn test_weapon_details_are_unique_by_name() {
        let mut design = Design::new(&grid());
        place(&mut design, laser(), 0.0, 0.0);
        place(
            &mut design,
            ShipElement::new("Hallway", ElementCategory::Hallway, 5),
            900.0,
            0.0,
        );
        place(&mut design, laser(), 0.0, 600.0);

        let details = design.weapon_details();
        assert_eq!(
            details,
            vec![WeaponDetail {
                name: "Laser Gun".to_string(),
                damage: 3,
                accuracy: 4,
            }]
        );
    }

    #[test]
    fn test_element_at_picks_topmost() {
        let mut design = Design::new(&grid());
        let bottom = place(&mut design, laser(), 0.0, 0.0);
        let top = place(&mut design, laser(), 300.0, 0.0);

        assert_eq!(design.element_at(Point::new(450.0, 150.0), 300.0), Some(top));
        assert_eq!(design.element_at(Point::new(100.0, 150.0), 300.0), Some(bottom));
        assert_eq!(design.element_at(Point::new(100.0, 900.0), 300.0), None);

        design.bring_to_front(bottom);
        assert_eq!(design.element_at(Point::new(450.0, 150.0), 300.0), Some(bottom));
    }

    #[test]
    fn test_add_door_ignores_duplicates() {
        let mut design = Design::new(&grid());
        assert!(design.add_door(Door::Vertical { x: 1, y: 1 }));
        assert!(!design.add_door(Door::Vertical { x: 1, y: 1 }));
        assert_eq!(design.doors.len(), 1);
    }

    #[test]
    fn test_validate_accepts_edited_design() {
        let mut design = Design::new(&grid());
        place(&mut design, laser(), 0.0, 0.0);
        design.add_door(Door::Vertical { x: 22, y: 10 });
        design.add_door(Door::Horizontal { x: 21, y: 11 });
        assert_eq!(design.validate(&grid()), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_doors() {
        let mut design = Design::new(&grid());
        design.doors = vec![Door::Vertical { x: 1, y: 0 }, Door::Vertical { x: 1, y: 0 }];
        assert_eq!(
            design.validate(&grid()),
            Err(DesignError::DuplicateDoor(Door::Vertical { x: 1, y: 0 }))
        );

        design.doors = vec![Door::Vertical { x: 999, y: 999 }];
        assert_eq!(
            design.validate(&grid()),
            Err(DesignError::DoorOffGrid(Door::Vertical { x: 999, y: 999 }))
        );

        design.doors = vec![Door::Horizontal { x: 22, y: 0 }];
        assert!(design.validate(&grid()).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_elements() {
        let mut design = Design::new(&grid());
        let id = place(&mut design, laser(), 0.0, 0.0);
        let mut twin = design.element(id).unwrap().clone();
        twin.position = Point::new(0.0, 900.0);
        twin.grid = GridCoord::new(0, 3);
        design.elements.push(twin);
        assert_eq!(design.validate(&grid()), Err(DesignError::DuplicateElement(id)));

        design.elements.pop();
        design.element_mut(id).unwrap().position = Point::new(-5000.0, 90000.0);
        assert!(matches!(
            design.validate(&grid()),
            Err(DesignError::ElementOffGrid { .. })
        ));

        // Hanging off the right edge.
        let placed = design.element_mut(id).unwrap();
        placed.position = Point::new(6300.0, 0.0);
        placed.grid = GridCoord::new(21, 0);
        assert!(design.validate(&grid()).is_err());
    }

    #[test]
    fn test_outline_needs_three_points() {
        let mut design = Design::new(&grid());
        design.pen_points = vec![Point::new(0.0, 0.0), Point::new(300.0, 0.0)];
        assert!(design.outline().is_none());

        design.pen_points.push(Point::new(300.0, 300.0));
        assert_eq!(design.outline().map(<[Point]>::len), Some(3));
    }

    #[test]
    fn test_clear_keeps_title() {
        let mut design = Design::new(&grid());
        design.title = "Corvette".to_string();
        place(&mut design, laser(), 0.0, 0.0);
        design.hull = design.hull.with_tile(GridCoord::new(0, 0));
        design.add_door(Door::Horizontal { x: 0, y: 0 });

        design.clear();

        assert_eq!(design.title, "Corvette");
        assert!(design.elements.is_empty());
        assert!(design.hull.is_empty());
        assert!(design.doors.is_empty());
        assert_eq!(design.hull.width(), 22);
    }
}
