// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editing tools and the pointer gesture state machine.
//!
//! `Tool` is what the user picked in the toolbar. `Gesture` is what the
//! pointer is doing right now. All gesture transitions live in
//! [`Gesture::next`]; the editor core runs the enter/update/exit handler of
//! whichever state that table selects.

use crate::util::geometry::Point;
use uuid::Uuid;

/// Current editing tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Select, move and rotate placed elements.
    #[default]
    Select,
    /// Paint hull tiles.
    Brush,
    /// Erase hull tiles.
    Eraser,
    /// Place doors on grid edges.
    Door,
    /// Add background outline points.
    Pen,
}

impl Tool {
    pub const ALL: [Tool; 5] = [Tool::Select, Tool::Brush, Tool::Eraser, Tool::Door, Tool::Pen];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Select => "⬆ Select",
            Tool::Brush => "▦ Hull",
            Tool::Eraser => "⌫ Erase",
            Tool::Door => "🚪 Door",
            Tool::Pen => "✏ Outline",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Tool::Select => "Drag elements to move them, R to rotate, right-click for more",
            Tool::Brush => "Click or drag to paint hull tiles",
            Tool::Eraser => "Click or drag to erase hull tiles",
            Tool::Door => "Click near a tile edge to place a door",
            Tool::Pen => "Click grid corners to outline the ship background",
        }
    }

    pub fn shortcut(self) -> Option<&'static str> {
        match self {
            Tool::Select => Some("Ctrl+G"),
            Tool::Brush => Some("Ctrl+B"),
            Tool::Eraser => Some("Ctrl+E"),
            Tool::Door => Some("Ctrl+D"),
            Tool::Pen => None,
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
}

/// Pointer input fed to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Press(PointerButton),
    Move,
    Release,
}

/// What the Select gesture is holding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grab {
    /// A placed element, with its position when the drag began.
    Element { id: Uuid, origin: Point },
    /// The armament box.
    Armament,
}

/// The pointer gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No button held.
    #[default]
    Idle,
    /// Brush stroke.
    Painting,
    /// Eraser stroke.
    Erasing,
    PlacingDoor,
    PlacingPoint,
    /// Select tool press; `grab` is filled in when the press hits something.
    Selecting { grab: Option<Grab> },
    /// Middle-button view drag.
    Panning,
}

/// Result of feeding an event to the current gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Remain in the current state (run its update handler on moves).
    Stay,
    /// Enter a new state.
    Enter(Gesture),
    /// Leave the current state for Idle.
    Exit,
}

impl Gesture {
    /// The transition table.
    pub fn next(&self, tool: Tool, event: PointerEvent) -> Transition {
        match (self, event) {
            (Gesture::Idle, PointerEvent::Press(PointerButton::Middle)) => {
                Transition::Enter(Gesture::Panning)
            }
            (Gesture::Idle, PointerEvent::Press(PointerButton::Primary)) => {
                Transition::Enter(Gesture::started_by(tool))
            }
            (Gesture::Idle, _) => Transition::Stay,
            (_, PointerEvent::Release) => Transition::Exit,
            (_, PointerEvent::Press(_) | PointerEvent::Move) => Transition::Stay,
        }
    }

    /// The gesture a primary press starts with each tool.
    fn started_by(tool: Tool) -> Gesture {
        match tool {
            Tool::Select => Gesture::Selecting { grab: None },
            Tool::Brush => Gesture::Painting,
            Tool::Eraser => Gesture::Erasing,
            Tool::Door => Gesture::PlacingDoor,
            Tool::Pen => Gesture::PlacingPoint,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// Whether this gesture edits the design (and so forms one undo step).
    pub fn edits_design(&self) -> bool {
        !matches!(self, Gesture::Idle | Gesture::Panning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_press_enters_tool_state() {
        let idle = Gesture::Idle;
        let press = PointerEvent::Press(PointerButton::Primary);

        assert_eq!(idle.next(Tool::Brush, press), Transition::Enter(Gesture::Painting));
        assert_eq!(idle.next(Tool::Eraser, press), Transition::Enter(Gesture::Erasing));
        assert_eq!(idle.next(Tool::Door, press), Transition::Enter(Gesture::PlacingDoor));
        assert_eq!(idle.next(Tool::Pen, press), Transition::Enter(Gesture::PlacingPoint));
        assert_eq!(
            idle.next(Tool::Select, press),
            Transition::Enter(Gesture::Selecting { grab: None })
        );
    }

    #[test]
    fn test_middle_press_pans_with_any_tool() {
        for tool in Tool::ALL {
            assert_eq!(
                Gesture::Idle.next(tool, PointerEvent::Press(PointerButton::Middle)),
                Transition::Enter(Gesture::Panning)
            );
        }
    }

    #[test]
    fn test_release_exits_and_moves_stay() {
        for gesture in [Gesture::Painting, Gesture::Panning, Gesture::PlacingDoor] {
            assert_eq!(gesture.next(Tool::Brush, PointerEvent::Release), Transition::Exit);
            assert_eq!(gesture.next(Tool::Brush, PointerEvent::Move), Transition::Stay);
            assert_eq!(
                gesture.next(Tool::Brush, PointerEvent::Press(PointerButton::Middle)),
                Transition::Stay
            );
        }
    }

    #[test]
    fn test_idle_ignores_move_and_release() {
        let idle = Gesture::Idle;
        assert_eq!(idle.next(Tool::Brush, PointerEvent::Release), Transition::Stay);
        assert_eq!(idle.next(Tool::Brush, PointerEvent::Move), Transition::Stay);
    }

    #[test]
    fn test_panning_is_not_an_edit() {
        assert!(!Gesture::Panning.edits_design());
        assert!(!Gesture::Idle.edits_design());
        assert!(Gesture::Painting.edits_design());
    }
}
