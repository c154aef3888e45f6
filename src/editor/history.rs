// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Undo/redo history of design snapshots.

use crate::models::design::Design;
use std::collections::VecDeque;

/// History system for undo/redo functionality.
#[derive(Debug)]
pub struct History {
    /// Undo stack (past states)
    undo_stack: VecDeque<Design>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<Design>,
    /// Maximum history size
    max_size: usize,
}

impl History {
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Save the state before a change
    pub fn push(&mut self, design: Design) {
        if self.max_size == 0 {
            return;
        }
        self.undo_stack.push_back(design);
        if self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }
        // A new edit invalidates the redo branch
        self.redo_stack.clear();
    }

    /// Undo: restore previous state
    pub fn undo(&mut self, current: Design) -> Option<Design> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Redo: restore next state
    pub fn redo(&mut self, current: Design) -> Option<Design> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::geometry::GridSpec;

    fn design(title: &str) -> Design {
        let mut design = Design::new(&GridSpec::new(300.0, 4, 4));
        design.title = title.to_string();
        design
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut history = History::new(10);
        history.push(design("a"));

        let restored = history.undo(design("b")).unwrap();
        assert_eq!(restored.title, "a");
        assert!(history.can_redo());

        let redone = history.redo(restored).unwrap();
        assert_eq!(redone.title, "b");
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::new(10);
        history.push(design("a"));
        history.undo(design("b"));
        history.push(design("c"));

        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::new(2);
        history.push(design("1"));
        history.push(design("2"));
        history.push(design("3"));

        assert_eq!(history.undo(design("4")).unwrap().title, "3");
        assert_eq!(history.undo(design("3")).unwrap().title, "2");
        assert!(history.undo(design("2")).is_none());
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new(5);
        assert!(!history.can_undo());
        assert!(history.undo(design("x")).is_none());
        assert!(history.redo(design("x")).is_none());

        history.push(design("a"));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }
}
