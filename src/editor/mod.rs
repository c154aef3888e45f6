// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor state machine, independent of the GUI toolkit.

pub mod core;
pub mod history;
pub mod scene;
pub mod tool;
pub mod viewport;

pub use self::core::EditorCore;
