// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for ship designs.

pub mod catalog;
pub mod design;
pub mod door;
pub mod element;
pub mod hull;
