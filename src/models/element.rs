// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ship element data structures.
//!
//! This module defines the placeable ship modules (weapons, engines, shield
//! generators, hallways) together with their point cost and optional
//! combat statistics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of ship element. Serialized with the catalog's camelCase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementCategory {
    Hallway,
    Thruster,
    #[serde(rename = "engine5v")]
    Engine5v,
    #[serde(rename = "engine10v")]
    Engine10v,
    #[serde(rename = "engine15v")]
    Engine15v,
    ShieldGenerator,
    ShieldCapacitor,
    LargeEngine,
    LargeShieldGenerator,
    LargeThruster,
    BreachPodLauncher,
    #[serde(rename = "scatterMissileLauncher2x")]
    ScatterMissileLauncher2x,
    #[serde(rename = "scatterMissileLauncher4x")]
    ScatterMissileLauncher4x,
    LaserGunControlRoom,
    GaussRifleControlRoom,
    #[serde(rename = "guidedMissileLauncher2")]
    GuidedMissileLauncher2,
    #[serde(rename = "guidedMissileLauncher3")]
    GuidedMissileLauncher3,
}

impl ElementCategory {
    /// Human readable label for the sidebar.
    pub fn label(self) -> &'static str {
        match self {
            ElementCategory::Hallway => "Hallway",
            ElementCategory::Thruster => "Thruster",
            ElementCategory::Engine5v => "Engine 5v",
            ElementCategory::Engine10v => "Engine 10v",
            ElementCategory::Engine15v => "Engine 15v",
            ElementCategory::ShieldGenerator => "Shield Generator",
            ElementCategory::ShieldCapacitor => "Shield Capacitor",
            ElementCategory::LargeEngine => "Large Engine",
            ElementCategory::LargeShieldGenerator => "Large Shield Generator",
            ElementCategory::LargeThruster => "Large Thruster",
            ElementCategory::BreachPodLauncher => "Breach Pod Launcher",
            ElementCategory::ScatterMissileLauncher2x => "Scatter Missile Launcher 2x",
            ElementCategory::ScatterMissileLauncher4x => "Scatter Missile Launcher 4x",
            ElementCategory::LaserGunControlRoom => "Laser Gun Control Room",
            ElementCategory::GaussRifleControlRoom => "Gauss Rifle Control Room",
            ElementCategory::GuidedMissileLauncher2 => "Guided Missile Launcher (2)",
            ElementCategory::GuidedMissileLauncher3 => "Guided Missile Launcher (3)",
        }
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weapon statistics shown in the armament box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage: u32,
    pub accuracy: u32,
    #[serde(default)]
    pub range: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammo: Option<u32>,
}

/// Engine statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub thrust: u32,
}

/// Shield statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldStats {
    pub capacitors: u32,
}

/// A placeable ship module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipElement {
    pub name: String,
    #[serde(rename = "type")]
    pub category: ElementCategory,
    /// Point cost added to the design total.
    pub tactical_value: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    /// Artwork file, relative to the catalog directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_file_name: Option<String>,
    /// Natural artwork width in world pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<u32>,
    /// Natural artwork height in world pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<WeaponStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shield: Option<ShieldStats>,
}

impl ShipElement {
    /// Create an element with no artwork or statistics.
    #[cfg(test)]
    pub fn new(name: impl Into<String>, category: ElementCategory, tactical_value: u32) -> Self {
        Self {
            name: name.into(),
            category,
            tactical_value,
            notes: Vec::new(),
            image_file_name: None,
            image_width: None,
            image_height: None,
            weapon: None,
            engine: None,
            shield: None,
        }
    }

    pub fn is_weapon(&self) -> bool {
        self.weapon.is_some()
    }

    /// Unrotated size in world pixels. Elements without artwork size take one block.
    pub fn footprint(&self, block_size: f64) -> (f64, f64) {
        match (self.image_width, self.image_height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (f64::from(w), f64::from(h)),
            _ => (block_size, block_size),
        }
    }
}
