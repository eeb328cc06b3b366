//! Gemeinsame Test-Fixtures für die Deck-Tools.

use glam::Vec3;

use super::{CursorInput, HullTool};
use crate::core::hull_definition::HullDefinition;
use crate::core::hull_generator::generate_from_profiles;
use crate::core::HullDataManager;
use crate::shared::HullOptions;

/// Standard-Rumpf mit Standard-Optionen.
pub(crate) fn default_manager() -> (HullDataManager, HullOptions) {
    let options = HullOptions::default();
    let profiles = HullDefinition::default()
        .build(&options)
        .expect("Standard-Rumpf muss sich bauen lassen");
    let data = HullDataManager::new(generate_from_profiles(&profiles, &options), &options);
    (data, options)
}

/// Punkt knapp neben dem Gitterpunkt (x, z) mittschiffs.
pub(crate) fn near(x: f32, z: f32) -> Vec3 {
    Vec3::new(x + 0.1, 0.0, z + 0.1)
}

/// Kompletter Strich über vier Frames: hovern, drücken, ziehen, loslassen.
pub(crate) fn stroke(tool: &mut dyn HullTool, data: &mut HullDataManager, from: Vec3, to: Vec3) {
    begin_stroke(tool, data, from, to);
    tool.update_input(&CursorInput::at(to, false), data);
}

/// Strich ohne Loslassen.
pub(crate) fn begin_stroke(
    tool: &mut dyn HullTool,
    data: &mut HullDataManager,
    from: Vec3,
    to: Vec3,
) {
    tool.update_input(&CursorInput::at(from, false), data);
    tool.update_input(&CursorInput::at(from, true), data);
    tool.update_input(&CursorInput::at(to, true), data);
}

/// Klick ohne Ziehen.
pub(crate) fn click(tool: &mut dyn HullTool, data: &mut HullDataManager, at: Vec3) {
    stroke(tool, data, at, at);
}
